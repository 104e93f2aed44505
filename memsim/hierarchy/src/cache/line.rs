use std::ops::Range;

use crate::Address;

/// A single cache entry. A line without a tag is cold and has never been
/// filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheLine<W> {
    tag: Option<Address>,
    data: W,
}

impl<W> CacheLine<W> {
    pub fn tag(&self) -> Option<Address> {
        self.tag
    }

    pub fn data(&self) -> &W {
        &self.data
    }

    pub fn is_cold(&self) -> bool {
        self.tag.is_none()
    }

    pub(crate) fn holds(&self, address: Address) -> bool {
        self.tag == Some(address)
    }

    pub(crate) fn set_data(&mut self, data: W) {
        self.data = data;
    }

    /// Replaces the whole entry, returning the tag that was evicted
    pub(crate) fn install(&mut self, tag: Address, data: W) -> Option<Address> {
        self.data = data;
        self.tag.replace(tag)
    }
}

/// A contiguous slice of the line array. Addresses map to the set
/// `address % set_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSet {
    pub index: usize,
    pub start: usize,
    pub capacity: usize,
}

impl CacheSet {
    /// One past the last line in this set
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.capacity
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Splits `line_count` lines into `set_count` equally sized sets. The
    /// caller is responsible for `set_count` dividing `line_count`.
    pub(crate) fn partition(line_count: usize, set_count: usize) -> Vec<Self> {
        let capacity = line_count / set_count;
        (0..set_count)
            .map(|index| CacheSet {
                index,
                start: index * capacity,
                capacity,
            })
            .collect()
    }
}
