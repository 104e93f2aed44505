use thiserror::Error;

use crate::Address;

/// A type alias for a result with a [MemError] as the error type
pub type MemResult<T> = Result<T, MemError>;

/// An enum representing the errors a memory layer can report. Both are
/// precondition violations scoped to the offending call; a rejected access
/// leaves every layer untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemError {
    /// The address lies outside `[0, size)` for the named device
    #[error(
        "address {address} is out of range for \"{device}\" (valid addresses are 0..{size})"
    )]
    OutOfRangeAddress {
        device: String,
        address: Address,
        size: usize,
    },

    /// The hierarchy was given an unusable configuration
    #[error("invalid configuration - {0}")]
    InvalidConfiguration(String),
}

impl MemError {
    pub fn out_of_range<S: Into<String>>(
        device: S,
        address: Address,
        size: usize,
    ) -> Self {
        Self::OutOfRangeAddress {
            device: device.into(),
            address,
            size,
        }
    }

    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
