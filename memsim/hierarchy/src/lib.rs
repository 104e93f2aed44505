//! A two level memory hierarchy used to compute the timing cost of a stream of
//! accesses: a small set-associative cache fronting a linear backing store.
pub mod backing;
pub mod cache;
pub mod configuration;
pub mod device;
pub mod errors;
pub mod stats;
#[cfg(test)]
mod tests;

/// Raw word address. No translation happens between layers.
pub type Address = usize;

pub use backing::BackingStore;
pub use cache::{CacheLayer, StandardHierarchy, build_hierarchy};
pub use configuration::HierarchyConfig;
pub use device::{MemoryLayer, StorageDevice};
pub use errors::{MemError, MemResult};
pub use stats::{AccessOutcome, AccessStats};
