//! Utils - shared helpers

pub mod abi;
pub mod cache;

pub use cache::{CacheStats, SourceCache};
