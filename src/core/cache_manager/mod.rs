//! Poll result cache
//!
//! Results are keyed by poll signature, served while fresh, coalesced while
//! in flight and evicted once idle.

pub mod manager;
pub mod types;

pub use manager::ResultCache;
pub use types::{
    CacheConfig, CacheEntry, CacheSignature, CacheStats, FetchMode, SignatureScope,
};
