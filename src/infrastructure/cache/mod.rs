//! # Cache Stores
//!
//! Key-value stores the rate cache is layered on.
//!
//! - [`CacheStore`]: port with `get`, `set_ex` and `del`
//! - [`RedisCacheStore`]: Redis-compatible server
//! - [`InMemoryCacheStore`]: process-local store for tests

pub mod in_memory;
pub mod redis_store;
pub mod traits;

pub use in_memory::InMemoryCacheStore;
pub use redis_store::RedisCacheStore;
pub use traits::{CacheError, CacheResult, CacheStore};
