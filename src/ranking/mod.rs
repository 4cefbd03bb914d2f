//! Ranking module - best-time persistence
//!
//! Storage abstraction plus the ranking store built on top of it.

pub mod kv;
pub mod store;

// Re-export commonly used types
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::{rankings_key, RankingError, RankingRecord, RankingStore, LOCK_KEY};
