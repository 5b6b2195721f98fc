//! Storage layer
//!
//! Durable key-value storage for the history: a `KeyValueStore` trait with a
//! file-backed and an in-memory implementation, plus the persisted layout of
//! the two keys the history owns.

mod file;
mod kv;
mod memory;
mod snapshot;

pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use snapshot::{read_json, write_json, HistorySnapshot, HISTORY_KEY, TOMBSTONE_KEY};
