//! Key-value storage abstraction

use crate::Result;

/// Synchronous string key-value storage
///
/// Values are opaque strings (the history stores JSON documents). Every call
/// blocks the caller; there is no batching and no retry.
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written or was removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Human-readable backend name for log output
    fn name(&self) -> &'static str;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
