use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::store::errors::{Result, StoreError};
use crate::store::store::Store;
use crate::store::value::Value;

/// The default (and only) engine: a hash map behind one `RwLock`.
///
/// Cloning shares the underlying map, so a `MemStore` can be handed to
/// every connection handler thread. Each public operation takes the lock
/// exactly once; in particular `rename` and `flush_all` are single
/// critical sections, never a visible read-write-delete sequence.
#[derive(Clone)]
pub struct MemStore {
    data: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemStore {
    /// make an empty store.
    pub fn new() -> Self {
        MemStore {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// how many keys are currently stored. Mostly useful in tests.
    pub fn len(&self) -> Result<usize> {
        let data = self.data.read()?;
        Ok(data.len())
    }

    /// whether the store holds no keys at all.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for MemStore {
    fn default() -> Self {
        MemStore::new()
    }
}

impl Store for MemStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let data = self.data.read()?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: String, value: String) -> Result<()> {
        let mut data = self.data.write()?;
        data.insert(key, Value::Str(value));
        Ok(())
    }

    fn rename(&self, source: &str, dest: String) -> Result<()> {
        let mut data = self.data.write()?;
        match data.remove(source) {
            Some(value) => {
                data.insert(dest, value);
                Ok(())
            }
            None => Err(StoreError::NoSuchKey),
        }
    }

    fn hset(&self, key: String, field: String, value: String) -> Result<usize> {
        let mut data = self.data.write()?;
        match data.get_mut(&key) {
            Some(Value::Hash(hash)) => {
                let created = if hash.insert(field, value).is_none() { 1 } else { 0 };
                Ok(created)
            }
            Some(_) => Err(StoreError::WrongType { key }),
            None => {
                let mut hash = HashMap::new();
                hash.insert(field, value);
                data.insert(key, Value::Hash(hash));
                Ok(1)
            }
        }
    }

    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        let data = self.data.read()?;
        Ok(data
            .get(key)
            .and_then(Value::as_hash)
            .and_then(|hash| hash.get(field))
            .cloned())
    }

    fn flush_all(&self) -> Result<()> {
        let mut data = self.data.write()?;
        data.clear();
        Ok(())
    }
}
