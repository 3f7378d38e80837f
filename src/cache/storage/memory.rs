use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::KeyValueStore;
use crate::error::StorageError;

/// 进程内存储，生命周期与进程一致
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定内容初始化，主要用于模拟已有的持久化数据
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: Mutex::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStorage::new();
        assert_eq!(store.get_item("token").unwrap(), None);

        store.set_item("token", "t-1").unwrap();
        assert_eq!(store.get_item("token").unwrap().as_deref(), Some("t-1"));

        store.remove_item("token").unwrap();
        assert_eq!(store.get_item("token").unwrap(), None);
    }

    #[test]
    fn removing_missing_key_is_fine() {
        let store = MemoryStorage::with_items([("user", "{}")]);
        store.remove_item("token").unwrap();
        assert_eq!(store.get_item("user").unwrap().as_deref(), Some("{}"));
    }
}
