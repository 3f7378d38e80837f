mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// 同步的字符串键值存储，对应浏览器的 localStorage
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
