use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::KeyValueStore;
use crate::error::StorageError;

type Items = BTreeMap<String, String>;

/// 基于单个 JSON 文件的持久化存储
///
/// 文件内容是一个字符串到字符串的扁平对象。每次操作都重新读取文件，
/// 写入时先写临时文件再重命名，避免留下半截内容。
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// 打开存储文件，必要时创建所在目录；文件本身在首次写入时创建
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<Items, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Items::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Items::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入前读取；内容损坏时记录日志并从空对象开始，随后整体覆盖
    fn read_items_for_write(&self) -> Result<Items, StorageError> {
        match self.read_items() {
            Err(StorageError::Serde(e)) => {
                tracing::warn!(
                    "Discarding corrupted storage file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Items::new())
            }
            other => other,
        }
    }

    fn write_items(&self, items: &Items) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_items_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut items, corrupted) = match self.read_items() {
            Err(StorageError::Serde(_)) => (self.read_items_for_write()?, true),
            other => (other?, false),
        };
        if items.remove(key).is_some() || corrupted {
            self.write_items(&items)?;
        }
        Ok(())
    }
}
