use crate::cache::keys::{TOKEN_KEY, USER_KEY};
use crate::cache::storage::KeyValueStore;
use crate::error::StorageError;
use crate::models::User;

/// 从持久化存储中恢复的会话
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedSession {
    pub user: Option<User>,
    pub token: Option<String>,
}

/// 会话持久化操作
pub struct SessionCacheOperations;

impl SessionCacheOperations {
    /// 读取持久化的会话
    ///
    /// 读取或解析失败只记录日志，返回空会话。用户资料无法恢复时令牌也不恢复。
    pub fn load(store: &dyn KeyValueStore) -> CachedSession {
        let stored = match store.get_item(USER_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to read user from storage: {}", e);
                return CachedSession::default();
            }
        };
        tracing::debug!("Loading user from storage: {:?}", stored);

        let Some(stored) = stored else {
            return CachedSession::default();
        };

        let user = match serde_json::from_str::<User>(&stored) {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to parse user from storage: {}", e);
                return CachedSession::default();
            }
        };

        let token = store.get_item(TOKEN_KEY).unwrap_or_else(|e| {
            tracing::error!("Failed to read token from storage: {}", e);
            None
        });

        tracing::debug!("User loaded from storage: {}", user.username);
        CachedSession {
            user: Some(user),
            token,
        }
    }

    /// 保存用户和令牌
    ///
    /// 先删除旧令牌再写用户，任何一步失败都不会留下新用户配旧令牌。
    pub fn save(store: &dyn KeyValueStore, user: &User, token: &str) -> Result<(), StorageError> {
        store.remove_item(TOKEN_KEY)?;
        Self::save_user(store, user)?;
        store.set_item(TOKEN_KEY, token)
    }

    /// 只保存用户资料，令牌不变
    pub fn save_user(store: &dyn KeyValueStore, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        store.set_item(USER_KEY, &json)
    }

    /// 删除用户和令牌
    pub fn clear(store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.remove_item(USER_KEY)?;
        store.remove_item(TOKEN_KEY)
    }
}
