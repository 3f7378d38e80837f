use std::sync::{Arc, PoisonError, RwLock};

use crate::cache::{CachedSession, KeyValueStore, SessionCacheOperations};
use crate::models::{User, UserUpdate};

/// 当前登录会话
///
/// 内存中的状态是唯一的读取来源，所有读取都是同步的；每次修改都会写回持久化存储。
/// 持久化失败只记录日志，不会传给调用方。
pub struct UserSession {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<CachedSession>,
}

impl UserSession {
    /// 从持久化存储恢复会话
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let state = SessionCacheOperations::load(store.as_ref());
        tracing::info!(
            "Initializing user session, current user: {:?}",
            state.user.as_ref().map(|u| u.username.as_str())
        );
        Self {
            store,
            state: RwLock::new(state),
        }
    }

    /// 设置用户和令牌
    pub fn set_user(&self, user: User, token: impl Into<String>) {
        let token = token.into();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = SessionCacheOperations::save(self.store.as_ref(), &user, &token) {
            tracing::error!("Failed to persist session for {}: {}", user.username, e);
        }
        state.user = Some(user);
        state.token = Some(token);
    }

    /// 合并部分用户资料；未登录时不做任何事
    pub fn update_user(&self, update: UserUpdate) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let Some(user) = state.user.as_mut() else {
            tracing::debug!("Ignoring user update without a current user");
            return;
        };

        user.merge(update);
        if let Err(e) = SessionCacheOperations::save_user(self.store.as_ref(), user) {
            tracing::error!("Failed to persist updated user {}: {}", user.username, e);
        }
    }

    /// 退出登录，清空内存和持久化的会话
    pub fn logout(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = SessionCacheOperations::clear(self.store.as_ref()) {
            tracing::error!("Failed to clear persisted session: {}", e);
        }
        *state = CachedSession::default();
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    /// 用户和令牌同时存在才算已登录
    pub fn is_logged_in(&self) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.user.is_some() && state.token.is_some()
    }
}

impl std::fmt::Debug for UserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("UserSession")
            .field("user", &state.user)
            .field("has_token", &state.token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::keys::{TOKEN_KEY, USER_KEY};
    use crate::cache::{FileStorage, MemoryStorage};
    use crate::error::StorageError;

    fn memory() -> Arc<MemoryStorage> {
        Arc::new(MemoryStorage::new())
    }

    fn sample_user() -> User {
        let mut user = User::new(42, "xiaobao");
        user.email = Some("xb@example.com".to_string());
        user.join_date = Some("2024-03-01".to_string());
        user
    }

    #[test]
    fn set_user_survives_reload() {
        let store = memory();
        let session = UserSession::load(store.clone());
        session.set_user(sample_user(), "tok-42");

        let reloaded = UserSession::load(store);
        assert_eq!(reloaded.user(), Some(sample_user()));
        assert_eq!(reloaded.token().as_deref(), Some("tok-42"));
        assert!(reloaded.is_logged_in());
    }

    #[test]
    fn set_user_survives_reload_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let session = UserSession::load(Arc::new(FileStorage::open(&path).unwrap()));
        session.set_user(sample_user(), "file-token");
        drop(session);

        let reloaded = UserSession::load(Arc::new(FileStorage::open(&path).unwrap()));
        assert_eq!(reloaded.user(), Some(sample_user()));
        assert_eq!(reloaded.token().as_deref(), Some("file-token"));
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let store = memory();
        let session = UserSession::load(store.clone());
        session.set_user(sample_user(), "t");
        session.logout();

        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);

        let reloaded = UserSession::load(store.clone());
        assert!(!reloaded.is_logged_in());
        assert_eq!(store.get_item(USER_KEY).unwrap(), None);
        assert_eq!(store.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn update_without_user_is_noop() {
        let store = memory();
        let session = UserSession::load(store.clone());
        session.update_user(UserUpdate {
            username: Some("ghost".to_string()),
            ..Default::default()
        });

        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert_eq!(store.get_item(USER_KEY).unwrap(), None);
    }

    #[test]
    fn update_merges_and_keeps_token() {
        let store = memory();
        let session = UserSession::load(store.clone());
        session.set_user(sample_user(), "keep-me");

        session.update_user(UserUpdate {
            avatar: Some("a.png".to_string()),
            ..Default::default()
        });

        let user = session.user().unwrap();
        assert_eq!(user.avatar.as_deref(), Some("a.png"));
        assert_eq!(user.email.as_deref(), Some("xb@example.com"));
        assert_eq!(user.username, "xiaobao");
        assert_eq!(session.token().as_deref(), Some("keep-me"));

        let reloaded = UserSession::load(store);
        assert_eq!(reloaded.user().unwrap().avatar.as_deref(), Some("a.png"));
        assert_eq!(reloaded.token().as_deref(), Some("keep-me"));
    }

    #[test]
    fn invalid_stored_user_leaves_session_unauthenticated() {
        let store = Arc::new(MemoryStorage::with_items([
            (USER_KEY, "{not valid json}"),
            (TOKEN_KEY, "stale"),
        ]));
        let session = UserSession::load(store);
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn user_without_token_is_not_logged_in() {
        let store = Arc::new(MemoryStorage::with_items([(
            USER_KEY,
            r#"{"id":1,"username":"old"}"#,
        )]));
        let session = UserSession::load(store);
        assert!(session.user().is_some());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn concurrent_writers_leave_memory_and_storage_in_agreement() {
        let store = memory();
        let session = Arc::new(UserSession::load(store.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let session = session.clone();
                std::thread::spawn(move || {
                    for round in 0..50 {
                        if (i + round) % 3 == 0 {
                            session.logout();
                        } else {
                            let name = format!("user-{i}-{round}");
                            session.set_user(User::new(i, name.clone()), format!("tok-{name}"));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let reloaded = UserSession::load(store);
        assert_eq!(reloaded.user(), session.user());
        assert_eq!(reloaded.token(), session.token());
        if let (Some(user), Some(token)) = (session.user(), session.token()) {
            assert_eq!(token, format!("tok-{}", user.username));
        }
    }

    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    #[test]
    fn storage_failures_never_escape() {
        let session = UserSession::load(Arc::new(BrokenStorage));
        assert!(!session.is_logged_in());

        session.set_user(sample_user(), "t");
        assert!(session.is_logged_in());

        session.update_user(UserUpdate {
            role: Some("admin".to_string()),
            ..Default::default()
        });
        assert_eq!(session.user().unwrap().role.as_deref(), Some("admin"));

        session.logout();
        assert!(!session.is_logged_in());
    }
}
