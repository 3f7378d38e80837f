use std::sync::Arc;

use config::Config;

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod result;
pub mod router;
pub mod session;

use cache::{FileStorage, KeyValueStore};
use client::ApiClient;
use error::AppError;
use router::{RouteGuard, RouteTable};
use session::UserSession;

/// 应用上下文：启动时创建一次，显式传给需要会话、客户端或守卫的地方
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub session: Arc<UserSession>,
    pub client: ApiClient,
    pub guard: RouteGuard,
}

impl AppContext {
    /// 使用配置中的会话文件初始化
    pub fn init(config: Config) -> Result<Self, AppError> {
        let store = FileStorage::open(&config.session_store_path)?;
        Self::with_store(config, Arc::new(store))
    }

    /// 使用指定的键值存储初始化
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let session = Arc::new(UserSession::load(store));
        let client = ApiClient::new(&config, session.clone())?;
        let guard = RouteGuard::new(RouteTable::default(), session.clone());
        Ok(Self {
            config,
            session,
            client,
            guard,
        })
    }

    /// 退出登录
    pub fn sign_out(&self) {
        self.session.logout();
        tracing::info!("Signed out");
    }
}
