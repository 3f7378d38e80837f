use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 默认后端地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// 默认请求超时时间（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// 默认会话存储文件：用户配置目录下的 `quiz-client/session.json`
///
/// 找不到配置目录时退回到当前目录。
pub fn default_session_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quiz-client")
        .join("session.json")
}

/// 解析超时秒数；无法解析或为 0 时使用默认值
fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().trim_end_matches('s').parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub session_store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_store_path: default_session_store_path(),
        }
    }
}

impl Config {
    /// 从环境变量（以及 .env 文件）加载配置，缺失的项使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Config {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            request_timeout_secs: parse_timeout_secs(
                env::var("REQUEST_TIMEOUT_SECS").ok().as_deref(),
            ),
            session_store_path: env::var("SESSION_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_store_path()),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_session_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_store_path = path.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
