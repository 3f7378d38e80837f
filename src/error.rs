use reqwest::StatusCode;
use thiserror::Error;

/// 客户端统一错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 网络错误（连接失败、读取响应失败等）
    #[error("网络请求失败: {0}")]
    Network(#[source] reqwest::Error),

    /// 请求超时
    #[error("请求超时")]
    Timeout,

    /// 非 2xx 响应
    #[error("服务器返回错误状态 {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// 响应体无法解析为期望的结构
    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    /// 业务失败（success = false）
    #[error("业务处理失败: {0}")]
    Business(String),

    /// 登录成功但响应中没有令牌
    #[error("登录响应缺少令牌")]
    MissingToken,

    /// 持久化存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else {
            AppError::Network(err)
        }
    }
}

/// 键值存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("读写存储文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("存储内容序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}
