use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::{attach_token, log_errors, read_body};
use crate::result::ApiResult;
use crate::session::UserSession;

/// 后端 HTTP 客户端
///
/// 只负责拼接地址、注入令牌、记录错误；响应原样交给调用方解释。
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<UserSession>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<UserSession>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<UserSession> {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 创建请求，已带上当前令牌
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        attach_token(self.http.request(method, self.url(path)), &self.session)
    }

    /// 发送请求，2xx 响应原样返回
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let (client, request) = request.build_split();
        let request = request.map_err(|e| {
            tracing::error!("Failed to build request: {}", e);
            AppError::from(e)
        })?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        tracing::debug!("{} {}", method, url);

        log_errors(&method, &url, client.execute(request).await).await
    }

    /// 发送请求并把 JSON 响应规整为 `ApiResult`
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResult<T>, AppError> {
        let body = read_body(self.send(request).await?).await?;
        ApiResult::from_json(&body)
    }

    /// 发送请求并把纯文本响应规整为 `ApiResult`
    pub async fn send_text(&self, request: RequestBuilder) -> Result<ApiResult<String>, AppError> {
        let body = read_body(self.send(request).await?).await?;
        Ok(ApiResult::<String>::from_text(body))
    }
}
