use reqwest::Method;

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::ChatForm;
use crate::result::ApiResult;

/// AI 助手接口
pub struct AiOperations;

impl AiOperations {
    /// 获取 AI 回答，响应是一次性读取的纯文本
    pub async fn chat(client: &ApiClient, form: &ChatForm) -> Result<ApiResult<String>, AppError> {
        let request = client.request(Method::POST, "/xiaobao/chat").json(form);
        client.send_text(request).await
    }
}
