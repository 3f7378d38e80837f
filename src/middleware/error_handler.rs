use reqwest::Response;
use tracing::error;

use crate::error::AppError;

/// 响应拦截：2xx 响应原样返回，网络错误和非 2xx 响应记录日志后转为 `AppError`
pub async fn log_errors(
    method: &str,
    url: &str,
    result: Result<Response, reqwest::Error>,
) -> Result<Response, AppError> {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed - {} {}: {}", method, url, e);
            return Err(e.into());
        }
    };

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read error response body: {}", e);
            String::new()
        }
    };

    error!(
        "Response error - {} {} - Status: {}, Body: {}",
        method, url, status, body
    );

    Err(AppError::Status { status, body })
}

/// 读取响应体，失败时记录日志
pub async fn read_body(response: Response) -> Result<String, AppError> {
    let url = response.url().to_string();
    response.text().await.map_err(|e| {
        error!("Failed to read response body - {}: {}", url, e);
        e.into()
    })
}
