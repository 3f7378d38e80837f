use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// 统一的响应结构
///
/// 后端部分接口返回 `{success, errorMsg, data, total}` 信封，部分直接返回
/// JSON 或纯文本。所有接口在客户端边界都被规整为这一结构。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            error_msg: None,
            data: Some(data),
            total: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            error_msg: Some(message.to_string()),
            data: None,
            total: None,
        }
    }

    /// 业务失败转为 `AppError::Business`，成功时返回可能为空的数据
    pub fn into_result(self) -> Result<Option<T>, AppError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AppError::Business(
                self.error_msg.unwrap_or_else(|| "未知错误".to_string()),
            ))
        }
    }

    /// 同 `into_result`，但要求成功响应必须带数据
    pub fn into_data(self) -> Result<T, AppError> {
        self.into_result()?
            .ok_or_else(|| AppError::Business("响应缺少数据".to_string()))
    }
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// 将 JSON 响应体规整为统一结构
    ///
    /// 带 `success` 布尔字段的对象按信封解析，其余内容视为成功响应的 `data`。
    pub fn from_json(body: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, AppError> {
        if is_envelope(&value) {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(Self::success(serde_json::from_value(value)?))
        }
    }
}

impl ApiResult<String> {
    /// 纯文本响应视为成功
    pub fn from_text(text: String) -> Self {
        Self::success(text)
    }
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("success"))
        .is_some_and(Value::is_boolean)
}
