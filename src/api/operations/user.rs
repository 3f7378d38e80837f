use reqwest::Method;

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::{LoginForm, LoginPayload, RegisterForm, User};
use crate::result::ApiResult;

/// 用户接口
pub struct UserOperations;

impl UserOperations {
    pub async fn login(
        client: &ApiClient,
        form: &LoginForm,
    ) -> Result<ApiResult<LoginPayload>, AppError> {
        let request = client.request(Method::POST, "/user/login").json(form);
        client.send_json(request).await
    }

    pub async fn register(client: &ApiClient, form: &RegisterForm) -> Result<ApiResult<User>, AppError> {
        let request = client.request(Method::POST, "/user/register").json(form);
        client.send_json(request).await
    }

    /// 登录并保存会话
    ///
    /// 业务失败或响应中没有令牌时返回错误，会话保持不变。
    pub async fn sign_in(client: &ApiClient, form: &LoginForm) -> Result<User, AppError> {
        let payload = Self::login(client, form).await?.into_data()?;
        let LoginPayload::WithToken(resp) = payload else {
            tracing::warn!("Login for {} returned no token", form.username);
            return Err(AppError::MissingToken);
        };

        tracing::info!("User {} signed in", resp.user.username);
        client.session().set_user(resp.user.clone(), resp.token);
        Ok(resp.user)
    }
}
