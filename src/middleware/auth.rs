use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

use crate::session::UserSession;

/// 请求拦截：会话中有令牌时注入 `Authorization` 头，没有令牌时原样放行
pub fn attach_token(request: RequestBuilder, session: &UserSession) -> RequestBuilder {
    match session.token() {
        Some(token) => request.header(AUTHORIZATION, token),
        None => request,
    }
}
