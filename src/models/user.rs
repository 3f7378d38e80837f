use serde::{Deserialize, Serialize};

/// 已登录用户资料，`"user"` 键中保存的就是它的 JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// 用户资料的部分更新，只有 `Some` 的字段会被合并
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            avatar: None,
            join_date: None,
            role: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// 合并部分更新
    pub fn merge(&mut self, update: UserUpdate) {
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if update.email.is_some() {
            self.email = update.email;
        }
        if update.avatar.is_some() {
            self.avatar = update.avatar;
        }
        if update.join_date.is_some() {
            self.join_date = update.join_date;
        }
        if update.role.is_some() {
            self.role = update.role;
        }
        if update.created_at.is_some() {
            self.created_at = update.created_at;
        }
        if update.updated_at.is_some() {
            self.updated_at = update.updated_at;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// 登录接口的 `data`：新版后端返回用户和令牌，旧版只返回用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoginPayload {
    WithToken(LoginResponse),
    User(User),
}

impl LoginPayload {
    pub fn user(&self) -> &User {
        match self {
            LoginPayload::WithToken(resp) => &resp.user,
            LoginPayload::User(user) => user,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            LoginPayload::WithToken(resp) => Some(resp.token.as_str()),
            LoginPayload::User(_) => None,
        }
    }
}
