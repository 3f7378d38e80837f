/// 持久化存储中保存用户资料（JSON）的键
pub const USER_KEY: &str = "user";

/// 持久化存储中保存令牌（原始字符串）的键
pub const TOKEN_KEY: &str = "token";
