// 后端接口封装
// 每个函数对应一次 HTTP 调用，响应统一规整为 ApiResult

pub mod operations;

pub use operations::{AiOperations, QuestionOperations, TopicOperations, UserOperations};
