use reqwest::Method;

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::{Question, QuestionCategory, QuestionOption};
use crate::result::ApiResult;

/// 题库接口
///
/// 这些接口直接返回 JSON 数据而不是信封，由 `ApiResult::from_json` 统一包装。
pub struct QuestionOperations;

impl QuestionOperations {
    /// 题库分类
    pub async fn categories(client: &ApiClient) -> Result<ApiResult<Vec<QuestionCategory>>, AppError> {
        let request = client.request(Method::GET, "/question/categories");
        client.send_json(request).await
    }

    /// 根据分类获取题目
    pub async fn list_by_category(
        client: &ApiClient,
        category_id: i64,
    ) -> Result<ApiResult<Vec<Question>>, AppError> {
        let request = client
            .request(Method::GET, "/question/list")
            .query(&[("categoryId", category_id)]);
        client.send_json(request).await
    }

    /// 题目详情
    pub async fn detail(client: &ApiClient, question_id: i64) -> Result<ApiResult<Question>, AppError> {
        let request = client.request(Method::GET, &format!("/question/{}", question_id));
        client.send_json(request).await
    }

    /// 题目选项
    pub async fn options(
        client: &ApiClient,
        question_id: i64,
    ) -> Result<ApiResult<Vec<QuestionOption>>, AppError> {
        let request = client.request(Method::GET, &format!("/question/detail/{}", question_id));
        client.send_json(request).await
    }
}
