use reqwest::Method;

use crate::client::ApiClient;
use crate::error::AppError;
use crate::models::{Topic, TopicForm, TopicQuery};
use crate::result::ApiResult;

/// 主题接口
pub struct TopicOperations;

impl TopicOperations {
    /// 分页查询主题
    pub async fn query(
        client: &ApiClient,
        params: &TopicQuery,
    ) -> Result<ApiResult<Vec<Topic>>, AppError> {
        let request = client
            .request(Method::GET, "/topic")
            .query(&params.to_pairs());
        client.send_json(request).await
    }

    /// 创建主题
    pub async fn create(client: &ApiClient, form: &TopicForm) -> Result<ApiResult<Topic>, AppError> {
        let request = client.request(Method::POST, "/topic").json(form);
        client.send_json(request).await
    }

    /// 更新主题
    pub async fn update(
        client: &ApiClient,
        id: i64,
        form: &TopicForm,
    ) -> Result<ApiResult<Topic>, AppError> {
        let request = client
            .request(Method::PUT, &format!("/topic/{}", id))
            .json(form);
        client.send_json(request).await
    }
}
