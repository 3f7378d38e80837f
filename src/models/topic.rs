use serde::{Deserialize, Serialize};

/// 题目主题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<i32>,
    #[serde(default)]
    pub question_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// 主题分页查询参数，未设置的参数不会出现在查询串中
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub name: Option<String>,
}

impl TopicQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size.filter(|s| *s > 0) {
            pairs.push(("size", size.to_string()));
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            pairs.push(("name", name.to_string()));
        }
        pairs
    }
}

/// 创建/更新主题表单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(TopicQuery::default().to_pairs().is_empty());
    }

    #[test]
    fn zero_and_empty_values_are_skipped() {
        let query = TopicQuery {
            page: Some(0),
            size: Some(20),
            name: Some(String::new()),
        };
        assert_eq!(query.to_pairs(), vec![("size", "20".to_string())]);
    }

    #[test]
    fn form_serializes_camel_case() {
        let form = TopicForm {
            name: "Rust 基础".to_string(),
            description: None,
            difficulty: Some(2),
            question_count: Some(30),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["questionCount"], 30);
        assert!(json.get("description").is_none());
    }
}
