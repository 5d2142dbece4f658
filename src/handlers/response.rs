use serde::{Deserialize, Serialize};

use crate::services::Content;

/// JSON envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content<T>>,
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            description: "ok".to_string(),
            content: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn with_content(content: Content<T>) -> Self {
        Self {
            description: "ok".to_string(),
            content: Some(content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Couplet;

    #[test]
    fn ok_has_no_content_key() {
        let json = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "description": "ok" }));
    }

    #[test]
    fn content_is_nested() {
        let response = ApiResponse::with_content(Content {
            current_page: 1,
            total_page: 1,
            total_items: 1,
            items: Couplet {
                text: "only".into(),
            },
        });
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["description"], "ok");
        assert_eq!(json["content"]["items"]["text"], "only");
    }
}
