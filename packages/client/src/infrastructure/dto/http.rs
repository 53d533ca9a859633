//! HTTP registration DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::UserDto;

/// Request body for `POST /new-user`
#[derive(Debug, Clone, Serialize)]
pub struct NewUserRequest {
    pub name: String,
}

/// Response body for `POST /new-user`.
///
/// Failures carry a human-readable `message` instead of a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserResponse {
    pub status: String,
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_response_success() {
        // テスト項目: 成功レスポンスがパースされる
        // given (前提条件):
        let raw = r#"{"status":"ok","user":{"id":"1","name":"alice"}}"#;

        // when (操作):
        let response: NewUserResponse = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(response.status, "ok");
        assert_eq!(response.user.unwrap().name, "alice");
        assert!(response.message.is_none());
    }

    #[test]
    fn test_new_user_response_failure() {
        // テスト項目: 失敗レスポンスは message を運ぶ
        // given (前提条件):
        let raw = r#"{"status":"error","message":"This name is already taken"}"#;

        // when (操作):
        let response: NewUserResponse = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        assert_eq!(response.status, "error");
        assert!(response.user.is_none());
        assert_eq!(response.message.as_deref(), Some("This name is already taken"));
    }

    #[test]
    fn test_new_user_request_shape() {
        // テスト項目: リクエストボディは name フィールドだけを持つ
        // given (前提条件):
        let request = NewUserRequest {
            name: "alice".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&request).unwrap();

        // then (期待する結果):
        assert_eq!(value, serde_json::json!({"name": "alice"}));
    }
}
