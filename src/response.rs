//! Uniform JSON envelope shared by every endpoint.
//!
//! Successful responses are `{"success": true, "data": ...}`; failures are
//! produced by [`crate::errors::ApiError`] and carry `success: false` plus an
//! `error` message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(json!({"name": "Стартер"}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["name"], json!("Стартер"));
        assert!(value.get("error").is_none(), "error must be omitted on success");
    }

    #[test]
    fn test_success_envelope_with_list() {
        let response = ApiResponse::success(vec![1, 2, 3]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"], json!([1, 2, 3]));
    }
}
