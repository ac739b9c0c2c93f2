//! Response envelope.
//!
//! # Responsibilities
//! - Wrap every successful payload as `{code, message, data}`
//! - Shape paginated payloads as `{items, total, page, size, has_more}`
//!
//! # Design Decisions
//! - `data` is omitted entirely when absent, never `null`
//! - Success always carries code `000` and message `success`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rpc::status::CODE_OK;

/// The JSON body every route answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_OK.to_string(),
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i32,
    pub size: i32,
    pub has_more: bool,
}

impl<T> ListData<T> {
    pub fn new(items: Vec<T>, total: i64, page: i32, size: i32) -> Self {
        let has_more = i64::from(page) * i64::from(size) < total;
        Self {
            items,
            total,
            page,
            size,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let body = serde_json::to_value(ApiResponse::success(json!({"id": 1}))).unwrap();
        assert_eq!(body, json!({"code": "000", "message": "success", "data": {"id": 1}}));
    }

    #[test]
    fn test_data_omitted_when_absent() {
        let response: ApiResponse = ApiResponse {
            code: "005".into(),
            message: "user not found".into(),
            data: None,
        };
        let body = serde_json::to_value(response).unwrap();
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_has_more() {
        assert!(ListData::new(vec![1; 10], 25, 2, 10).has_more);
        assert!(!ListData::new(vec![1; 5], 25, 3, 10).has_more);
        assert!(!ListData::<i32>::new(vec![], 20, 2, 10).has_more);
        assert!(!ListData::<i32>::new(vec![], 0, 1, 10).has_more);
    }
}
