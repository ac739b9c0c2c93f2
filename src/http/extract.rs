//! Request input parsing.
//!
//! All input errors surface as code 003 (or 016 for a missing token) and are
//! rejected before any backend is touched.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::http::error::ApiError;

pub const INVALID_BODY: &str = "invalid request body";
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// JSON request body; any read or decode failure is a 003.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_request(INVALID_BODY))?;
        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|_| ApiError::bad_request(INVALID_BODY))
    }
}

/// Token from `Authorization: Bearer <token>`. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Parse a path id, naming the entity in the error (`invalid user id`).
pub fn parse_id(raw: &str, entity: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("invalid {} id", entity)))
}

/// Integer query parameter; missing or unparsable values read as 0.
pub fn query_int(query: &HashMap<String, String>, key: &str) -> i32 {
    query.get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Requested page, with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i32,
    pub page_size: i32,
}

impl Pagination {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let page = query_int(query, "page");
        let page_size = query_int(query, "page_size");
        Self {
            page: if page < 1 { 1 } else { page },
            page_size: if page_size < 1 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }
}
