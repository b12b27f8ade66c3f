use lambda_http::{Body, Response};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn into_response(self) -> Response<Body> {
        // The Unauthorized detail and internal causes stay in the
        // logs; the wire carries a constant message.
        let (status, message) = match &self {
            ApiError::NotFound => (404, "Not found".to_string()),
            ApiError::BadRequest(msg) => (400, format!("Bad request: {msg}")),
            ApiError::Unauthorized(_) => (401, "Unauthorized".to_string()),
            ApiError::Internal(_) => (500, "Internal server error".to_string()),
        };

        let body = serde_json::json!({ "error": message }).to_string();

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("Invalid JSON: {e}"))
    }
}

impl From<todo_domain::DomainError> for ApiError {
    fn from(e: todo_domain::DomainError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
