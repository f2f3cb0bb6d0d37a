use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Every handler failure funnels into this enum; the Display string is the
// public message and nothing else about the underlying failure reaches the
// client.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Access denied to DynamoDB. Check IAM policy.")]
    AccessDenied,

    // Any other store or runtime failure, carrying the route's fixed
    // public message.
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateUsername
            | ApiError::UserNotFound
            | ApiError::TaskNotFound => StatusCode::BAD_REQUEST,
            ApiError::InvalidPassword => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
