use axum::{
    extract::{Form, FromRequest},
    http::{header::CONTENT_TYPE, Request},
    Json,
};

use crate::error::ApiError;

// Struct representing the request body for registering or logging in
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CredentialsSchema {
    pub username: Option<String>,
    pub password: Option<String>,
}

// Struct representing the request body for creating a new task
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CreateTaskSchema {
    pub username: Option<String>,
    #[serde(rename = "taskId")]
    pub task_id: Option<String>,
    pub task: Option<String>,
}

// Struct representing the request body for toggling a task's completed flag
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UpdateTaskSchema {
    pub completed: Option<bool>,
}

impl CredentialsSchema {
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        match (required(&self.username), required(&self.password)) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::Validation("Username and password required")),
        }
    }
}

impl CreateTaskSchema {
    pub fn validate(&self) -> Result<(&str, &str, &str), ApiError> {
        match (
            required(&self.username),
            required(&self.task_id),
            required(&self.task),
        ) {
            (Some(username), Some(task_id), Some(task)) => Ok((username, task_id, task)),
            _ => Err(ApiError::Validation("username, taskId, and task required")),
        }
    }
}

impl UpdateTaskSchema {
    pub fn validate(&self) -> Result<bool, ApiError> {
        self.completed
            .ok_or(ApiError::Validation("completed required"))
    }
}

// An empty string fails the presence check, the same way the original
// client-facing API treated falsy fields.
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

// Extractor accepting a JSON or form-urlencoded request body. Yields `None`
// when the body is absent or unparseable so handlers can answer with the
// "Request body missing" validation error instead of the framework's
// default rejection.
pub struct JsonOrForm<T>(pub Option<T>);

#[axum::async_trait]
impl<S, B, T> FromRequest<S, B> for JsonOrForm<T>
where
    S: Send + Sync,
    B: Send + 'static,
    Json<T>: FromRequest<S, B>,
    Form<T>: FromRequest<S, B>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let body = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .ok()
                .map(|Form(value)| value)
        } else {
            Json::<T>::from_request(req, state)
                .await
                .ok()
                .map(|Json(value)| value)
        };

        Ok(Self(body))
    }
}
