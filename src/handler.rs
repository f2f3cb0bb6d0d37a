use std::sync::Arc;

use aws_sdk_dynamodb::{error::ProvideErrorMetadata, types::AttributeValue};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    model::{Task, User},
    schema::{CreateTaskSchema, CredentialsSchema, JsonOrForm, UpdateTaskSchema},
    AppState, TASKS_TABLE, USERS_TABLE,
};

// Handler for registering a new user
pub async fn register_user_handler(
    State(data): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<CredentialsSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.ok_or(ApiError::Validation("Request body missing"))?;
    let (username, password) = body.validate()?;
    let username = username.to_owned();
    let password = password.to_owned();

    // Hashing is CPU-bound, so it runs off the async runtime's worker threads.
    let hashed_password =
        tokio::task::spawn_blocking(move || password_auth::generate_hash(password))
            .await
            .map_err(|err| {
                error!(error = ?err, "register error");
                ApiError::Internal("Internal server error")
            })?;

    let result = data
        .db
        .put_item()
        .table_name(USERS_TABLE)
        .item("username", AttributeValue::S(username.clone()))
        .item("password", AttributeValue::S(hashed_password))
        .condition_expression("attribute_not_exists(username)")
        .send()
        .await;

    if let Err(err) = result {
        error!(error = ?err, "register error");
        return Err(match err.code() {
            Some("ConditionalCheckFailedException") => ApiError::DuplicateUsername,
            Some("AccessDeniedException") => ApiError::AccessDenied,
            _ => ApiError::Internal("Internal server error"),
        });
    }

    info!("User '{username}' registered successfully");

    let json_response = json!({
        "success": true,
        "message": "User registered"
    });
    Ok(Json(json_response))
}

// Handler for logging in an existing user
pub async fn login_user_handler(
    State(data): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<CredentialsSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.ok_or(ApiError::Validation("Request body missing"))?;
    let (username, password) = body.validate()?;

    let output = data
        .db
        .get_item()
        .table_name(USERS_TABLE)
        .key("username", AttributeValue::S(username.to_owned()))
        .send()
        .await
        .map_err(|err| {
            error!(error = ?err, "login error");
            ApiError::Internal("Login failed")
        })?;

    let item = output.item().ok_or(ApiError::UserNotFound)?;
    let user = User::from_item(item).ok_or(ApiError::Internal("Login failed"))?;

    let password = password.to_owned();
    let verified =
        tokio::task::spawn_blocking(move || {
            password_auth::verify_password(password, &user.password).is_ok()
        })
        .await
        .map_err(|err| {
            error!(error = ?err, "login error");
            ApiError::Internal("Login failed")
        })?;

    if !verified {
        return Err(ApiError::InvalidPassword);
    }

    let json_response = json!({
        "success": true,
        "message": "Login successful"
    });
    Ok(Json(json_response))
}

// Handler for fetching all of a user's tasks
pub async fn get_tasks_handler(
    State(data): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let output = data
        .db
        .query()
        .table_name(TASKS_TABLE)
        .key_condition_expression("username = :username")
        .expression_attribute_values(":username", AttributeValue::S(username))
        .send()
        .await
        .map_err(|err| {
            error!(error = ?err, "tasks fetch error");
            ApiError::Internal("Could not fetch tasks")
        })?;

    let tasks: Vec<Task> = output.items().iter().map(Task::from_item).collect();

    Ok(Json(tasks))
}

// Handler for adding a new task
pub async fn create_task_handler(
    State(data): State<Arc<AppState>>,
    JsonOrForm(body): JsonOrForm<CreateTaskSchema>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.ok_or(ApiError::Validation("Request body missing"))?;
    let (username, task_id, task) = body.validate()?;

    data
        .db
        .put_item()
        .table_name(TASKS_TABLE)
        .item("username", AttributeValue::S(username.to_owned()))
        .item("taskId", AttributeValue::S(task_id.to_owned()))
        .item("task", AttributeValue::S(task.to_owned()))
        .send()
        .await
        .map_err(|err| {
            error!(error = ?err, "add task error");
            ApiError::Internal("Could not add task")
        })?;

    Ok(Json(json!({ "success": true, "message": "Task added" })))
}

// Handler for toggling a task's completed flag
pub async fn toggle_task_handler(
    State(data): State<Arc<AppState>>,
    Path((username, task_id)): Path<(String, String)>,
    JsonOrForm(body): JsonOrForm<UpdateTaskSchema>,
) -> Result<impl IntoResponse, ApiError> {
    if username.is_empty() || task_id.is_empty() {
        return Err(ApiError::Validation("Username and taskId required"));
    }
    let body = body.ok_or(ApiError::Validation("Request body missing"))?;
    let completed = body.validate()?;

    let result = data
        .db
        .update_item()
        .table_name(TASKS_TABLE)
        .key("username", AttributeValue::S(username))
        .key("taskId", AttributeValue::S(task_id))
        .update_expression("SET #completed = :completed")
        .expression_attribute_names("#completed", "completed")
        .expression_attribute_values(":completed", AttributeValue::Bool(completed))
        // The update must not create a task that was never added.
        .condition_expression("attribute_exists(username)")
        .send()
        .await;

    if let Err(err) = result {
        if err.code() == Some("ConditionalCheckFailedException") {
            return Err(ApiError::TaskNotFound);
        }
        error!(error = ?err, "toggle task error");
        return Err(ApiError::Internal("Could not update task"));
    }

    Ok(Json(json!({ "success": true, "message": "Task updated" })))
}

// Handler for deleting a task
pub async fn delete_task_handler(
    State(data): State<Arc<AppState>>,
    Path((username, task_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    if username.is_empty() || task_id.is_empty() {
        return Err(ApiError::Validation("Username and taskId required"));
    }

    data
        .db
        .delete_item()
        .table_name(TASKS_TABLE)
        .key("username", AttributeValue::S(username))
        .key("taskId", AttributeValue::S(task_id))
        .send()
        .await
        .map_err(|err| {
            error!(error = ?err, "delete task error");
            ApiError::Internal("Could not delete task")
        })?;

    Ok(Json(json!({ "success": true, "message": "Task deleted" })))
}
