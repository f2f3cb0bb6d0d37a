use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handler::*, AppState};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route("/register", post(register_user_handler))
        .route("/login", post(login_user_handler))
        .route("/tasks", post(create_task_handler))
        .route("/tasks/:username", get(get_tasks_handler))
        .route(
            "/tasks/:username/:task_id",
            put(toggle_task_handler).delete(delete_task_handler),
        )
        .with_state(app_state);
    app
}
