mod error;
mod handler;
mod model;
mod route;
mod schema;

use std::{net::SocketAddr, sync::Arc};

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use dotenv::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::route::create_router;

pub const USERS_TABLE: &str = "Users";
pub const TASKS_TABLE: &str = "Tasks";

// Struct representing the application state
pub struct AppState {
    db: aws_sdk_dynamodb::Client,
}

// Entry point of the application
#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Region and credentials come from the usual AWS environment variables.
    let shared_config = aws_config::load_from_env().await;
    let db = match std::env::var("AWS_ENDPOINT_URL") {
        Ok(endpoint) => {
            // Point at DynamoDB Local instead of the real service.
            info!("using DynamoDB endpoint {endpoint}");
            let config = aws_sdk_dynamodb::config::Builder::from(&shared_config)
                .endpoint_url(endpoint)
                .build();
            aws_sdk_dynamodb::Client::from_conf(config)
        }
        Err(_) => aws_sdk_dynamodb::Client::new(&shared_config),
    };

    // Create an Arc-wrapped instance of the application state
    let app_state = Arc::new(AppState { db });

    // Configure CORS settings for the application
    let cors = CorsLayer::new()
        .allow_origin([
            "http://127.0.0.1:5500".parse::<HeaderValue>().unwrap(),
            "http://localhost:5500".parse::<HeaderValue>().unwrap(),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    // Create the Axum application with routes and middleware
    let app = create_router(app_state).layer(cors);

    // Specify the address and port to run the server on
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Server running on http://localhost:{}", addr.port());

    // Start the Axum server
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
}
