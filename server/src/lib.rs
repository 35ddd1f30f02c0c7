//! # Food Server
//!
//! CRUD HTTP surface over the `foods` table.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/food` | 200 array of foods | — |
//! | GET | `/food/:id` | 200 food | 404 |
//! | POST | `/food` | 201 `{message, food}` | 422 per-field errors |
//! | PUT | `/food/:id` | 200 `{message, food}` | 404, 422 |
//! | DELETE | `/food/:id` | 200 `{message}` | 404 |
//!
//! List and get are pure reads; create, update, and delete are the only
//! operations that touch the table. Validation reasons are keyed by field
//! name so the client can render them inline.
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;

use routes::{create_food, delete_food, get_food, list_foods, update_food};
use state::AppState;

/// Build the router. Separate from [`start_server`] so tests can drive it
/// directly.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/food", get(list_foods).post(create_food))
        .route(
            "/food/:id",
            get(get_food).put(update_food).delete(delete_food),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
