//! Read-only HTTP API over the exam question bank.
//!
//! Serves paginated question listings and the duplicate-candidate report from a
//! CBOR snapshot that the admin tool writes. The snapshot is polled and swapped
//! in when it changes on disk.
//!
//! # Endpoints
//! - `GET /api/questions?cursor&limit&topic&difficulty&status`
//! - `GET /api/questions/{id}`
//! - `GET /api/admin/duplicates`
//! - `GET /health`
//!
//! # Configuration
//! | variable | default |
//! |---|---|
//! | `EXAM_API_PORT` | `8080` |
//! | `EXAM_SNAPSHOT_PATH` | `data/questions.cbor` |
//! | `EXAM_DUPLICATE_THRESHOLD` | `40` |
//! | `EXAM_DUPLICATE_SCAN_CAP` | `200` |
//! | `EXAM_RELOAD_SECS` | `60` |
//!
//! Logging follows `RUST_LOG`.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};

use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{duplicates_handler, get_question, health_handler, list_questions};
use state::{spawn_reloader, AppState};

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/questions", get(list_questions))
        .route("/api/questions/{id}", get(get_question))
        .route("/api/admin/duplicates", get(duplicates_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let config = Config::load()?;
    let state = AppState::load(config).await?;
    let _reloader = spawn_reloader(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
