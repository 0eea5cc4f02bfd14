//! HTTP API.
//!
//! | Method | Path            | Body         | Success                         |
//! |--------|-----------------|--------------|---------------------------------|
//! | GET    | `/health`       |              | `{ status, version, timestamp }`|
//! | POST   | `/api/story`    | `{ prompt }` | `{ comics: [{prompt, caption}] }`|
//! | POST   | `/api/generate` | `{ prompt }` | `{ imageUrl }`                  |
//! | POST   | `/api/comic`    | `{ prompt }` | `{ panels: [{caption, imageUrl}] }`|
//!
//! Failures are `{ error }` with 400 for a missing prompt or malformed body
//! and 500 for provider failures.

pub mod error;
pub mod handlers;
pub mod state;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;

pub use error::ApiError;
pub use state::AppState;

/// Build the router with all routes and layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/story", post(handlers::generate_story))
        .route("/api/generate", post(handlers::generate_image))
        .route("/api/comic", post(handlers::generate_comic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(url = %format!("http://{addr}"), "Server ready");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
