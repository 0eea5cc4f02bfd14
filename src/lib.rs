//! Comicforge - three-panel comics from a one-line prompt.
//!
//! A prompt such as "in outer space" goes to a text model, which writes a
//! three-panel story about a fixed character. Each panel's image prompt then
//! goes to an image model, all panels at once, and the finished comic comes
//! back as captions paired with image URLs.
//!
//! # Architecture
//!
//! - [`domain`] - Prompts, stories, panels and the generation state machine
//! - [`port`] - Traits the application depends on (`Llm`, `ImageModel`,
//!   `StorySource`, `ImageSource`)
//! - [`application`] - Story writing, illustration and the orchestrator that
//!   sequences them
//! - [`adapter`] - OpenAI-compatible and Replicate clients, the HTTP API
//!   client, the axum server and the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use comicforge::infrastructure::bootstrap::build_app_state;
//! use comicforge::infrastructure::config::settings::Config;
//!
//! # async fn run() -> comicforge::error::Result<()> {
//! let config = Config::load_or_default("comicforge.toml")?;
//! let state = build_app_state(&config)?;
//! let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
//! comicforge::adapter::inbound::http::serve(listener, state, std::future::pending()).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
