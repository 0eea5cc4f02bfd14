//! Request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use super::error::ApiError;
use super::state::AppState;
use crate::adapter::outbound::api::{IMAGE_FALLBACK, STORY_FALLBACK};
use crate::application::orchestrator::{Orchestrator, Outcome};
use crate::domain::{Panel, Prompt, Story};

/// Fallback for `/api/comic`, whose failures may come from either stage.
pub const COMIC_FALLBACK: &str = "Failed to generate comic";

/// Body shared by every generation endpoint.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct ComicResponse {
    pub panels: Vec<Panel>,
}

fn prompt_from(
    body: Result<Json<PromptRequest>, JsonRejection>,
    fallback: &str,
) -> Result<Prompt, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::from_rejection(&rejection))?;
    Prompt::from_optional(body.prompt).map_err(|e| ApiError::from_error(&e, fallback))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/story`
pub async fn generate_story(
    State(state): State<AppState>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<Story>, ApiError> {
    let prompt = prompt_from(body, STORY_FALLBACK)?;

    info!("Getting story from the text model");
    let story = state.stories.story(&prompt).await.map_err(|e| {
        error!(error = %e, "Story generation failed");
        ApiError::from_error(&e, STORY_FALLBACK)
    })?;

    Ok(Json(story))
}

/// `POST /api/generate`
pub async fn generate_image(
    State(state): State<AppState>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<ImageResponse>, ApiError> {
    let prompt = prompt_from(body, IMAGE_FALLBACK)?;

    let image_url = state.images.image(prompt.as_str()).await.map_err(|e| {
        error!(error = %e, "Image generation failed");
        ApiError::from_error(&e, IMAGE_FALLBACK)
    })?;
    info!(image_url = %image_url, "Image generated");

    Ok(Json(ImageResponse { image_url }))
}

/// `POST /api/comic`
///
/// Runs a whole generation server-side. Each request gets its own
/// orchestrator, so concurrent callers never supersede one another.
pub async fn generate_comic(
    State(state): State<AppState>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<ComicResponse>, ApiError> {
    let prompt = prompt_from(body, COMIC_FALLBACK)?;
    let orchestrator = Orchestrator::new(state.stories.clone(), state.images.clone());

    match orchestrator.generate(prompt.as_str()).await {
        Ok(Outcome::Completed(panels)) => Ok(Json(ComicResponse { panels })),
        Ok(outcome) => {
            error!(?outcome, "Generation ended without panels");
            Err(ApiError::internal(COMIC_FALLBACK))
        }
        Err(e) => {
            error!(error = %e, "Comic generation failed");
            Err(ApiError::from_error(&e, COMIC_FALLBACK))
        }
    }
}
