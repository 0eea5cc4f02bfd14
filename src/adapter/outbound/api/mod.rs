//! Client for this service's own HTTP API.
//!
//! Implements the orchestrator ports by calling `POST /api/story` and
//! `POST /api/generate` on a running server, the way a browser front end
//! does. Used by `comicforge generate`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{Prompt, Story, DEFAULT_PANEL_COUNT};
use crate::error::{Error, Result};
use crate::port::outbound::comic::{ImageSource, StorySource};

const PROVIDER: &str = "comicforge";

/// Fallback when a failed story response carries no `error` field.
pub const STORY_FALLBACK: &str = "Failed to generate story";

/// Fallback when a failed image response carries no `error` field.
pub const IMAGE_FALLBACK: &str = "Failed to generate image";

/// HTTP client for a comicforge server.
#[derive(Debug, Clone)]
pub struct ComicApiClient {
    client: Client,
    base_url: String,
    panel_count: usize,
}

#[derive(Serialize)]
struct PromptBody<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct ImageBody {
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl ComicApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl AsRef<str>) -> Self {
        Self {
            client,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            panel_count: DEFAULT_PANEL_COUNT,
        }
    }

    /// Number of panels a story from the server must have.
    #[must_use]
    pub fn with_panel_count(mut self, panel_count: usize) -> Self {
        self.panel_count = panel_count;
        self
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, prompt: &str, fallback: &str) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&PromptBody { prompt })
            .send()
            .await
            .map_err(|e| Error::upstream(PROVIDER, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::upstream(PROVIDER, e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            return Err(if status == StatusCode::BAD_REQUEST {
                Error::Validation(message)
            } else {
                Error::upstream(PROVIDER, message)
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::upstream_parse(PROVIDER, format!("{fallback}: {e}")))
    }
}

#[async_trait]
impl StorySource for ComicApiClient {
    async fn story(&self, prompt: &Prompt) -> Result<Story> {
        let story: Story = self.post("/api/story", prompt.as_str(), STORY_FALLBACK).await?;
        story.validate(self.panel_count, PROVIDER)?;
        Ok(story)
    }
}

#[async_trait]
impl ImageSource for ComicApiClient {
    async fn image(&self, prompt: &str) -> Result<String> {
        let body: ImageBody = self.post("/api/generate", prompt, IMAGE_FALLBACK).await?;
        body.image_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::upstream_parse(PROVIDER, "No image URL received"))
    }
}
