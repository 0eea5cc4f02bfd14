//! Ports the orchestrator drives.
//!
//! The server implements them in-process with the story writer and the
//! illustrator; the CLI implements them as a client of the HTTP endpoints.

use async_trait::async_trait;

use crate::domain::{Prompt, Story};
use crate::error::Result;

/// Produces a story for a user prompt.
#[async_trait]
pub trait StorySource: Send + Sync {
    async fn story(&self, prompt: &Prompt) -> Result<Story>;
}

/// Produces one image URL for a panel prompt.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn image(&self, prompt: &str) -> Result<String>;
}
