//! Text-to-image generation port.

use async_trait::async_trait;

use crate::error::Result;

/// Client for an image-generation provider.
///
/// Generation parameters (steps, guidance, model variant) are fixed per
/// client; only the prompt varies between calls.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Generate images for `prompt` and return their URLs in provider order.
    async fn generate(&self, prompt: &str) -> Result<Vec<String>>;
}
