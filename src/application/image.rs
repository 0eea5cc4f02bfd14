//! Illustrator: one image URL per panel prompt.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::port::outbound::comic::ImageSource;
use crate::port::outbound::image::ImageModel;

/// Wraps an [`ImageModel`] and keeps only the first image it returns.
pub struct Illustrator {
    model: Arc<dyn ImageModel>,
}

impl Illustrator {
    pub fn new(model: Arc<dyn ImageModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl ImageSource for Illustrator {
    async fn image(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::prompt_required());
        }

        info!(provider = self.model.name(), "Starting image generation");
        let urls = self.model.generate(prompt).await?;
        debug!(count = urls.len(), "Image model returned outputs");

        urls.into_iter()
            .next()
            .ok_or_else(|| Error::upstream_parse(self.model.name(), "Image model returned no images"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::fake::ScriptedImageModel;

    #[tokio::test]
    async fn returns_first_url() {
        let model = ScriptedImageModel::returning(vec![
            "https://replicate.delivery/a.webp".into(),
            "https://replicate.delivery/b.webp".into(),
        ]);
        let illustrator = Illustrator::new(Arc::new(model));

        let url = illustrator.image("Bubble white dog, warm colors").await.unwrap();
        assert_eq!(url, "https://replicate.delivery/a.webp");
    }

    #[tokio::test]
    async fn blank_prompt_never_calls_provider() {
        let model = Arc::new(ScriptedImageModel::returning(vec!["u".into()]));
        let illustrator = Illustrator::new(model.clone());

        let err = illustrator.image("  ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_output_is_parse_error() {
        let illustrator = Illustrator::new(Arc::new(ScriptedImageModel::returning(vec![])));
        let err = illustrator.image("p").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamParse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn provider_failure_passes_through() {
        let illustrator =
            Illustrator::new(Arc::new(ScriptedImageModel::failing("invalid version")));
        let err = illustrator.image("p").await.unwrap_err();
        assert_eq!(err.to_string(), "invalid version");
    }
}
