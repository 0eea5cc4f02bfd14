//! Composition root: build the services from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::inbound::http::AppState;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::adapter::outbound::replicate::Replicate;
use crate::application::image::Illustrator;
use crate::application::story::StoryWriter;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::image::ImageModel;
use crate::port::outbound::llm::Llm;

/// Build the text-model client.
///
/// A missing API key is logged, not fatal: story calls will fail with an
/// authentication error until the key is provided.
pub fn build_llm_client(config: &Config) -> Result<Arc<dyn Llm>> {
    let client = OpenAi::from_config(&config.llm)?;
    if !client.has_api_key() {
        warn!(
            env = %config.llm.api_key_env,
            "Text model API key not set, story requests will fail"
        );
    }
    info!(provider = client.name(), model = %config.llm.model, "LLM client initialized");
    Ok(Arc::new(client))
}

/// Build the image-model client. Same missing-key policy as [`build_llm_client`].
pub fn build_image_model(config: &Config) -> Result<Arc<dyn ImageModel>> {
    let client = Replicate::from_config(&config.image)?;
    if !client.has_api_token() {
        warn!(
            env = %config.image.api_key_env,
            "Image model API token not set, image requests will fail"
        );
    }
    info!(provider = client.name(), model = %config.image.model, "Image client initialized");
    Ok(Arc::new(client))
}

/// Wire the story writer and illustrator into handler state.
pub fn build_app_state(config: &Config) -> Result<AppState> {
    let stories = StoryWriter::new(build_llm_client(config)?, config.story.clone());
    let images = Illustrator::new(build_image_model(config)?);
    Ok(AppState::new(Arc::new(stories), Arc::new(images)))
}
