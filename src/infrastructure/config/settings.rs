//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; provider credentials are only
//! ever read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use comicforge::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("comicforge.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::image::ImageConfig;
use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::adapter::outbound::replicate::ModelRef;
use crate::application::story::StoryConfig;
use crate::error::{ConfigError, Result};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "comicforge.toml";

/// Main application configuration.
///
/// Every section is optional; a missing section takes its defaults, which
/// reproduce the stock deployment (GitHub Models `gpt-4o` for the story,
/// the Bubble fine-tune on Replicate for images).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listen address.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Text-model provider for the story writer.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Character and shape of the generated story.
    #[serde(default)]
    pub story: StoryConfig,

    /// Image-model provider and fixed generation parameters.
    #[serde(default)]
    pub image: ImageConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        require_url("llm.base_url", &self.llm.base_url)?;
        require_non_empty("llm.model", &self.llm.model)?;
        require_non_empty("llm.api_key_env", &self.llm.api_key_env)?;

        require_non_empty("story.premise", &self.story.premise)?;
        require_non_empty("story.character_name", &self.story.character_name)?;
        require_non_empty("story.subject_token", &self.story.subject_token)?;
        require_non_empty("story.style_suffix", &self.story.style_suffix)?;
        if self.story.panel_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "story.panel_count",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        require_url("image.base_url", &self.image.base_url)?;
        require_non_empty("image.model", &self.image.model)?;
        ModelRef::parse(&self.image.model)?;
        require_non_empty("image.variant", &self.image.variant)?;
        require_non_empty("image.api_key_env", &self.image.api_key_env)?;
        if self.image.num_inference_steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "image.num_inference_steps",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(self.image.guidance_scale > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "image.guidance_scale",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.image.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "image.poll_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        require_non_empty("server.host", &self.server.host)?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Ok(())
}

fn require_url(field: &'static str, value: &str) -> Result<()> {
    require_non_empty(field, value)?;
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }
        .into());
    }
    Ok(())
}
