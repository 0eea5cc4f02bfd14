//! Replicate predictions client.
//!
//! Creates a prediction with `Prefer: wait` so fast models answer in the
//! create call, then polls the prediction's `get` URL until it reaches a
//! terminal status. No retries: any transport error or failed prediction is
//! returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};

use super::dto::{
    ApiErrorBody, CreatePrediction, Prediction, PredictionInput, PredictionStatus,
};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::image::ImageConfig;
use crate::port::outbound::image::ImageModel;

const PROVIDER: &str = "replicate";

/// A model reference, `owner/name` optionally pinned to `:version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub owner: String,
    pub name: String,
    pub version: Option<String>,
}

impl ModelRef {
    /// Parse `owner/name[:version]`.
    ///
    /// # Errors
    ///
    /// Returns a config error when the owner or name is missing.
    pub fn parse(reference: &str) -> Result<Self> {
        let (path, version) = match reference.split_once(':') {
            Some((path, version)) => (path, Some(version.to_string())),
            None => (reference, None),
        };
        let invalid = || ConfigError::InvalidValue {
            field: "image.model",
            reason: format!("'{reference}' is not owner/name[:version]"),
        };
        let (owner, name) = path.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || version.as_deref() == Some("") {
            return Err(invalid().into());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            version,
        })
    }
}

/// Fixed generation parameters sent with every prediction.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub variant: String,
}

/// Replicate API client bound to one model.
#[derive(Debug)]
pub struct Replicate {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    api_token_env: String,
    model: ModelRef,
    params: GenerationParams,
    poll_interval: Duration,
}

impl Replicate {
    #[must_use]
    pub fn new(
        client: Client,
        base_url: &str,
        api_token: Option<String>,
        api_token_env: impl Into<String>,
        model: ModelRef,
        params: GenerationParams,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            api_token_env: api_token_env.into(),
            model,
            params,
            poll_interval,
        }
    }

    /// Create a client from configuration, reading the token from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the model reference is malformed or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &ImageConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::upstream(PROVIDER, e.to_string()))?;
        let api_token = std::env::var(&config.api_key_env)
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self::new(
            client,
            &config.base_url,
            api_token,
            &config.api_key_env,
            ModelRef::parse(&config.model)?,
            GenerationParams {
                num_inference_steps: config.num_inference_steps,
                guidance_scale: config.guidance_scale,
                variant: config.variant.clone(),
            },
            Duration::from_millis(config.poll_interval_ms),
        ))
    }

    #[must_use]
    pub fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }

    fn token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            Error::upstream(
                PROVIDER,
                format!("authentication failed: {} is not set", self.api_token_env),
            )
        })
    }

    fn create_url(&self) -> String {
        match self.model.version {
            Some(_) => format!("{}/v1/predictions", self.base_url),
            None => format!(
                "{}/v1/models/{}/{}/predictions",
                self.base_url, self.model.owner, self.model.name
            ),
        }
    }

    async fn create(&self, token: &str, prompt: &str) -> Result<Prediction> {
        let body = CreatePrediction {
            version: self.model.version.as_deref(),
            input: PredictionInput {
                prompt,
                num_inference_steps: self.params.num_inference_steps,
                guidance_scale: self.params.guidance_scale,
                model: &self.params.variant,
            },
        };

        let response = self
            .client
            .post(self.create_url())
            .bearer_auth(token)
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::upstream(PROVIDER, e.to_string()))?;

        read_prediction(response).await
    }

    async fn fetch(&self, token: &str, url: &str) -> Result<Prediction> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::upstream(PROVIDER, e.to_string()))?;

        read_prediction(response).await
    }
}

#[async_trait]
impl ImageModel for Replicate {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn generate(&self, prompt: &str) -> Result<Vec<String>> {
        let token = self.token()?;
        let mut prediction = self.create(token, prompt).await?;
        info!(prediction = %prediction.id, status = ?prediction.status, "Prediction created");

        while !prediction.status.is_terminal() {
            let url = prediction
                .urls
                .as_ref()
                .map(|urls| urls.get.clone())
                .ok_or_else(|| {
                    Error::upstream_parse(PROVIDER, "Pending prediction has no status URL")
                })?;
            tokio::time::sleep(self.poll_interval).await;
            prediction = self.fetch(token, &url).await?;
        }

        if prediction.status != PredictionStatus::Succeeded {
            let message = prediction.error_message().unwrap_or_else(|| {
                format!("Prediction {} ended with status {:?}", prediction.id, prediction.status)
            });
            return Err(Error::upstream(PROVIDER, message));
        }

        let urls = prediction
            .output
            .map(|output| output.into_urls())
            .unwrap_or_default();
        debug!(prediction = %prediction.id, outputs = urls.len(), "Prediction succeeded");
        Ok(urls)
    }
}

async fn read_prediction(response: Response) -> Result<Prediction> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::upstream(PROVIDER, e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|err| err.detail.or(err.title))
            .unwrap_or_else(|| format!("{PROVIDER} request failed with status {status}"));
        return Err(Error::upstream(PROVIDER, message));
    }

    serde_json::from_str(&body)
        .map_err(|e| Error::upstream_parse(PROVIDER, format!("Invalid prediction response: {e}")))
}
