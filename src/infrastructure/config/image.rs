//! Image-model provider configuration.

use serde::Deserialize;

/// Replicate model and generation parameters.
///
/// These are fixed for a deployment: every panel of every comic is rendered
/// with the same model, step count and guidance. The API token is read from
/// the environment variable named by `api_key_env`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Replicate API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model reference, `owner/name` or `owner/name:version`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Number of denoising steps.
    #[serde(default = "default_num_inference_steps")]
    pub num_inference_steps: u32,

    /// Classifier-free guidance scale.
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f64,

    /// Model variant passed as the `model` input (`dev` or `schnell`).
    #[serde(default = "default_variant")]
    pub variant: String,

    /// Delay between status polls while a prediction is running.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Environment variable holding the API token.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Client-side request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            num_inference_steps: default_num_inference_steps(),
            guidance_scale: default_guidance_scale(),
            variant: default_variant(),
            poll_interval_ms: default_poll_interval_ms(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.replicate.com".into()
}

fn default_model() -> String {
    "sundai-club/flux-bubbledog:8d89b1684eb74993c2680754707367f1472401722508d0a12df081364006c51f"
        .into()
}

const fn default_num_inference_steps() -> u32 {
    28
}

const fn default_guidance_scale() -> f64 {
    7.5
}

fn default_variant() -> String {
    "dev".into()
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_api_key_env() -> String {
    "REPLICATE_API_TOKEN".into()
}
