//! Text-model provider configuration.
//!
//! The story writer talks to an OpenAI-compatible chat completions endpoint.
//! The default points at the GitHub Models inference host, authenticated
//! with a GitHub token.

use serde::Deserialize;

/// Text-model provider configuration.
///
/// The API key is read from the environment variable named by `api_key_env`
/// at startup, never from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL; `/chat/completions` is appended.
    ///
    /// Defaults to "https://models.inference.ai.azure.com".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier.
    ///
    /// Defaults to "gpt-4o".
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the bearer token.
    ///
    /// Defaults to `GITHUB_TOKEN`.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Client-side request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://models.inference.ai.azure.com".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

fn default_api_key_env() -> String {
    "GITHUB_TOKEN".into()
}
