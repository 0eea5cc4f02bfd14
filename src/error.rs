use thiserror::Error;

/// Message returned whenever a request arrives without a usable prompt.
pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The caller supplied input that can never succeed (e.g. an empty prompt).
    #[error("{0}")]
    Validation(String),

    /// A provider call failed: network, authentication, quota or a non-2xx status.
    #[error("{message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    /// A provider answered successfully but the payload was empty or malformed.
    #[error("{message}")]
    UpstreamParse {
        provider: &'static str,
        message: String,
    },

    /// A newer generation started before this one finished.
    #[error("generation superseded by a newer request")]
    Superseded,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The fixed error for a missing or blank prompt.
    #[must_use]
    pub fn prompt_required() -> Self {
        Self::Validation(PROMPT_REQUIRED.to_string())
    }

    pub fn upstream(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
        }
    }

    pub fn upstream_parse(provider: &'static str, message: impl Into<String>) -> Self {
        Self::UpstreamParse {
            provider,
            message: message.into(),
        }
    }

    /// True for errors caused by the caller rather than a provider.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_displays_provider_message_verbatim() {
        let err = Error::upstream("openai", "Bad credentials");
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn prompt_required_is_validation() {
        let err = Error::prompt_required();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), PROMPT_REQUIRED);
    }

    #[test]
    fn parse_error_is_not_validation() {
        assert!(!Error::upstream_parse("replicate", "empty output").is_validation());
    }
}
