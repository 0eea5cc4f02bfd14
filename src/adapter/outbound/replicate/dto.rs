//! Replicate predictions API payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/predictions` (or the model-scoped variant, without `version`).
#[derive(Debug, Serialize)]
pub struct CreatePrediction<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    pub input: PredictionInput<'a>,
}

/// Model input for the flux fine-tunes.
#[derive(Debug, Serialize)]
pub struct PredictionInput<'a> {
    pub prompt: &'a str,
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    /// Weights variant, e.g. `dev`.
    pub model: &'a str,
}

/// A prediction as returned by create and get.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<PredictionOutput>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub urls: Option<PredictionUrls>,
}

impl Prediction {
    /// The failure reason reported by the model, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// Image models return a list of URLs; single-output models return one string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    Many(Vec<String>),
    One(String),
}

impl PredictionOutput {
    #[must_use]
    pub fn into_urls(self) -> Vec<String> {
        match self {
            Self::Many(urls) => urls,
            Self::One(url) => vec![url],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionUrls {
    pub get: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_omits_missing_version() {
        let body = CreatePrediction {
            version: None,
            input: PredictionInput {
                prompt: "Bubble white dog, warm colors",
                num_inference_steps: 28,
                guidance_scale: 7.5,
                model: "dev",
            },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("version").is_none());
        assert_eq!(json["input"]["num_inference_steps"], 28);
        assert_eq!(json["input"]["guidance_scale"], 7.5);
        assert_eq!(json["input"]["model"], "dev");
    }

    #[test]
    fn succeeded_prediction_with_list_output() {
        let json = r#"{
            "id": "gm3qorzdhgbfurvjtvhg6dckhu",
            "status": "succeeded",
            "output": ["https://replicate.delivery/pbxt/out-0.webp"],
            "error": null,
            "urls": {"get": "https://api.replicate.com/v1/predictions/gm3q", "cancel": "x"}
        }"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();

        assert_eq!(prediction.status, PredictionStatus::Succeeded);
        assert!(prediction.error_message().is_none());
        assert_eq!(
            prediction.output.unwrap().into_urls(),
            vec!["https://replicate.delivery/pbxt/out-0.webp"]
        );
    }

    #[test]
    fn single_string_output_becomes_one_url() {
        let json = r#"{"status": "succeeded", "output": "https://replicate.delivery/x.png"}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.output.unwrap().into_urls().len(), 1);
    }

    #[test]
    fn unknown_status_does_not_fail_parsing() {
        let prediction: Prediction =
            serde_json::from_str(r#"{"status": "queued_somewhere"}"#).unwrap();
        assert_eq!(prediction.status, PredictionStatus::Unknown);
        assert!(!prediction.status.is_terminal());
    }

    #[test]
    fn failed_prediction_exposes_error() {
        let json = r#"{"status": "failed", "error": "CUDA out of memory"}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert!(prediction.status.is_terminal());
        assert_eq!(prediction.error_message().as_deref(), Some("CUDA out of memory"));
    }
}
