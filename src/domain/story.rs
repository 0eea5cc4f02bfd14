//! Story and panel types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Panels per story unless a deployment configures otherwise.
pub const DEFAULT_PANEL_COUNT: usize = 3;

/// One panel as described by the story model.
///
/// `prompt` goes verbatim to the image model; `caption` is shown under the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub prompt: String,
    pub caption: String,
}

impl PanelSpec {
    pub fn new(prompt: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            caption: caption.into(),
        }
    }
}

/// An ordered sequence of panel specs produced by one story call.
///
/// Immutable once built. Serializes as `{ "comics": [...] }`, the shape the
/// story endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    comics: Vec<PanelSpec>,
}

impl Story {
    #[must_use]
    pub fn new(comics: Vec<PanelSpec>) -> Self {
        Self { comics }
    }

    #[must_use]
    pub fn panels(&self) -> &[PanelSpec] {
        &self.comics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.comics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comics.is_empty()
    }

    /// Check the shape a renderable story must have: exactly `expected`
    /// panels, each with a non-blank prompt and caption.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpstreamParse`] attributed to `provider`, the source
    /// the story came from.
    pub fn validate(&self, expected: usize, provider: &'static str) -> Result<()> {
        if self.comics.len() != expected {
            return Err(Error::upstream_parse(
                provider,
                format!(
                    "Expected {expected} panels, story has {}",
                    self.comics.len()
                ),
            ));
        }
        let blank = self
            .comics
            .iter()
            .position(|spec| spec.prompt.trim().is_empty() || spec.caption.trim().is_empty());
        if let Some(index) = blank {
            return Err(Error::upstream_parse(
                provider,
                format!("Panel {} is missing a prompt or caption", index + 1),
            ));
        }
        Ok(())
    }

    /// Captions without images, as shown while images are still loading.
    #[must_use]
    pub fn pending_panels(&self) -> Vec<Panel> {
        self.comics
            .iter()
            .map(|spec| Panel::pending(spec.caption.clone()))
            .collect()
    }

    /// Pair image `i` with caption `i`.
    ///
    /// Returns `None` when the number of images differs from the number of panels.
    #[must_use]
    pub fn illustrate(&self, image_urls: &[String]) -> Option<Vec<Panel>> {
        if image_urls.len() != self.comics.len() {
            return None;
        }
        Some(
            self.comics
                .iter()
                .zip(image_urls)
                .map(|(spec, url)| Panel::illustrated(spec.caption.clone(), url.clone()))
                .collect(),
        )
    }
}

/// A rendered panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Panel {
    pub fn pending(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            image_url: None,
        }
    }

    pub fn illustrated(caption: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            image_url: Some(image_url.into()),
        }
    }
}
