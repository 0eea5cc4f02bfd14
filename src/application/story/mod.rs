//! Story writer: turns a user prompt into a validated [`Story`].

pub mod config;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{PanelSpec, Prompt, Story};
use crate::error::{Error, Result};
use crate::port::outbound::comic::StorySource;
use crate::port::outbound::llm::Llm;

pub use config::StoryConfig;

/// Asks an LLM for a comic script and checks its shape.
pub struct StoryWriter {
    llm: Arc<dyn Llm>,
    config: StoryConfig,
}

impl StoryWriter {
    pub fn new(llm: Arc<dyn Llm>, config: StoryConfig) -> Self {
        Self { llm, config }
    }

    /// The fixed instruction sent ahead of every user prompt.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        let StoryConfig {
            premise,
            character_name,
            subject_token,
            style_suffix,
            panel_count,
        } = &self.config;

        format!(
            r#"Create a {panel_count}-panel comic story about {premise}. For each panel, provide:
1. An image generation prompt that includes '{subject_token}' and ends with '{style_suffix}'
2. A caption that refers to the main character as '{character_name}'

Format the output as JSON with this structure:
{{
    "comics": [
        {{
            "prompt": "Image generation prompt here",
            "caption": "Caption text here"
        }}
    ]
}}
"#
        )
    }

    /// Parse and validate the model's reply.
    fn parse_response(&self, content: &str) -> Result<Story> {
        let provider = self.llm.name();
        let json = extract_json(content).ok_or_else(|| {
            Error::upstream_parse(provider, "No JSON object found in story response")
        })?;
        let parsed: RawStory = serde_json::from_str(json)
            .map_err(|e| Error::upstream_parse(provider, format!("Invalid story JSON: {e}")))?;

        let story = Story::new(parsed.comics.into_iter().map(RawPanel::into_spec).collect());
        story.validate(self.config.panel_count, provider)?;
        for (index, panel) in story.panels().iter().enumerate() {
            self.check_conventions(index, panel);
        }

        Ok(story)
    }

    /// Generated text may drift from the instruction; note it without failing.
    fn check_conventions(&self, index: usize, panel: &PanelSpec) {
        if !panel.prompt.contains(&self.config.subject_token) {
            warn!(panel = index + 1, "Image prompt is missing the subject token");
        }
        if !panel.prompt.trim_end().trim_end_matches('.').ends_with(&self.config.style_suffix) {
            debug!(panel = index + 1, "Image prompt does not end with the style suffix");
        }
        if !panel.caption.contains(&self.config.character_name) {
            warn!(panel = index + 1, "Caption does not name the character");
        }
    }
}

#[async_trait]
impl StorySource for StoryWriter {
    async fn story(&self, prompt: &Prompt) -> Result<Story> {
        info!(provider = self.llm.name(), "Requesting story");
        let content = self
            .llm
            .complete_json(&self.system_prompt(), prompt.as_str())
            .await?;
        let story = self.parse_response(&content)?;
        debug!(panels = story.len(), "Story received");
        Ok(story)
    }
}

#[derive(Deserialize)]
struct RawStory {
    comics: Vec<RawPanel>,
}

#[derive(Deserialize)]
struct RawPanel {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

impl RawPanel {
    /// Missing fields become empty strings; [`Story::validate`] rejects them.
    fn into_spec(self) -> PanelSpec {
        PanelSpec::new(
            self.prompt.unwrap_or_default(),
            self.caption.unwrap_or_default(),
        )
    }
}

/// Find the JSON object in a reply, with or without a markdown fence.
fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map_or(text.len(), |i| start + i);
        return Some(text[start..end].trim());
    }
    let start = text.find('{')?;
    let end = text.rfind('}').map_or(text.len(), |i| i + 1);
    (end > start).then(|| &text[start..end])
}
