//! Story writer configuration.

use serde::Deserialize;

use crate::domain::DEFAULT_PANEL_COUNT;

/// What the story model is asked to write.
///
/// The character and style are fixed for a deployment; callers of the API
/// only supply the scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    /// Subject of the comic, used in the system instruction.
    #[serde(default = "default_premise")]
    pub premise: String,
    /// Name the captions must use for the recurring character.
    #[serde(default = "default_character_name")]
    pub character_name: String,
    /// Token every image prompt must contain (the fine-tuned subject).
    #[serde(default = "default_subject_token")]
    pub subject_token: String,
    /// Phrase every image prompt must end with.
    #[serde(default = "default_style_suffix")]
    pub style_suffix: String,
    /// Number of panels a story must have.
    #[serde(default = "default_panel_count")]
    pub panel_count: usize,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            premise: default_premise(),
            character_name: default_character_name(),
            subject_token: default_subject_token(),
            style_suffix: default_style_suffix(),
            panel_count: default_panel_count(),
        }
    }
}

fn default_premise() -> String {
    "a dog's adventure".into()
}

fn default_character_name() -> String {
    "Bubble".into()
}

fn default_subject_token() -> String {
    "Bubble white dog".into()
}

fn default_style_suffix() -> String {
    "warm colors".into()
}

const fn default_panel_count() -> usize {
    DEFAULT_PANEL_COUNT
}
