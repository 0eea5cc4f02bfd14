//! Provider-agnostic comic types and the generation state machine.

mod prompt;
mod state;
mod story;

pub use prompt::Prompt;
pub use state::{GenerationEvent, GenerationState};
pub use story::{Panel, PanelSpec, Story, DEFAULT_PANEL_COUNT};
