//! Generation lifecycle state.
//!
//! A generation moves `Idle -> Loading -> Ready | Error`. Every write goes
//! through [`GenerationState::transition`], which also rejects events that
//! belong to an older generation.

use super::story::{Panel, Story};

/// State of the single generation slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting on the story call (`story` is `None`) or on the image calls.
    Loading {
        generation: u64,
        story: Option<Story>,
    },
    /// Every panel has its image.
    Ready {
        generation: u64,
        story: Story,
        panels: Vec<Panel>,
    },
    /// The generation failed; no partial images are kept.
    Error { generation: u64, message: String },
}

/// Inputs to the state machine. Each carries the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    Started { generation: u64 },
    StoryReceived { generation: u64, story: Story },
    ImagesResolved { generation: u64, image_urls: Vec<String> },
    Failed { generation: u64, message: String },
}

impl GenerationEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation }
            | Self::StoryReceived { generation, .. }
            | Self::ImagesResolved { generation, .. }
            | Self::Failed { generation, .. } => *generation,
        }
    }
}

impl GenerationState {
    /// Generation number of the current state; `0` while idle.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Idle => 0,
            Self::Loading { generation, .. }
            | Self::Ready { generation, .. }
            | Self::Error { generation, .. } => *generation,
        }
    }

    /// Short lowercase name, used in logs and CLI output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Ready { .. } => "ready",
            Self::Error { .. } => "error",
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Panels to render for this state.
    ///
    /// While loading with a known story the captions are shown without images.
    #[must_use]
    pub fn panels(&self) -> Vec<Panel> {
        match self {
            Self::Loading {
                story: Some(story), ..
            } => story.pending_panels(),
            Self::Ready { panels, .. } => panels.clone(),
            _ => Vec::new(),
        }
    }

    /// Compute the state that follows `event`.
    ///
    /// Returns `None` when the event does not apply: it belongs to another
    /// generation, or it arrives out of order. Callers must leave the state
    /// untouched in that case.
    #[must_use]
    pub fn transition(&self, event: GenerationEvent) -> Option<Self> {
        let current = self.generation();
        match (self, event) {
            (_, GenerationEvent::Started { generation }) if generation > current => {
                Some(Self::Loading {
                    generation,
                    story: None,
                })
            }
            (Self::Loading { story: None, .. }, GenerationEvent::StoryReceived { generation, story })
                if generation == current =>
            {
                Some(Self::Loading {
                    generation,
                    story: Some(story),
                })
            }
            (
                Self::Loading {
                    story: Some(story), ..
                },
                GenerationEvent::ImagesResolved {
                    generation,
                    image_urls,
                },
            ) if generation == current => Some(match story.illustrate(&image_urls) {
                Some(panels) => Self::Ready {
                    generation,
                    story: story.clone(),
                    panels,
                },
                None => Self::Error {
                    generation,
                    message: format!(
                        "expected {} images, received {}",
                        story.len(),
                        image_urls.len()
                    ),
                },
            }),
            (Self::Loading { .. }, GenerationEvent::Failed { generation, message })
                if generation == current =>
            {
                Some(Self::Error {
                    generation,
                    message,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::PanelSpec;

    fn story() -> Story {
        Story::new(vec![
            PanelSpec::new("pa", "ca"),
            PanelSpec::new("pb", "cb"),
        ])
    }

    fn loading_with_story(generation: u64) -> GenerationState {
        GenerationState::Loading {
            generation,
            story: Some(story()),
        }
    }

    #[test]
    fn start_from_idle_enters_loading() {
        let next = GenerationState::Idle
            .transition(GenerationEvent::Started { generation: 1 })
            .unwrap();
        assert_eq!(
            next,
            GenerationState::Loading {
                generation: 1,
                story: None
            }
        );
        assert!(next.panels().is_empty());
    }

    #[test]
    fn start_discards_previous_result() {
        let ready = GenerationState::Ready {
            generation: 3,
            story: story(),
            panels: vec![Panel::illustrated("ca", "u")],
        };
        let next = ready
            .transition(GenerationEvent::Started { generation: 4 })
            .unwrap();
        assert!(next.panels().is_empty());
        assert_eq!(next.generation(), 4);
    }

    #[test]
    fn start_must_move_forward() {
        let state = GenerationState::Error {
            generation: 5,
            message: "boom".into(),
        };
        assert!(state
            .transition(GenerationEvent::Started { generation: 5 })
            .is_none());
    }

    #[test]
    fn story_shows_captions_without_images() {
        let state = GenerationState::Loading {
            generation: 1,
            story: None,
        };
        let next = state
            .transition(GenerationEvent::StoryReceived {
                generation: 1,
                story: story(),
            })
            .unwrap();
        let panels = next.panels();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].caption, "ca");
        assert!(panels[0].image_url.is_none());
    }

    #[test]
    fn images_complete_the_generation() {
        let next = loading_with_story(2)
            .transition(GenerationEvent::ImagesResolved {
                generation: 2,
                image_urls: vec!["ua".into(), "ub".into()],
            })
            .unwrap();
        assert_eq!(next.label(), "ready");
        assert_eq!(
            next.panels(),
            vec![Panel::illustrated("ca", "ua"), Panel::illustrated("cb", "ub")]
        );
    }

    #[test]
    fn image_count_mismatch_is_an_error() {
        let next = loading_with_story(2)
            .transition(GenerationEvent::ImagesResolved {
                generation: 2,
                image_urls: vec!["ua".into()],
            })
            .unwrap();
        assert!(matches!(
            next,
            GenerationState::Error { ref message, .. } if message == "expected 2 images, received 1"
        ));
        assert!(next.panels().is_empty());
    }

    #[test]
    fn failure_drops_story_and_images() {
        let next = loading_with_story(2)
            .transition(GenerationEvent::Failed {
                generation: 2,
                message: "quota exceeded".into(),
            })
            .unwrap();
        assert!(matches!(
            next,
            GenerationState::Error { ref message, .. } if message == "quota exceeded"
        ));
        assert!(next.panels().is_empty());
    }

    #[test]
    fn stale_events_are_rejected() {
        let state = loading_with_story(7);
        assert!(state
            .transition(GenerationEvent::ImagesResolved {
                generation: 6,
                image_urls: vec!["ua".into(), "ub".into()],
            })
            .is_none());
        assert!(state
            .transition(GenerationEvent::Failed {
                generation: 6,
                message: "late".into(),
            })
            .is_none());
    }

    #[test]
    fn images_before_story_are_rejected() {
        let state = GenerationState::Loading {
            generation: 1,
            story: None,
        };
        assert!(state
            .transition(GenerationEvent::ImagesResolved {
                generation: 1,
                image_urls: vec![],
            })
            .is_none());
    }

    #[test]
    fn finished_states_ignore_late_completions() {
        let ready = GenerationState::Ready {
            generation: 1,
            story: story(),
            panels: vec![],
        };
        assert!(ready
            .transition(GenerationEvent::Failed {
                generation: 1,
                message: "late".into(),
            })
            .is_none());
    }
}
