//! Story-to-image orchestration.
//!
//! One generation runs as:
//!
//! 1. **Validate**: a blank prompt is a no-op, nothing is requested
//! 2. **Start**: bump the generation number and clear the previous result
//! 3. **Story**: one call to the [`StorySource`]
//! 4. **Images**: one [`ImageSource`] call per panel, all in flight at once
//! 5. **Join**: all-or-nothing; the first failure fails the generation
//!
//! Each step that completes writes the state slot through
//! [`GenerationState::transition`]. A completion whose generation is no
//! longer current is dropped, so an abandoned request can never overwrite a
//! newer one.

use std::sync::Arc;

use futures_util::future::try_join_all;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{GenerationEvent, GenerationState, Panel, Prompt};
use crate::error::{Error, Result};
use crate::port::outbound::comic::{ImageSource, StorySource};

/// How a call to [`Orchestrator::generate`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The prompt was blank; no request was made and the state is unchanged.
    Ignored,
    /// Every panel has its image, in story order.
    Completed(Vec<Panel>),
    /// A newer generation started while this one was in flight; its result was dropped.
    Superseded,
}

/// Sequences the story call and the per-panel image calls.
pub struct Orchestrator {
    stories: Arc<dyn StorySource>,
    images: Arc<dyn ImageSource>,
    state: Mutex<GenerationState>,
}

impl Orchestrator {
    pub fn new(stories: Arc<dyn StorySource>, images: Arc<dyn ImageSource>) -> Self {
        Self {
            stories,
            images,
            state: Mutex::new(GenerationState::Idle),
        }
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GenerationState {
        self.state.lock().clone()
    }

    /// Run one generation for `raw`.
    ///
    /// # Errors
    ///
    /// Returns the story or image error when this generation is still the
    /// current one at the time it fails. The state is then
    /// [`GenerationState::Error`] with the same message.
    pub async fn generate(&self, raw: &str) -> Result<Outcome> {
        let Ok(prompt) = Prompt::parse(raw) else {
            debug!("Blank prompt, nothing to generate");
            return Ok(Outcome::Ignored);
        };

        let generation = self.begin();
        info!(generation, "Generation started");

        let story = match self.stories.story(&prompt).await {
            Ok(story) => story,
            Err(e) => return self.fail(generation, e),
        };

        if self
            .apply(GenerationEvent::StoryReceived {
                generation,
                story: story.clone(),
            })
            .is_none()
        {
            return Ok(Outcome::Superseded);
        }

        let calls = story.panels().iter().enumerate().map(|(index, spec)| {
            let images = Arc::clone(&self.images);
            async move {
                let url = images.image(&spec.prompt).await;
                match &url {
                    Ok(_) => debug!(generation, panel = index + 1, "Panel image ready"),
                    Err(e) => warn!(generation, panel = index + 1, error = %e, "Panel image failed"),
                }
                url
            }
        });

        let image_urls = match try_join_all(calls).await {
            Ok(urls) => urls,
            Err(e) => return self.fail(generation, e),
        };

        match self.apply(GenerationEvent::ImagesResolved {
            generation,
            image_urls,
        }) {
            Some(GenerationState::Ready { panels, .. }) => {
                info!(generation, panels = panels.len(), "Generation complete");
                Ok(Outcome::Completed(panels))
            }
            Some(GenerationState::Error { message, .. }) => {
                Err(Error::upstream_parse("orchestrator", message))
            }
            _ => Ok(Outcome::Superseded),
        }
    }

    /// Start a new generation, discarding whatever the slot held.
    fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        let generation = state.generation() + 1;
        if let Some(next) = state.transition(GenerationEvent::Started { generation }) {
            *state = next;
        }
        generation
    }

    /// Write `event` if it still applies and return the new state.
    ///
    /// Returns `None` for stale events; the slot is left as it was.
    fn apply(&self, event: GenerationEvent) -> Option<GenerationState> {
        let generation = event.generation();
        let mut state = self.state.lock();
        match state.transition(event) {
            Some(next) => {
                debug!(generation, state = next.label(), "State changed");
                *state = next.clone();
                Some(next)
            }
            None => {
                debug!(
                    generation,
                    current = state.generation(),
                    "Dropping stale generation result"
                );
                None
            }
        }
    }

    fn fail(&self, generation: u64, err: Error) -> Result<Outcome> {
        let written = self.apply(GenerationEvent::Failed {
            generation,
            message: err.to_string(),
        });
        if written.is_some() {
            warn!(generation, error = %err, "Generation failed");
            Err(err)
        } else {
            Ok(Outcome::Superseded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::{PanelSpec, Story};
    use crate::testkit::fake::{GatedStorySource, ScriptedImageSource, ScriptedStorySource};

    fn three_panels() -> Story {
        Story::new(vec![
            PanelSpec::new("A", "caption A"),
            PanelSpec::new("B", "caption B"),
            PanelSpec::new("C", "caption C"),
        ])
    }

    fn orchestrator(
        stories: Arc<dyn StorySource>,
        images: Arc<dyn ImageSource>,
    ) -> Orchestrator {
        Orchestrator::new(stories, images)
    }

    #[tokio::test]
    async fn blank_prompt_is_a_no_op() {
        let stories = Arc::new(ScriptedStorySource::returning(three_panels()));
        let images = Arc::new(ScriptedImageSource::new());
        let orchestrator = orchestrator(stories.clone(), images.clone());

        assert_eq!(orchestrator.generate("").await.unwrap(), Outcome::Ignored);
        assert_eq!(orchestrator.generate("  \n").await.unwrap(), Outcome::Ignored);

        assert_eq!(stories.call_count(), 0);
        assert_eq!(images.call_count(), 0);
        assert_eq!(orchestrator.snapshot(), GenerationState::Idle);
    }

    #[tokio::test]
    async fn completes_with_images_in_panel_order() {
        let stories = Arc::new(ScriptedStorySource::returning(three_panels()));
        // C finishes first, then A, then B.
        let images = Arc::new(
            ScriptedImageSource::new()
                .with_delay("A", Duration::from_millis(40))
                .with_delay("B", Duration::from_millis(80))
                .with_delay("C", Duration::from_millis(5)),
        );
        let orchestrator = orchestrator(stories, images.clone());

        let outcome = orchestrator.generate("in outer space").await.unwrap();

        let expected = vec![
            Panel::illustrated("caption A", "https://img.test/A"),
            Panel::illustrated("caption B", "https://img.test/B"),
            Panel::illustrated("caption C", "https://img.test/C"),
        ];
        assert_eq!(outcome, Outcome::Completed(expected.clone()));
        assert_eq!(orchestrator.snapshot().panels(), expected);
        assert_eq!(orchestrator.snapshot().label(), "ready");
        assert_eq!(images.completion_order(), vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn image_calls_run_concurrently() {
        let stories = Arc::new(ScriptedStorySource::returning(three_panels()));
        let images = Arc::new(
            ScriptedImageSource::new()
                .with_delay("A", Duration::from_millis(150))
                .with_delay("B", Duration::from_millis(150))
                .with_delay("C", Duration::from_millis(150)),
        );
        let orchestrator = orchestrator(stories, images);

        let started = std::time::Instant::now();
        orchestrator.generate("race").await.unwrap();
        assert!(
            started.elapsed() < Duration::from_millis(400),
            "image calls should overlap, took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn one_failed_image_fails_the_generation() {
        let stories = Arc::new(ScriptedStorySource::returning(three_panels()));
        let images = Arc::new(ScriptedImageSource::new().with_failure("B", "NSFW content detected"));
        let orchestrator = orchestrator(stories, images);

        let err = orchestrator.generate("in outer space").await.unwrap_err();
        assert_eq!(err.to_string(), "NSFW content detected");

        let state = orchestrator.snapshot();
        assert!(matches!(
            state,
            GenerationState::Error { ref message, .. } if message == "NSFW content detected"
        ));
        assert!(state.panels().is_empty());
    }

    #[tokio::test]
    async fn story_failure_makes_no_image_calls() {
        let stories = Arc::new(ScriptedStorySource::failing("Bad credentials"));
        let images = Arc::new(ScriptedImageSource::new());
        let orchestrator = orchestrator(stories, images.clone());

        let err = orchestrator.generate("in outer space").await.unwrap_err();
        assert!(matches!(err, Error::Upstream { .. }));
        assert_eq!(images.call_count(), 0);
        assert!(matches!(
            orchestrator.snapshot(),
            GenerationState::Error { message, .. } if message == "Bad credentials"
        ));
    }

    #[tokio::test]
    async fn new_generation_clears_previous_result() {
        let stories = Arc::new(ScriptedStorySource::returning(three_panels()));
        let images = Arc::new(ScriptedImageSource::new());
        let orchestrator = orchestrator(stories, images);

        orchestrator.generate("first").await.unwrap();
        assert_eq!(orchestrator.snapshot().generation(), 1);

        orchestrator.generate("second").await.unwrap();
        assert_eq!(orchestrator.snapshot().generation(), 2);
    }

    #[tokio::test]
    async fn stale_generation_does_not_overwrite_newer_one() {
        let stories = Arc::new(GatedStorySource::new("slow", three_panels()));
        let images = Arc::new(ScriptedImageSource::new());
        let orchestrator = Arc::new(orchestrator(stories.clone(), images));

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.generate("slow").await })
        };
        stories.wait_until_entered().await;

        let second = orchestrator.generate("fast").await.unwrap();
        assert!(matches!(second, Outcome::Completed(_)));

        stories.release();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first, Outcome::Superseded);

        let state = orchestrator.snapshot();
        assert_eq!(state.generation(), 2);
        assert_eq!(state.label(), "ready");
    }

    #[tokio::test]
    async fn stale_failure_is_not_reported() {
        let stories = Arc::new(GatedStorySource::failing_gate("slow", "timed out", three_panels()));
        let images = Arc::new(ScriptedImageSource::new());
        let orchestrator = Arc::new(orchestrator(stories.clone(), images));

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.generate("slow").await })
        };
        stories.wait_until_entered().await;

        orchestrator.generate("fast").await.unwrap();
        stories.release();

        assert_eq!(first.await.unwrap().unwrap(), Outcome::Superseded);
        assert_eq!(orchestrator.snapshot().label(), "ready");
    }
}
