//! Scripted port implementations.
//!
//! - [`ScriptedLlm`] / [`ScriptedImageModel`]: provider-level fakes for the
//!   story writer and the illustrator.
//! - [`ScriptedStorySource`] / [`ScriptedImageSource`]: orchestrator-level
//!   fakes with per-prompt delays and failures.
//! - [`GatedStorySource`]: holds one prompt until released, for overlap tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::{Prompt, Story};
use crate::error::{Error, Result};
use crate::port::outbound::comic::{ImageSource, StorySource};
use crate::port::outbound::image::ImageModel;
use crate::port::outbound::llm::Llm;

/// LLM that returns a fixed reply (or error) and records `(system, user)` pairs.
pub struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedLlm {
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            reply: Ok(content.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete_json(&self, system: &str, user: &str) -> Result<String> {
        self.calls.lock().push((system.to_string(), user.to_string()));
        self.reply
            .clone()
            .map_err(|message| Error::upstream(self.name(), message))
    }
}

/// Image model that returns a fixed URL list (or error).
pub struct ScriptedImageModel {
    reply: std::result::Result<Vec<String>, String>,
    calls: AtomicUsize,
}

impl ScriptedImageModel {
    pub fn returning(urls: Vec<String>) -> Self {
        Self {
            reply: Ok(urls),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageModel for ScriptedImageModel {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, _prompt: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(|message| Error::upstream(self.name(), message))
    }
}

/// Story source that returns one story (or error) for every prompt.
pub struct ScriptedStorySource {
    reply: std::result::Result<Story, String>,
    calls: AtomicUsize,
}

impl ScriptedStorySource {
    pub fn returning(story: Story) -> Self {
        Self {
            reply: Ok(story),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorySource for ScriptedStorySource {
    async fn story(&self, _prompt: &Prompt) -> Result<Story> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .map_err(|message| Error::upstream("scripted", message))
    }
}

/// Image source answering `https://img.test/{prompt}` after an optional delay.
#[derive(Default)]
pub struct ScriptedImageSource {
    delays: HashMap<String, Duration>,
    failures: HashMap<String, String>,
    calls: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl ScriptedImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delay(mut self, prompt: &str, delay: Duration) -> Self {
        self.delays.insert(prompt.to_string(), delay);
        self
    }

    #[must_use]
    pub fn with_failure(mut self, prompt: &str, message: &str) -> Self {
        self.failures.insert(prompt.to_string(), message.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts in the order their calls finished.
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().clone()
    }
}

#[async_trait]
impl ImageSource for ScriptedImageSource {
    async fn image(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(prompt) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().push(prompt.to_string());
        match self.failures.get(prompt) {
            Some(message) => Err(Error::upstream("scripted", message.clone())),
            None => Ok(format!("https://img.test/{prompt}")),
        }
    }
}

/// Story source that blocks one prompt until [`GatedStorySource::release`].
///
/// Every other prompt is answered immediately with the same story.
pub struct GatedStorySource {
    gated_prompt: String,
    gated_failure: Option<String>,
    story: Story,
    entered: Notify,
    gate: Notify,
}

impl GatedStorySource {
    pub fn new(gated_prompt: &str, story: Story) -> Self {
        Self {
            gated_prompt: gated_prompt.to_string(),
            gated_failure: None,
            story,
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Like [`GatedStorySource::new`], but the gated call fails once released.
    pub fn failing_gate(gated_prompt: &str, message: &str, story: Story) -> Self {
        Self {
            gated_failure: Some(message.to_string()),
            ..Self::new(gated_prompt, story)
        }
    }

    /// Wait until the gated prompt's call has started.
    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl StorySource for GatedStorySource {
    async fn story(&self, prompt: &Prompt) -> Result<Story> {
        if prompt.as_str() == self.gated_prompt {
            self.entered.notify_one();
            self.gate.notified().await;
            if let Some(message) = &self.gated_failure {
                return Err(Error::upstream("scripted", message.clone()));
            }
        }
        Ok(self.story.clone())
    }
}
