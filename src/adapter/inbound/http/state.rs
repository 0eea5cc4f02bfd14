//! Shared handler state.

use std::sync::Arc;

use crate::port::outbound::comic::{ImageSource, StorySource};

/// The two services every handler needs.
#[derive(Clone)]
pub struct AppState {
    pub stories: Arc<dyn StorySource>,
    pub images: Arc<dyn ImageSource>,
}

impl AppState {
    pub fn new(stories: Arc<dyn StorySource>, images: Arc<dyn ImageSource>) -> Self {
        Self { stories, images }
    }
}
