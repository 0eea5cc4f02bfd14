//! Application services (use cases).
//!
//! - [`story`]: turn a user prompt into a validated story
//! - [`image`]: turn a panel prompt into one image URL
//! - [`orchestrator`]: run a whole generation over both

pub mod image;
pub mod orchestrator;
pub mod story;
