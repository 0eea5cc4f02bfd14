//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fake`]: scripted providers and sources (`ScriptedLlm`,
//!   `ScriptedImageModel`, `ScriptedStorySource`, `ScriptedImageSource`,
//!   `GatedStorySource`) that record their calls.

pub mod fake;
