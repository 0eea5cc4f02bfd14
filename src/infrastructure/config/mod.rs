//! Infrastructure configuration modules.

pub mod image;
pub mod llm;
pub mod logging;
pub mod server;
pub mod settings;
