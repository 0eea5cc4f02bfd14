//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod comic;
pub mod image;
pub mod llm;
