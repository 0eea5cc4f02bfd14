//! Outbound adapters (driven side).

pub mod api;
pub mod llm;
pub mod replicate;
