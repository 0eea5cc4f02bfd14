//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Orchestrator + Ports   ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │   LLM   │            │ Image model │              │ Comic API │
//! │ Adapter │            │   Adapter   │              │  Client   │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::llm::Llm`] - JSON-mode chat completion
//! - [`outbound::image::ImageModel`] - Text-to-image generation
//! - [`outbound::comic::StorySource`], [`outbound::comic::ImageSource`] -
//!   What the orchestrator calls, in-process or over HTTP

pub mod outbound;
