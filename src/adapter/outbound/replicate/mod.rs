//! Replicate image-generation adapter.
//!
//! Implements [`ImageModel`](crate::port::outbound::image::ImageModel) over
//! the Replicate predictions API.

mod client;
pub mod dto;

pub use client::{GenerationParams, ModelRef, Replicate};
