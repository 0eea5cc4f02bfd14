//! CLI module graph.

pub mod command;
pub mod generate;
pub mod output;
pub mod serve;
