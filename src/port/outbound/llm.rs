//! LLM completion port for the story writer.

use async_trait::async_trait;

use crate::error::Result;

/// Client for a chat model running in JSON output mode.
///
/// Implementations wrap a specific provider and handle authentication and
/// transport. They return the raw message content; interpreting it is the
/// caller's job.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one client serves every request.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a system instruction and a user message, returning the reply content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upstream`](crate::error::Error::Upstream) when the call
    /// fails and [`Error::UpstreamParse`](crate::error::Error::UpstreamParse)
    /// when the reply carries no content.
    async fn complete_json(&self, system: &str, user: &str) -> Result<String>;
}
