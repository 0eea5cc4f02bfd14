//! Validated prompt newtype.

use std::fmt;

use crate::error::{Error, Result};

/// A user prompt that is known to contain non-whitespace text.
///
/// The inner String is private so every `Prompt` goes through [`Prompt::parse`].
/// The original text is kept as typed; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt(String);

impl Prompt {
    /// Validate raw input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with the fixed "Prompt is required"
    /// message when the input is empty or whitespace-only.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(Error::prompt_required());
        }
        Ok(Self(raw))
    }

    /// Validate optional input, as it arrives from a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`Prompt::parse`]; `None` is treated as empty.
    pub fn from_optional(raw: Option<String>) -> Result<Self> {
        raw.map_or_else(|| Err(Error::prompt_required()), Self::parse)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
