//! Actor codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3-letter actor code.
///
/// Usually an ISO3 country code ("USA", "CHN"), but non-country entity codes
/// from the upstream event feed ("GOV", "IGO") are passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorCode(pub String);

impl ActorCode {
    /// Create an actor code without validation.
    ///
    /// Use [`ActorCode::normalize`] for untrusted input.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Normalize a raw code: trim whitespace, uppercase, and require exactly
    /// three ASCII letters. Returns `None` for anything else.
    ///
    /// Callers drop unresolvable codes best-effort and report them; a bad
    /// code in one record never fails a whole aggregation.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ActorCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}
