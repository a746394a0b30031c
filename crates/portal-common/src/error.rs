//! Common error types for portal components.

use thiserror::Error;

/// Errors raised outside the login form itself (preferences, parsing)
#[derive(Debug, Error)]
pub enum PortalError {
    /// Preferences file could not be read or written
    #[error("Preferences error: {0}")]
    Prefs(#[from] std::io::Error),

    /// Preferences file is not valid JSON
    #[error("Malformed preferences: {0}")]
    MalformedPrefs(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PortalError {
    /// Returns true if the caller may fall back to defaults and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Prefs(_) | Self::MalformedPrefs(_))
    }
}
