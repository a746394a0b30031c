//! Errors surfaced by the login form.
//!
//! Display strings are the messages shown to the user.

use thiserror::Error;

use super::validate::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// One or both credential fields failed local validation
    #[error("{0}")]
    FieldValidation(FieldErrors),

    /// Typed captcha did not match the challenge
    #[error("Invalid captcha. Please try again.")]
    CaptchaMismatch,

    /// Backend rejected the credentials. Never says which field was wrong.
    #[error(
        "Invalid credentials. Please check your username and password, or reset your password if you've forgotten it."
    )]
    InvalidCredentials,

    /// Backend could not be reached
    #[error("Network error. Please check your connection.")]
    Network(String),

    /// Retry requested without a network error to recover from
    #[error("Nothing to retry. Use 'login' to sign in.")]
    NoRetryPending,

    /// A submission is already in flight
    #[error("A sign-in attempt is already in progress")]
    FormBusy,
}

impl LoginError {
    /// Returns true if the same submission may simply be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
