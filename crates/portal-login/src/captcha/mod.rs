//! Captcha challenge generation and verification.
//!
//! Text challenges: the user retypes a short code drawn from an alphabet
//! without visually ambiguous characters.

mod generator;
mod verifier;

pub use generator::CaptchaGenerator;
pub use verifier::verify;

/// Challenge currently shown on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    /// The expected answer
    pub code: String,
    /// What the user has typed so far
    pub user_input: String,
}

impl CaptchaChallenge {
    pub fn new(code: String) -> Self {
        Self {
            code,
            user_input: String::new(),
        }
    }

    /// Check the typed input against the code
    pub fn is_solved(&self) -> bool {
        verify(&self.user_input, &self.code)
    }

    /// Spaced-out rendering of the code for display
    pub fn render(&self) -> String {
        self.code
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
