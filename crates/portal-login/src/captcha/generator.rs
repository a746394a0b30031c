//! Captcha code generation.

use portal_common::constants::captcha::{ALPHABET, CODE_LEN};
use rand::Rng;

use super::CaptchaChallenge;

/// Captcha generator service
#[derive(Debug, Clone)]
pub struct CaptchaGenerator {
    /// Characters per code
    length: usize,
}

impl Default for CaptchaGenerator {
    fn default() -> Self {
        Self::new(CODE_LEN)
    }
}

impl CaptchaGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generate a fresh challenge with empty user input
    pub fn generate(&self) -> CaptchaChallenge {
        let code = self.generate_code(&mut rand::rng());

        tracing::debug!(length = self.length, "Generated captcha challenge");

        CaptchaChallenge::new(code)
    }

    /// Replacement challenge whose code differs from `previous`
    pub fn regenerate(&self, previous: &str) -> CaptchaChallenge {
        let code = self.fresh_code(&mut rand::rng(), previous);

        tracing::debug!(length = self.length, "Regenerated captcha challenge");

        CaptchaChallenge::new(code)
    }

    fn fresh_code(&self, rng: &mut impl Rng, previous: &str) -> String {
        loop {
            let code = self.generate_code(rng);
            // A zero-length code can never differ
            if code != previous || self.length == 0 {
                return code;
            }
        }
    }

    /// Draw a code uniformly from the unambiguous alphabet
    pub fn generate_code(&self, rng: &mut impl Rng) -> String {
        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
