//! Captcha verification logic.

/// Case-insensitive exact match of the typed input against the code
pub fn verify(input: &str, code: &str) -> bool {
    input.to_uppercase() == code.to_uppercase()
}
