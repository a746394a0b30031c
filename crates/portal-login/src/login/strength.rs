//! Advisory password strength meter.

/// Banded strength of a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Number of checks passed (0-5)
    pub score: u8,
    /// Meter fill percentage
    pub level: u8,
    pub label: &'static str,
    /// Meter colour (CSS hex)
    pub color: &'static str,
}

impl PasswordStrength {
    const NONE: PasswordStrength = PasswordStrength {
        score: 0,
        level: 0,
        label: "",
        color: "transparent",
    };

    fn from_score(score: u8) -> Self {
        let (level, label, color) = match score {
            0..=1 => (20, "Weak", "#C53030"),
            2 => (40, "Fair", "#DD6B20"),
            3 => (60, "Good", "#D69E2E"),
            4 => (80, "Strong", "#38A169"),
            _ => (100, "Very Strong", "#2F855A"),
        };
        Self {
            score,
            level,
            label,
            color,
        }
    }
}

/// Score a password with five independent checks
pub fn score_password(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength::NONE;
    }

    let len = password.chars().count();
    let checks = [
        len >= 4,
        len >= 8,
        password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|&&passed| passed).count() as u8;

    PasswordStrength::from_score(score)
}
