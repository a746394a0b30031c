//! Shared constants for the portal login screen.

/// Default inactivity window before the session-expired notice (10 minutes)
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default artificial delay of the simulated authentication round-trip
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1800;

/// Authentication calls slower than this surface as a network error
pub const DEFAULT_AUTH_TIMEOUT_MS: u64 = 30_000;

/// Default location of the preferences file
pub const DEFAULT_PREFS_PATH: &str = "portal-prefs.json";

/// Preferences key holding the theme flag
pub const THEME_KEY: &str = "portal-theme";

/// Environment variable consulted for the OS colour-scheme preference
pub const COLOR_SCHEME_ENV: &str = "PORTAL_COLOR_SCHEME";

/// Minimum trimmed username length
pub const MIN_USERNAME_LEN: usize = 2;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 4;

/// Captcha code constraints
pub mod captcha {
    /// Characters per challenge code
    pub const CODE_LEN: usize = 5;

    /// Alphabet without the ambiguous I, O, 0 and 1
    pub const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
}

/// Static support contact surfaces
pub mod support {
    pub const EMAIL: &str = "support@ktu.edu.in";
    pub const PHONE: &str = "+91 471 2598122";
}

/// Branding panel content
pub mod branding {
    pub const UNIVERSITY: &str = "APJ Abdul Kalam Technological University";
    pub const PORTAL_TITLE: &str = "Sign in to e-Governance Portal";
    pub const COPYRIGHT: &str = "© 2024 APJ Abdul Kalam Technological University";

    pub const FEATURES: [&str; 8] = [
        "Affiliation & Student Registration",
        "Comprehensive Academic Records",
        "Curriculum & Course Selection",
        "Personalized Student Dashboards",
        "Downloadable Mark Lists & Grade Sheets",
        "Secure University Communication",
        "Master Data & Cluster Management",
        "Examination & Evaluation Planning",
    ];
}
