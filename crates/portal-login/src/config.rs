//! Configuration management for the login screen.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use portal_common::constants::{
    DEFAULT_AUTH_TIMEOUT_MS, DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_PREFS_PATH, DEFAULT_SUBMIT_DELAY_MS,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Session (inactivity) configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Login form configuration
    #[serde(default)]
    pub login: LoginConfig,

    /// Theme persistence configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Inactivity timer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds without activity before the session-expired notice
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

/// Login form configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    /// Artificial delay of the simulated authentication round-trip
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,

    /// Longest wait for the backend before reporting a network error
    #[serde(default = "default_auth_timeout")]
    pub auth_timeout_ms: u64,

    /// Whether the captcha is shown before the first failed attempt
    #[serde(default = "default_captcha_required")]
    pub captcha_required: bool,
}

impl LoginConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms)
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay(),
            auth_timeout_ms: default_auth_timeout(),
            captcha_required: default_captcha_required(),
        }
    }
}

/// Theme persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    /// JSON file holding the theme flag
    #[serde(default = "default_prefs_path")]
    pub prefs_path: PathBuf,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            prefs_path: default_prefs_path(),
        }
    }
}

// Default value functions
fn default_idle_timeout() -> u64 { DEFAULT_IDLE_TIMEOUT_SECS }
fn default_submit_delay() -> u64 { DEFAULT_SUBMIT_DELAY_MS }
fn default_auth_timeout() -> u64 { DEFAULT_AUTH_TIMEOUT_MS }
fn default_captcha_required() -> bool { true }
fn default_prefs_path() -> PathBuf { PathBuf::from(DEFAULT_PREFS_PATH) }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = Self::from_file(config_path)?;

        // Apply CLI overrides
        if let Some(secs) = args.idle_timeout_secs {
            config.session.idle_timeout_secs = secs;
        }
        if let Some(ref path) = args.prefs_path {
            config.theme.prefs_path = path.clone();
        }

        Ok(config)
    }

    fn from_file(config_path: &str) -> Result<Self> {
        if !Path::new(config_path).exists() {
            // Use defaults if config file doesn't exist
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path))
            .build()
            .context("Failed to load config file")?;

        settings.try_deserialize().context("Failed to parse config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.session.idle_timeout(), Duration::from_secs(600));
        assert_eq!(config.login.submit_delay(), Duration::from_millis(1800));
        assert_eq!(config.login.auth_timeout(), Duration::from_secs(30));
        assert!(config.login.captcha_required);
        assert_eq!(config.theme.prefs_path, PathBuf::from("portal-prefs.json"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file("/nonexistent/portal.toml").unwrap();
        assert_eq!(config.session.idle_timeout_secs, DEFAULT_IDLE_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[session]\nidle_timeout_secs = 30\n\n[login]\ncaptcha_required = false").unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.session.idle_timeout_secs, 30);
        assert!(!config.login.captcha_required);
        assert_eq!(config.login.submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS);
    }
}
