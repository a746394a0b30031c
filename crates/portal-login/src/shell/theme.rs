//! Theme preference persistence.
//!
//! The preference lives under a single key in a small JSON object. Other keys
//! in the file, whatever their value type, are preserved on write.

use portal_common::constants::{COLOR_SCHEME_ENV, THEME_KEY};
use portal_common::{PortalError, Theme};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_prefs(&self) -> Result<Map<String, Value>, PortalError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Stored theme, or `None` if nothing has been saved yet
    pub fn load(&self) -> Result<Option<Theme>, PortalError> {
        let prefs = self.read_prefs()?;
        match prefs.get(THEME_KEY) {
            None => Ok(None),
            Some(Value::String(v)) => v.parse::<Theme>().map(Some),
            Some(other) => Err(PortalError::InvalidInput(format!(
                "{THEME_KEY} must be a string, got {other}"
            ))),
        }
    }

    pub fn save(&self, theme: Theme) -> Result<(), PortalError> {
        // An unreadable file is replaced rather than blocking the toggle
        let mut prefs = self.read_prefs().unwrap_or_default();
        prefs.insert(THEME_KEY.to_string(), Value::from(theme.as_str()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;

        tracing::debug!(theme = theme.as_str(), path = %self.path.display(), "Theme saved");
        Ok(())
    }

    /// Theme to start with: the saved one, else the OS preference
    pub fn initial_theme(&self) -> Theme {
        match self.load() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::from_dark(os_prefers_dark()),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Ignoring unreadable theme preference");
                Theme::from_dark(os_prefers_dark())
            }
        }
    }
}

/// OS colour-scheme preference as exposed to a terminal session
pub fn os_prefers_dark() -> bool {
    prefers_dark(
        std::env::var(COLOR_SCHEME_ENV).ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

fn prefers_dark(scheme: Option<&str>, colorfgbg: Option<&str>) -> bool {
    if let Some(scheme) = scheme.and_then(|s| s.parse::<Theme>().ok()) {
        return scheme.is_dark();
    }

    // "fg;bg" (sometimes "fg;default;bg"): dark backgrounds are 0-6 and 8
    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| matches!(bg, 0..=6 | 8))
}
