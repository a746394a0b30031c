//! Core types shared across portal components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PortalError;

/// Who is signing in.
///
/// The role only selects a display configuration; the credential check
/// itself receives it as an opaque hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Faculty => "Faculty",
            Self::Admin => "Admin",
        }
    }

    /// Display configuration for the login form under this role
    pub fn profile(&self) -> RoleProfile {
        match self {
            Self::Student => RoleProfile {
                subtitle: "Secure access for Enrolled Students",
                label: "University ID / Register Number",
                placeholder: "e.g. TVA20CS045",
            },
            Self::Faculty => RoleProfile {
                subtitle: "Portal access for Faculty & Staff",
                label: "Faculty ID / KTU ID",
                placeholder: "e.g. KTU-F-12345",
            },
            Self::Admin => RoleProfile {
                subtitle: "Restricted Administrative Access",
                label: "Admin Username",
                placeholder: "e.g. admin.exam_cell",
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PortalError::InvalidInput(format!("unknown role '{}'", s.trim())))
    }
}

/// Per-role form labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    pub subtitle: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

/// Credential input fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Username,
    Password,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username => f.write_str("username"),
            Self::Password => f.write_str("password"),
        }
    }
}

/// Colour scheme of the page chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(&self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(PortalError::InvalidInput(format!("unknown theme '{other}'"))),
        }
    }
}

/// User activity that keeps the session alive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    PointerDown,
    KeyDown,
    Scroll,
    TouchStart,
}

/// Session issued by the authentication backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub username: String,

    /// Opaque bearer token
    pub token: String,

    /// Issue timestamp (Unix epoch seconds)
    pub issued_at: i64,
}

impl Session {
    pub fn new(role: Role, username: impl Into<String>, token: String) -> Self {
        Self {
            role,
            username: username.into(),
            token,
            issued_at: chrono::Utc::now().timestamp(),
        }
    }
}
