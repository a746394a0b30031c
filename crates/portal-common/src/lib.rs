//! # Portal Common
//!
//! Shared types, errors, and constants used by the portal login screen.
//!
//! ## Modules
//! - `types` - Core data structures (Role, Theme, Session, etc.)
//! - `error` - Common error types
//! - `constants` - Shared configuration constants

pub mod constants;
pub mod error;
pub mod types;

pub use error::PortalError;
pub use types::*;
