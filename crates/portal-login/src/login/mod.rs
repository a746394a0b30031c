//! Login form core: field validation, password strength, the submission
//! state machine, and the authentication seam it calls into.

mod auth;
mod controller;
mod error;
mod strength;
mod validate;

pub use auth::{AuthError, Authenticator, MockAuthenticator, TimeoutAuthenticator};
pub use controller::{LoginSessionController, PendingLogin, SubmitPhase};
pub use error::LoginError;
