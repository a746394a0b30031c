//! Login session controller: form state plus the submission state machine.
//!
//! ```text
//! Idle → Validating → (CaptchaCheck) → Submitting → {Success, Failure} → Idle
//! ```
//!
//! Submission is split in two so the caller can keep the form disabled while
//! the authentication call is outstanding: [`LoginSessionController::begin_submit`]
//! runs the local checks and hands out a [`PendingLogin`], and
//! [`LoginSessionController::complete_submit`] applies the backend result.

use portal_common::{Field, Role, RoleProfile, Session};

use super::auth::AuthError;
use super::error::LoginError;
use super::strength::{PasswordStrength, score_password};
use super::validate::{FieldErrors, validate_credentials};
use crate::captcha::{CaptchaChallenge, CaptchaGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    CaptchaCheck,
    Submitting,
    Success,
    Failure,
}

/// Bookkeeping for the form as a whole
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSession {
    pub failed_attempts: u32,
    pub field_errors: FieldErrors,
    /// Top-level error banner
    pub last_error: Option<String>,
    /// Network banner with a retry action
    pub network_error: bool,
    /// Acknowledgement after a successful sign-in
    pub notice: Option<String>,
    pub disabled: bool,
    pub loading: bool,
}

/// Credentials captured for the one outstanding authentication call.
///
/// Only [`LoginSessionController::begin_submit`] can create one.
#[derive(Debug)]
pub struct PendingLogin {
    role: Role,
    username: String,
    password: String,
}

impl PendingLogin {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

pub struct LoginSessionController {
    role: Role,
    username: String,
    password: String,
    remember_me: bool,
    show_password: bool,
    generator: CaptchaGenerator,
    captcha: CaptchaChallenge,
    captcha_active: bool,
    form: FormSession,
    phase: SubmitPhase,
    shake: Option<Field>,
    session: Option<Session>,
}

impl LoginSessionController {
    pub fn new(generator: CaptchaGenerator, captcha_required: bool) -> Self {
        let captcha = generator.generate();
        Self {
            role: Role::default(),
            username: String::new(),
            password: String::new(),
            remember_me: false,
            show_password: false,
            generator,
            captcha,
            captcha_active: captcha_required,
            form: FormSession::default(),
            phase: SubmitPhase::Idle,
            shake: None,
            session: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn profile(&self) -> RoleProfile {
        self.role.profile()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn captcha(&self) -> &CaptchaChallenge {
        &self.captcha
    }

    pub fn captcha_active(&self) -> bool {
        self.captcha_active
    }

    pub fn form(&self) -> &FormSession {
        &self.form
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Field the front-end should shake after a failed validation
    pub fn shake(&self) -> Option<Field> {
        self.shake
    }

    pub fn clear_shake(&mut self) {
        self.shake = None;
    }

    /// Session from the last successful sign-in
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn password_strength(&self) -> PasswordStrength {
        score_password(&self.password)
    }

    pub fn is_busy(&self) -> bool {
        self.form.disabled
    }

    fn ensure_editable(&self) -> Result<(), LoginError> {
        if self.form.disabled {
            return Err(LoginError::FormBusy);
        }
        Ok(())
    }

    fn transition(&mut self, to: SubmitPhase) {
        tracing::trace!(from = ?self.phase, to = ?to, "Login phase transition");
        self.phase = to;
    }

    /// Switch role; clears the username and every error, keeps password and captcha
    pub fn select_role(&mut self, role: Role) -> Result<(), LoginError> {
        self.ensure_editable()?;

        self.role = role;
        self.username.clear();
        self.form.field_errors.clear();
        self.form.last_error = None;

        tracing::debug!(role = %role, "Role selected");
        Ok(())
    }

    pub fn set_username(&mut self, value: impl Into<String>) -> Result<(), LoginError> {
        self.ensure_editable()?;
        self.username = value.into();
        self.form.field_errors.remove(Field::Username);
        Ok(())
    }

    pub fn set_password(&mut self, value: impl Into<String>) -> Result<(), LoginError> {
        self.ensure_editable()?;
        self.password = value.into();
        self.form.field_errors.remove(Field::Password);
        Ok(())
    }

    pub fn set_captcha_input(&mut self, value: impl Into<String>) -> Result<(), LoginError> {
        self.ensure_editable()?;
        self.captcha.user_input = value.into();
        Ok(())
    }

    pub fn toggle_remember_me(&mut self) -> Result<bool, LoginError> {
        self.ensure_editable()?;
        self.remember_me = !self.remember_me;
        Ok(self.remember_me)
    }

    pub fn toggle_show_password(&mut self) -> Result<bool, LoginError> {
        self.ensure_editable()?;
        self.show_password = !self.show_password;
        Ok(self.show_password)
    }

    /// Manual refresh of the captcha challenge
    pub fn refresh_captcha(&mut self) -> Result<(), LoginError> {
        self.ensure_editable()?;
        self.regenerate_captcha();
        Ok(())
    }

    fn regenerate_captcha(&mut self) {
        self.captcha = self.generator.regenerate(&self.captcha.code);
    }

    /// Close the top-level error banner
    pub fn dismiss_error(&mut self) {
        self.form.last_error = None;
    }

    /// Run the local checks and, if they pass, disable the form and hand out
    /// the credentials for the authentication call.
    pub fn begin_submit(&mut self) -> Result<PendingLogin, LoginError> {
        self.ensure_editable()?;

        self.form.last_error = None;
        self.form.network_error = false;
        self.form.notice = None;
        self.shake = None;

        self.transition(SubmitPhase::Validating);
        if let Err(errors) = validate_credentials(&self.username, &self.password) {
            self.shake = errors.first();
            self.form.field_errors = errors.clone();
            self.transition(SubmitPhase::Idle);

            tracing::debug!(invalid_fields = errors.len(), "Login form validation failed");
            return Err(LoginError::FieldValidation(errors));
        }
        self.form.field_errors.clear();

        if self.captcha_active {
            self.transition(SubmitPhase::CaptchaCheck);
            if !self.captcha.is_solved() {
                let err = LoginError::CaptchaMismatch;
                self.form.last_error = Some(err.to_string());
                self.regenerate_captcha();
                self.transition(SubmitPhase::Idle);

                tracing::debug!("Captcha mismatch, challenge regenerated");
                return Err(err);
            }
        }

        self.transition(SubmitPhase::Submitting);
        self.form.disabled = true;
        self.form.loading = true;

        tracing::debug!(role = %self.role, "Submitting credentials");

        Ok(PendingLogin {
            role: self.role,
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Apply the backend's answer for `pending` and return the form to idle.
    pub fn complete_submit(
        &mut self,
        pending: PendingLogin,
        result: Result<Session, AuthError>,
    ) -> Result<Session, LoginError> {
        self.form.disabled = false;
        self.form.loading = false;

        let outcome = match result {
            Ok(session) => {
                self.transition(SubmitPhase::Success);
                self.form.notice = Some(format!("Login Successful as {}!", pending.role));
                self.session = Some(session.clone());

                tracing::info!(role = %pending.role, "Login succeeded");
                Ok(session)
            }
            Err(AuthError::InvalidCredentials) => {
                self.transition(SubmitPhase::Failure);
                let err = LoginError::InvalidCredentials;
                self.form.failed_attempts += 1;
                self.form.last_error = Some(err.to_string());
                self.password.clear();
                self.captcha_active = true;
                self.regenerate_captcha();

                tracing::warn!(
                    role = %pending.role,
                    failed_attempts = self.form.failed_attempts,
                    "Login rejected"
                );
                Err(err)
            }
            Err(AuthError::Network(reason)) => {
                self.transition(SubmitPhase::Failure);
                self.form.network_error = true;

                tracing::warn!(role = %pending.role, reason = %reason, "Login backend unreachable");
                Err(LoginError::Network(reason))
            }
        };

        self.transition(SubmitPhase::Idle);
        outcome
    }

    /// Retry action of the network banner: resubmit the unchanged form.
    ///
    /// Only available while the banner is up.
    pub fn begin_retry(&mut self) -> Result<PendingLogin, LoginError> {
        self.ensure_editable()?;
        if !self.form.network_error {
            return Err(LoginError::NoRetryPending);
        }
        tracing::debug!(role = %self.role, "Retrying after network error");
        self.begin_submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login::{Authenticator, MockAuthenticator};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Full attempt against `auth`, the way the screen drives it
    async fn submit(
        c: &mut LoginSessionController,
        auth: &dyn Authenticator,
    ) -> Result<Session, LoginError> {
        let pending = c.begin_submit()?;
        let result = auth
            .authenticate(pending.role(), pending.username(), pending.password())
            .await;
        c.complete_submit(pending, result)
    }

    fn controller() -> LoginSessionController {
        LoginSessionController::new(CaptchaGenerator::default(), true)
    }

    fn mock() -> MockAuthenticator {
        MockAuthenticator::new(Duration::from_millis(1800))
    }

    fn fill(c: &mut LoginSessionController, username: &str, password: &str) {
        c.set_username(username).unwrap();
        c.set_password(password).unwrap();
        let code = c.captcha().code.to_lowercase();
        c.set_captcha_input(code).unwrap();
    }

    struct Unreachable;

    #[async_trait]
    impl Authenticator for Unreachable {
        async fn authenticate(
            &self,
            _role: Role,
            _username: &str,
            _password: &str,
        ) -> Result<Session, AuthError> {
            Err(AuthError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentinel_credentials_succeed() {
        let mut c = controller();
        fill(&mut c, "test", "password");

        let session = submit(&mut c, &mock()).await.unwrap();
        assert_eq!(session.username, "test");
        assert_eq!(c.form().notice.as_deref(), Some("Login Successful as Student!"));
        assert_eq!(c.form().failed_attempts, 0);
        assert_eq!(c.phase(), SubmitPhase::Idle);
        assert!(!c.is_busy());
        assert!(c.session().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_credentials_fail() {
        let mut c = controller();
        fill(&mut c, "wrong", "password");
        let old_code = c.captcha().code.clone();

        let err = submit(&mut c, &mock()).await.unwrap_err();
        assert_eq!(err, LoginError::InvalidCredentials);
        assert_ne!(c.captcha().code, old_code);
        assert_eq!(c.form().failed_attempts, 1);
        assert_eq!(c.password(), "");
        assert_eq!(c.username(), "wrong");
        assert!(c.captcha().user_input.is_empty());
        assert!(c.captcha_active());
        assert_eq!(c.form().last_error, Some(LoginError::InvalidCredentials.to_string()));
        assert!(!c.form().disabled);
        assert!(!c.form().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_regenerates_challenge() {
        let mut c = controller();
        for _ in 0..5 {
            fill(&mut c, "wrong", "password");
            let before = c.captcha().code.clone();
            let _ = submit(&mut c, &mock()).await;
            assert_ne!(c.captcha().code, before);
        }
        assert_eq!(c.form().failed_attempts, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_captcha_mismatch_does_not_count_attempt() {
        let mut c = controller();
        c.set_username("test").unwrap();
        c.set_password("password").unwrap();
        c.set_captcha_input("!!!!!").unwrap();
        let old_code = c.captcha().code.clone();

        let err = submit(&mut c, &mock()).await.unwrap_err();
        assert_eq!(err, LoginError::CaptchaMismatch);
        assert_ne!(c.captcha().code, old_code);
        assert_eq!(c.form().failed_attempts, 0);
        assert_eq!(c.form().last_error.as_deref(), Some("Invalid captcha. Please try again."));
        assert!(c.captcha().user_input.is_empty());
        assert_eq!(c.password(), "password");
        assert!(!c.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_captcha_skipped_when_inactive() {
        let mut c = LoginSessionController::new(CaptchaGenerator::default(), false);
        c.set_username("test").unwrap();
        c.set_password("password").unwrap();
        assert!(submit(&mut c, &mock()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_arms_captcha_when_inactive() {
        let mut c = LoginSessionController::new(CaptchaGenerator::default(), false);
        c.set_username("wrong").unwrap();
        c.set_password("password").unwrap();
        let _ = submit(&mut c, &mock()).await;
        assert!(c.captcha_active());

        c.set_password("password").unwrap();
        assert_eq!(submit(&mut c, &mock()).await.unwrap_err(), LoginError::CaptchaMismatch);
    }

    #[test]
    fn test_validation_reports_both_fields_and_shakes_username() {
        let mut c = controller();
        c.set_username(" x ").unwrap();
        c.set_password("abc").unwrap();

        match c.begin_submit() {
            Err(LoginError::FieldValidation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(c.shake(), Some(Field::Username));
        assert_eq!(c.form().field_errors.len(), 2);
        assert_eq!(c.phase(), SubmitPhase::Idle);
        assert!(!c.is_busy());
    }

    #[test]
    fn test_validation_shakes_password_when_username_ok() {
        let mut c = controller();
        c.set_username("test").unwrap();
        assert!(c.begin_submit().is_err());
        assert_eq!(c.shake(), Some(Field::Password));
    }

    #[test]
    fn test_editing_field_clears_its_error_only() {
        let mut c = controller();
        let _ = c.begin_submit();
        assert_eq!(c.form().field_errors.len(), 2);

        c.set_username("ab").unwrap();
        assert!(c.form().field_errors.get(Field::Username).is_none());
        assert!(c.form().field_errors.get(Field::Password).is_some());
    }

    #[test]
    fn test_role_switch_clears_username_and_errors() {
        let mut c = controller();
        c.set_username("abc").unwrap();
        c.set_password("ab").unwrap();
        c.set_captcha_input("XY").unwrap();
        let code = c.captcha().code.clone();
        assert!(c.begin_submit().is_err());
        assert!(c.form().field_errors.get(Field::Password).is_some());

        c.select_role(Role::Faculty).unwrap();
        assert_eq!(c.role(), Role::Faculty);
        assert_eq!(c.username(), "");
        assert!(c.form().field_errors.is_empty());
        assert!(c.form().last_error.is_none());
        assert_eq!(c.password(), "ab");
        assert_eq!(c.captcha().code, code);
        assert_eq!(c.captcha().user_input, "XY");
        assert_eq!(c.profile().label, "Faculty ID / KTU ID");
    }

    #[test]
    fn test_in_flight_blocks_edits_and_second_submit() {
        let mut c = controller();
        fill(&mut c, "test", "password");

        let pending = c.begin_submit().unwrap();
        assert_eq!(c.phase(), SubmitPhase::Submitting);
        assert!(c.form().loading);
        assert_eq!(c.begin_submit().unwrap_err(), LoginError::FormBusy);
        assert_eq!(c.set_username("x").unwrap_err(), LoginError::FormBusy);
        assert_eq!(c.select_role(Role::Admin).unwrap_err(), LoginError::FormBusy);
        assert_eq!(c.refresh_captcha().unwrap_err(), LoginError::FormBusy);

        let result = c.complete_submit(pending, Err(AuthError::InvalidCredentials));
        assert!(result.is_err());
        assert!(c.set_username("x").is_ok());
        assert_eq!(c.role(), Role::Student);
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_error_keeps_form_and_allows_retry() {
        let mut c = controller();
        fill(&mut c, "test", "password");

        let err = submit(&mut c, &Unreachable).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(c.form().network_error);
        assert_eq!(c.form().failed_attempts, 0);
        assert_eq!(c.password(), "password");
        assert!(c.captcha().is_solved());

        let pending = c.begin_retry().unwrap();
        assert!(!c.form().network_error);
        assert_eq!(pending.username(), "test");
        assert!(c.is_busy());

        let result = mock()
            .authenticate(pending.role(), pending.username(), pending.password())
            .await;
        let session = c.complete_submit(pending, result).unwrap();
        assert_eq!(session.role, Role::Student);
    }

    #[test]
    fn test_retry_requires_network_banner() {
        let mut c = controller();
        fill(&mut c, "test", "password");

        assert_eq!(c.begin_retry().unwrap_err(), LoginError::NoRetryPending);
        assert_eq!(c.phase(), SubmitPhase::Idle);
        assert!(!c.is_busy());
    }

    #[test]
    fn test_refresh_and_toggles() {
        let mut c = controller();
        c.set_captcha_input("abc").unwrap();
        c.refresh_captcha().unwrap();
        assert!(c.captcha().user_input.is_empty());

        assert!(c.toggle_remember_me().unwrap());
        assert!(c.toggle_show_password().unwrap());
        assert!(!c.toggle_show_password().unwrap());
    }

    #[test]
    fn test_password_strength_follows_field() {
        let mut c = controller();
        assert_eq!(c.password_strength().level, 0);
        c.set_password("Abcdef1!").unwrap();
        assert_eq!(c.password_strength().label, "Very Strong");
    }
}
