//! Page chrome around the login form.
//!
//! Owns the theme flag, the inactivity timer and the session-expired notice.
//! Business logic stays in [`LoginSessionController`]; the shell only gates
//! access to it while the notice is up.

mod idle;
mod theme;

pub use idle::IdleTimer;
pub use theme::ThemeStore;

use portal_common::{ActivityEvent, Theme};
use std::time::Duration;

use crate::login::LoginSessionController;

pub struct Shell {
    theme: Theme,
    prefs: ThemeStore,
    idle: IdleTimer,
    session_expired: bool,
    form: LoginSessionController,
}

impl Shell {
    /// Build the shell with the persisted (or OS) theme and an armed idle timer
    pub fn new(prefs: ThemeStore, idle_timeout: Duration, form: LoginSessionController) -> Self {
        let theme = prefs.initial_theme();
        let mut idle = IdleTimer::new(idle_timeout);
        idle.start();

        tracing::debug!(theme = theme.as_str(), idle_timeout_secs = idle_timeout.as_secs(), "Shell ready");

        Self {
            theme,
            prefs,
            idle,
            session_expired: false,
            form,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it. A failed write keeps the new theme for
    /// this run only.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.prefs.save(self.theme) {
            tracing::warn!(
                error = %e,
                path = %self.prefs.path().display(),
                "Failed to persist theme preference"
            );
        }
        self.theme
    }

    pub fn idle(&self) -> &IdleTimer {
        &self.idle
    }

    /// Qualifying user activity restarts the countdown.
    ///
    /// Ignored while the expiry notice is shown; only dismissal re-arms.
    pub fn record_activity(&mut self, event: ActivityEvent) {
        if self.session_expired {
            return;
        }
        tracing::trace!(
            event = ?event,
            remaining_secs = self.idle.remaining().map(|d| d.as_secs()),
            "User activity"
        );
        self.idle.reset();
    }

    /// Raise the session-expired notice. In-flight submissions are unaffected.
    pub fn expire(&mut self) {
        if self.session_expired {
            return;
        }
        self.session_expired = true;
        self.idle.cancel();

        tracing::info!(
            idle_timeout_secs = self.idle.timeout().as_secs(),
            submitting = self.form.is_busy(),
            "Session expired after inactivity"
        );
    }

    /// Expire if the countdown has already run out; returns whether the notice is up
    pub fn check_idle(&mut self) -> bool {
        if self.idle.has_expired() {
            self.expire();
        }
        self.session_expired
    }

    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    /// Hide the notice and re-arm the countdown; form state is kept
    pub fn dismiss_expiry(&mut self) {
        if !self.session_expired {
            return;
        }
        self.session_expired = false;
        self.idle.start();
        tracing::debug!("Session expiry dismissed");
    }

    pub fn form(&self) -> &LoginSessionController {
        &self.form
    }

    /// The form, unless the session-expired notice is blocking it
    pub fn form_mut(&mut self) -> Option<&mut LoginSessionController> {
        if self.session_expired {
            None
        } else {
            Some(&mut self.form)
        }
    }

    /// Form access that bypasses the notice, for delivering an in-flight result
    pub(crate) fn form_for_result(&mut self) -> &mut LoginSessionController {
        &mut self.form
    }
}
