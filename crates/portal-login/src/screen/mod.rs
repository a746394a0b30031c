//! Line-oriented terminal front-end.
//!
//! Reads one command per line from stdin and re-renders after every event.
//! Every line counts as key-down activity for the idle timer.

mod command;
mod render;

pub use command::{Command, HELP};

use anyhow::Result;
use portal_common::{ActivityEvent, Session};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::login::{AuthError, Authenticator, LoginError, PendingLogin};
use crate::shell::Shell;

type AuthFuture = Pin<Box<dyn Future<Output = Result<Session, AuthError>> + Send>>;

/// The one outstanding authentication call
struct InFlight {
    pending: PendingLogin,
    call: AuthFuture,
}

#[derive(Debug, Clone, Copy)]
enum Attempt {
    Fresh,
    /// From the network banner
    Retry,
}

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Screen {
    shell: Shell,
    auth: Arc<dyn Authenticator>,
    in_flight: Option<InFlight>,
}

impl Screen {
    pub fn new(shell: Shell, auth: Arc<dyn Authenticator>) -> Self {
        Self {
            shell,
            auth,
            in_flight: None,
        }
    }

    /// Drive the screen until `quit`, end of input, or Ctrl+C
    pub async fn run(mut self) -> Result<()> {
        println!("{}", render::branding_panel(self.shell.theme()));
        self.draw();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let idle_expired = self.shell.idle().expired();

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("Input closed");
                        break;
                    };
                    self.shell.record_activity(ActivityEvent::KeyDown);
                    if self.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                result = poll_in_flight(&mut self.in_flight) => {
                    self.finish(result);
                }
                _ = idle_expired => {
                    self.shell.check_idle();
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("🛑 Shutdown signal received");
                    break;
                }
            }

            self.draw();
        }

        Ok(())
    }

    fn draw(&mut self) {
        println!("{}", render::screen(&self.shell));
        // The shake cue is shown once
        if let Some(form) = self.shell.form_mut() {
            form.clear_shake();
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match line.parse::<Command>() {
            Ok(command) => self.apply(command),
            Err(e) => {
                println!("{e}");
                Flow::Continue
            }
        }
    }

    fn apply(&mut self, command: Command) -> Flow {
        let result = match command {
            Command::Quit => return Flow::Quit,
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::ToggleTheme => {
                let theme = self.shell.toggle_theme();
                println!("Theme: {}", theme.as_str());
                Ok(())
            }
            Command::Dismiss if self.shell.session_expired() => {
                self.shell.dismiss_expiry();
                Ok(())
            }
            Command::Submit => self.start_submit(Attempt::Fresh),
            Command::Retry => self.start_submit(Attempt::Retry),
            command => self.edit(command),
        };

        if let Err(e @ (LoginError::FormBusy | LoginError::NoRetryPending)) = result {
            println!("{e}");
        }
        Flow::Continue
    }

    /// Field edits and form toggles
    fn edit(&mut self, command: Command) -> Result<(), LoginError> {
        let Some(form) = self.shell.form_mut() else {
            println!("Session expired. Type 'dismiss' to continue.");
            return Ok(());
        };

        match command {
            Command::Role(role) => form.select_role(role),
            Command::Username(value) => form.set_username(value),
            Command::Password(value) => form.set_password(value),
            Command::Captcha(value) => form.set_captcha_input(value),
            Command::RefreshCaptcha => form.refresh_captcha(),
            Command::ShowPassword => form.toggle_show_password().map(|_| ()),
            Command::RememberMe => form.toggle_remember_me().map(|_| ()),
            Command::Dismiss => {
                form.dismiss_error();
                Ok(())
            }
            Command::Submit | Command::Retry | Command::ToggleTheme | Command::Help | Command::Quit => Ok(()),
        }
    }

    /// Local checks, then hand the credentials to the backend
    fn start_submit(&mut self, attempt: Attempt) -> Result<(), LoginError> {
        let Some(form) = self.shell.form_mut() else {
            println!("Session expired. Type 'dismiss' to continue.");
            return Ok(());
        };
        let begun = match attempt {
            Attempt::Fresh => form.begin_submit(),
            Attempt::Retry => form.begin_retry(),
        };
        // Rejections land in the form state and are rendered from there
        let pending = match begun {
            Ok(pending) => pending,
            Err(e @ (LoginError::FormBusy | LoginError::NoRetryPending)) => return Err(e),
            Err(_) => return Ok(()),
        };

        let auth = self.auth.clone();
        let role = pending.role();
        let username = pending.username().to_string();
        let password = pending.password().to_string();
        let call: AuthFuture =
            Box::pin(async move { auth.authenticate(role, &username, &password).await });

        self.in_flight = Some(InFlight { pending, call });
        Ok(())
    }

    fn finish(&mut self, result: Result<Session, AuthError>) {
        let Some(InFlight { pending, .. }) = self.in_flight.take() else {
            return;
        };
        match self.shell.form_for_result().complete_submit(pending, result) {
            Ok(session) => {
                tracing::info!(role = %session.role, issued_at = session.issued_at, "Session issued");
            }
            Err(e) if e.is_retryable() => {
                tracing::debug!(error = %e, "Submission can be retried");
            }
            Err(_) => {}
        }
    }
}

async fn poll_in_flight(in_flight: &mut Option<InFlight>) -> Result<Session, AuthError> {
    match in_flight {
        Some(f) => (&mut f.call).await,
        None => std::future::pending().await,
    }
}
