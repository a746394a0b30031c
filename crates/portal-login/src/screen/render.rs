//! Text rendering of the branding panel, login form and session notice.

use portal_common::constants::{branding, support};
use portal_common::{Field, Theme};
use std::fmt::Write;

use crate::login::{LoginSessionController, SubmitPhase};
use crate::shell::Shell;

/// ANSI colours for one theme
struct Palette {
    accent: &'static str,
    text: &'static str,
    muted: &'static str,
    error: &'static str,
    success: &'static str,
    warning: &'static str,
}

const RESET: &str = "\x1b[0m";

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                accent: "\x1b[34m",
                text: "\x1b[30m",
                muted: "\x1b[90m",
                error: "\x1b[31m",
                success: "\x1b[32m",
                warning: "\x1b[33m",
            },
            Theme::Dark => Self {
                accent: "\x1b[93m",
                text: "\x1b[97m",
                muted: "\x1b[37m",
                error: "\x1b[91m",
                success: "\x1b[92m",
                warning: "\x1b[93m",
            },
        }
    }
}

pub fn branding_panel(theme: Theme) -> String {
    let p = Palette::for_theme(theme);
    let mut out = String::new();
    let _ = writeln!(out, "{}{}{}", p.accent, branding::UNIVERSITY, RESET);
    for feature in branding::FEATURES {
        let _ = writeln!(out, "  {}✓{} {}", p.success, RESET, feature);
    }
    let _ = writeln!(out, "{}{}{}", p.muted, branding::COPYRIGHT, RESET);
    out
}

pub fn screen(shell: &Shell) -> String {
    let p = Palette::for_theme(shell.theme());
    if shell.session_expired() {
        return format!(
            "{}Session expired{}\nYou have been inactive for a while. Type 'dismiss' to continue.\n",
            p.warning, RESET
        );
    }
    form(shell.form(), &p)
}

fn form(form: &LoginSessionController, p: &Palette) -> String {
    let state = form.form();
    let profile = form.profile();
    let mut out = String::new();

    if let Some(notice) = &state.notice {
        let _ = writeln!(out, "{}{}{}", p.success, notice, RESET);
    }
    if let Some(session) = form.session() {
        let _ = writeln!(out, "{}Signed in: {} ({}){}", p.muted, session.username, session.role, RESET);
    }
    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "{}! {}{}  (dismiss)", p.error, error, RESET);
    }
    if state.network_error {
        let _ = writeln!(
            out,
            "{}Network error. Please check your connection.{}  (retry)",
            p.warning, RESET
        );
    }

    let _ = writeln!(out, "{}{}{}", p.text, branding::PORTAL_TITLE, RESET);
    let _ = writeln!(out, "{}{}{}", p.muted, profile.subtitle, RESET);

    let roles: Vec<String> = portal_common::Role::ALL
        .iter()
        .map(|r| {
            if *r == form.role() {
                format!("{}[{}]{}", p.accent, r, RESET)
            } else {
                format!(" {} ", r)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", roles.join(" "));

    let username = if form.username().is_empty() {
        format!("{}{}{}", p.muted, profile.placeholder, RESET)
    } else {
        form.username().to_string()
    };
    let _ = writeln!(out, "{}: {}{}", profile.label, username, shake_mark(form, Field::Username));
    field_error(&mut out, form, Field::Username, p);

    let password = if form.show_password() {
        form.password().to_string()
    } else {
        "•".repeat(form.password().chars().count())
    };
    let _ = writeln!(out, "Password: {}{}", password, shake_mark(form, Field::Password));
    field_error(&mut out, form, Field::Password, p);

    let strength = form.password_strength();
    if strength.level > 0 {
        let filled = usize::from(strength.level / 20);
        let _ = writeln!(
            out,
            "  strength: {}{} {}",
            "█".repeat(filled),
            "░".repeat(5 - filled),
            strength.label
        );
    }

    if form.captcha_active() {
        let _ = writeln!(
            out,
            "Captcha: {}{}{}  typed: {}",
            p.accent,
            form.captcha().render(),
            RESET,
            form.captcha().user_input
        );
    }

    let _ = writeln!(
        out,
        "[{}] Remember me",
        if form.remember_me() { "x" } else { " " }
    );

    if form.phase() == SubmitPhase::Submitting {
        let _ = writeln!(out, "{}Signing in...{}", p.muted, RESET);
    }
    if state.failed_attempts > 0 {
        let _ = writeln!(out, "{}Failed attempts: {}{}", p.muted, state.failed_attempts, RESET);
    }

    let _ = writeln!(out, "{}Need help? {} | {}{}", p.muted, support::EMAIL, support::PHONE, RESET);
    out
}

fn shake_mark(form: &LoginSessionController, field: Field) -> &'static str {
    if form.shake() == Some(field) { "  <<" } else { "" }
}

fn field_error(out: &mut String, form: &LoginSessionController, field: Field, p: &Palette) {
    if let Some(message) = form.form().field_errors.message(field) {
        let _ = writeln!(out, "  {}{}{}", p.error, message, RESET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captcha::CaptchaGenerator;
    use crate::shell::ThemeStore;
    use std::time::Duration;

    fn shell(dir: &tempfile::TempDir) -> Shell {
        let form = LoginSessionController::new(CaptchaGenerator::default(), true);
        Shell::new(ThemeStore::new(dir.path().join("prefs.json")), Duration::from_secs(600), form)
    }

    #[tokio::test]
    async fn test_form_shows_role_labels_and_captcha() {
        let dir = tempfile::tempdir().unwrap();
        let shell = shell(&dir);
        let text = screen(&shell);

        assert!(text.contains("University ID / Register Number"));
        assert!(text.contains("e.g. TVA20CS045"));
        assert!(text.contains(&shell.form().captcha().render()));
        assert!(text.contains(support::EMAIL));
    }

    #[tokio::test]
    async fn test_password_is_masked_until_shown() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(&dir);
        let form = shell.form_mut().unwrap();
        form.set_password("hunter22").unwrap();

        let text = screen(&shell);
        assert!(!text.contains("hunter22"));
        assert!(text.contains("••••••••"));
        assert!(text.contains("Good"));

        shell.form_mut().unwrap().toggle_show_password().unwrap();
        assert!(screen(&shell).contains("hunter22"));
    }

    #[tokio::test]
    async fn test_field_errors_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(&dir);
        let _ = shell.form_mut().unwrap().begin_submit();

        let text = screen(&shell);
        assert!(text.contains("University ID is required"));
        assert!(text.contains("Password is required"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_signed_in_session_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(&dir);
        let form = shell.form_mut().unwrap();
        form.set_username("test").unwrap();
        form.set_password("password").unwrap();
        let code = form.captcha().code.clone();
        form.set_captcha_input(code).unwrap();
        let pending = form.begin_submit().unwrap();
        let session = portal_common::Session::new(pending.role(), pending.username(), "token".to_string());
        form.complete_submit(pending, Ok(session)).unwrap();

        let text = screen(&shell);
        assert!(text.contains("Login Successful as Student!"));
        assert!(text.contains("Signed in: test (Student)"));
    }

    #[tokio::test]
    async fn test_expired_notice_replaces_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = shell(&dir);
        shell.expire();

        let text = screen(&shell);
        assert!(text.contains("Session expired"));
        assert!(!text.contains("Password:"));
    }

    #[test]
    fn test_branding_lists_features() {
        let text = branding_panel(Theme::Dark);
        for feature in branding::FEATURES {
            assert!(text.contains(feature));
        }
    }
}
