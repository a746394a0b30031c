//! Typed commands of the terminal front-end.

use portal_common::{PortalError, Role};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Role(Role),
    Username(String),
    Password(String),
    Captcha(String),
    RefreshCaptcha,
    ShowPassword,
    RememberMe,
    Submit,
    Retry,
    /// Close the error banner or the session-expired notice
    Dismiss,
    ToggleTheme,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  role <student|faculty|admin>   switch login role
  user <id>                      set university ID
  pass <password>                set password
  captcha <code>                 type the captcha
  refresh                        new captcha
  show                           show/hide password
  remember                       toggle remember me
  login                          sign in
  retry                          retry after a network error
  dismiss                        close banner / session notice
  theme                          toggle dark mode
  help | quit";

impl FromStr for Command {
    type Err = PortalError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest),
            None => (line.trim_end(), ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "role" => Command::Role(rest.parse()?),
            // Field values keep inner whitespace; only the line ending goes
            "user" => Command::Username(rest.trim_end_matches(['\r', '\n']).to_string()),
            "pass" => Command::Password(rest.trim_end_matches(['\r', '\n']).to_string()),
            "captcha" => Command::Captcha(rest.trim().to_string()),
            "refresh" => Command::RefreshCaptcha,
            "show" => Command::ShowPassword,
            "remember" => Command::RememberMe,
            "login" | "submit" => Command::Submit,
            "retry" => Command::Retry,
            "dismiss" | "ok" => Command::Dismiss,
            "theme" => Command::ToggleTheme,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(PortalError::InvalidInput("empty command".to_string())),
            other => {
                return Err(PortalError::InvalidInput(format!(
                    "unknown command '{other}' (try 'help')"
                )));
            }
        };
        Ok(command)
    }
}
