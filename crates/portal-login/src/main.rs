//! # Portal Login - University e-Governance sign-in screen
//!
//! Terminal rendition of the portal's login page: branding panel, role-switch
//! login form with captcha, and a session-timeout notice.
//!
//! ## Architecture
//! ```text
//! stdin → Screen → Shell (theme, idle timer) → LoginSessionController → Authenticator
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod captcha;
mod config;
mod login;
mod screen;
mod shell;

use captcha::CaptchaGenerator;
use config::AppConfig;
use login::{LoginSessionController, MockAuthenticator, TimeoutAuthenticator};
use screen::Screen;
use shell::{Shell, ThemeStore};

/// University portal login screen
#[derive(Parser, Debug)]
#[command(name = "portal-login")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/portal.toml")]
    config: String,

    /// Inactivity timeout in seconds (overrides config)
    #[arg(long, env = "IDLE_TIMEOUT_SECS")]
    idle_timeout_secs: Option<u64>,

    /// Theme preferences file (overrides config)
    #[arg(long, env = "PREFS_PATH")]
    prefs_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("🎓 Starting portal login v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    info!(
        idle_timeout_secs = config.session.idle_timeout_secs,
        captcha_required = config.login.captcha_required,
        "📋 Configuration loaded"
    );

    let form = LoginSessionController::new(CaptchaGenerator::default(), config.login.captcha_required);
    let shell = Shell::new(
        ThemeStore::new(&config.theme.prefs_path),
        config.session.idle_timeout(),
        form,
    );
    let auth = Arc::new(TimeoutAuthenticator::new(
        MockAuthenticator::new(config.login.submit_delay()),
        config.login.auth_timeout(),
    ));

    Screen::new(shell, auth).run().await?;

    info!("👋 Portal login closed");
    Ok(())
}

/// Initialize structured logging with tracing.
///
/// Logs go to stderr so they never interleave with the rendered screen.
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
