//! Inactivity countdown owned by the shell.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Resettable one-deadline timer.
///
/// Holds only the deadline; callers await [`IdleTimer::expired`] alongside
/// their other events and call [`IdleTimer::reset`] on activity.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl IdleTimer {
    /// Create a disarmed timer
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadline: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arm the countdown from now
    pub fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.timeout);
    }

    /// Restart the countdown; arms a disarmed timer as well
    pub fn reset(&mut self) {
        self.start();
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time left before expiry, if armed
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn has_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves at the current deadline; never resolves while disarmed.
    ///
    /// The future captures the deadline, so a later reset needs a fresh call.
    pub fn expired(&self) -> impl Future<Output = ()> + Send + 'static {
        let deadline = self.deadline;
        async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        }
    }
}
