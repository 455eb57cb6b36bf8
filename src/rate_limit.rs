//! Client-side admission control for outbound API requests.
//!
//! Etherscan enforces a per-key requests-per-second ceiling; this module
//! enforces the same ceiling locally so a burst of concurrent calls is
//! spread across one-second windows instead of being rejected remotely.

use parking_lot::RwLock;
use std::{num::NonZeroU32, sync::Arc};
use tokio::{
    sync::Mutex,
    time::{sleep_until, Duration, Instant},
};

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug)]
struct Config {
    enabled: bool,
    max_per_second: NonZeroU32,
}

/// Admission window state.
///
/// `reset_at` doubles as the single live reset handle: it is `Some` exactly
/// while a window is open, and clearing it is the window reset.
#[derive(Debug, Default)]
struct Window {
    admitted: u32,
    reset_at: Option<Instant>,
}

/// Shared admission gate for all calls going through one [`Client`].
///
/// Waiters queue on a fair async mutex, so calls are admitted strictly in
/// arrival order; a caller that fills the window sleeps on the reset
/// deadline while holding the guard, which defers everything queued behind
/// it until the next window opens.
///
/// [`Client`]: crate::Client
#[derive(Clone, Debug)]
pub(crate) struct RateLimiter {
    config: Arc<RwLock<Config>>,
    window: Arc<Mutex<Window>>,
}

impl RateLimiter {
    pub(crate) fn new(enabled: bool, max_per_second: NonZeroU32) -> Self {
        Self {
            config: Arc::new(RwLock::new(Config { enabled, max_per_second })),
            window: Arc::new(Mutex::new(Window::default())),
        }
    }

    /// Replace the admission configuration.
    ///
    /// Takes effect for calls admitted after this write; a caller already
    /// sleeping on the window deadline finishes under the configuration it
    /// captured at admission.
    pub(crate) fn configure(&self, enabled: bool, max_per_second: NonZeroU32) {
        *self.config.write() = Config { enabled, max_per_second };
    }

    /// Wait until this call may start its transport step.
    ///
    /// When rate limiting is disabled this returns without touching the
    /// admission queue, so bypassed calls are never delayed by callers that
    /// are still draining a saturated window.
    pub(crate) async fn acquire(&self) {
        let max = {
            let config = self.config.read();
            if !config.enabled {
                return;
            }
            config.max_per_second.get()
        };

        let mut window = self.window.lock().await;

        let now = Instant::now();
        if matches!(window.reset_at, Some(reset) if now >= reset) {
            window.admitted = 0;
            window.reset_at = None;
        }

        if window.admitted >= max {
            if let Some(reset) = window.reset_at {
                sleep_until(reset).await;
            }
            window.admitted = 0;
            window.reset_at = None;
        }

        if window.reset_at.is_none() {
            window.reset_at = Some(Instant::now() + WINDOW);
        }
        window.admitted += 1;
    }
}
