//! Cooldown gate for manual refreshes.
//!
//! Repeated manual refreshes inside the cooldown window degrade to a
//! cache-preserving fetch instead of being rejected outright. Only a
//! forced refresh resets the window; throttled ones never do.

use chrono::{DateTime, Duration, Utc};

/// Default cooldown window between forced refreshes: 5 minutes.
pub const DEFAULT_COOLDOWN_SECS: i64 = 300;

/// How a refresh request should be executed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Bypass upstream caches.
    Forced,
    /// Serve from upstream caches; no forced re-read.
    Cached,
}

#[derive(Debug, Clone)]
pub struct RefreshGate {
    window: Duration,
    last_forced: Option<DateTime<Utc>>,
}

impl RefreshGate {
    pub fn new(window_secs: i64) -> Self {
        Self {
            window: Duration::seconds(window_secs),
            last_forced: None,
        }
    }

    /// Decide how to execute a manual refresh requested at `now`.
    pub fn request(&mut self, now: DateTime<Utc>) -> RefreshMode {
        match self.last_forced {
            Some(last) if now - last < self.window => RefreshMode::Cached,
            _ => {
                self.last_forced = Some(now);
                RefreshMode::Forced
            }
        }
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn first_refresh_is_forced() {
        let mut gate = RefreshGate::new(300);
        assert_eq!(gate.request(at(0)), RefreshMode::Forced);
    }

    #[test]
    fn refresh_within_window_degrades_to_cached() {
        let mut gate = RefreshGate::new(300);
        gate.request(at(0));
        assert_eq!(gate.request(at(60)), RefreshMode::Cached);
        assert_eq!(gate.request(at(299)), RefreshMode::Cached);
    }

    #[test]
    fn refresh_after_window_is_forced_again() {
        let mut gate = RefreshGate::new(300);
        gate.request(at(0));
        assert_eq!(gate.request(at(300)), RefreshMode::Forced);
    }

    #[test]
    fn throttled_refreshes_do_not_reset_the_window() {
        let mut gate = RefreshGate::new(300);
        gate.request(at(0));
        // Hammering the button inside the window must not push the next
        // forced refresh further out.
        gate.request(at(100));
        gate.request(at(200));
        gate.request(at(299));
        assert_eq!(gate.request(at(301)), RefreshMode::Forced);
    }
}
