//! Fixed-delay pacing between upstream calls.
//!
//! Pacing is applied by the orchestrating code after each call attempt,
//! never by the clients themselves, so tests can run with [`Pacing::none`].
//! There are no retries: a failed call is simply followed by the same pause.

use std::time::Duration;

use mapslink_core::ResolverConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after every reverse-geocode or POI call, success or failure.
    pub lookup_delay: Duration,
    /// Pause after every fully processed link.
    pub link_delay: Duration,
}

impl Pacing {
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            lookup_delay: Duration::from_millis(config.lookup_delay_ms),
            link_delay: Duration::from_millis(config.link_delay_ms),
        }
    }

    /// Zero delays everywhere.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            lookup_delay: Duration::ZERO,
            link_delay: Duration::ZERO,
        }
    }

    pub async fn after_lookup(&self) {
        pause(self.lookup_delay).await;
    }

    pub async fn after_link(&self) {
        pause(self.link_delay).await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_uses_configured_delays() {
        let pacing = Pacing::from_config(&ResolverConfig::default());
        assert_eq!(pacing.lookup_delay, Duration::from_secs(1));
        assert_eq!(pacing.link_delay, Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn after_lookup_sleeps_for_lookup_delay() {
        let pacing = Pacing {
            lookup_delay: Duration::from_secs(1),
            link_delay: Duration::ZERO,
        };
        let start = tokio::time::Instant::now();
        pacing.after_lookup().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn none_does_not_advance_time() {
        let start = tokio::time::Instant::now();
        Pacing::none().after_lookup().await;
        Pacing::none().after_link().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
