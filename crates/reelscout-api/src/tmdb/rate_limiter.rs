//! TMDB API rate limiter.

use std::time::Duration;

use tokio::time::Instant;

/// Default minimum interval between requests (~40 req/s).
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(25);

/// Single-tier pacing for TMDB requests.
///
/// TMDB enforces roughly 40 requests per second. Keystroke-driven searches
/// are already debounced, so this only smooths bursts such as a search
/// racing a detail fetch.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbRateLimiter {
    /// Minimum interval between requests.
    min_interval: Duration,
    /// Earliest instant the next request may start.
    next_slot: Option<Instant>,
}

impl TmdbRateLimiter {
    /// Creates a new rate limiter with the given minimum interval.
    pub(crate) const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: None,
        }
    }

    /// Creates a new rate limiter with the default interval (25ms).
    pub(crate) const fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Waits until the next request is allowed and reserves the slot after it.
    pub async fn wait(&mut self) {
        if let Some(slot) = self.next_slot {
            tokio::time::sleep_until(slot).await;
        }
        self.next_slot = Instant::now().checked_add(self.min_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_request_does_not_wait() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_secs(1));

        // Act
        let start = Instant::now();
        limiter.wait().await;

        // Assert
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_request_waits_min_interval() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_millis(50));

        // Act
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;

        // Assert
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_gap_is_not_charged_twice() {
        // Arrange
        let mut limiter = TmdbRateLimiter::new(Duration::from_millis(50));
        limiter.wait().await;
        tokio::time::advance(Duration::from_millis(200)).await;

        // Act
        let start = Instant::now();
        limiter.wait().await;

        // Assert
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_default_interval() {
        // Arrange & Act
        let limiter = TmdbRateLimiter::default_interval();

        // Assert
        assert_eq!(limiter.min_interval, Duration::from_millis(25));
        assert!(limiter.next_slot.is_none());
    }
}
