//! Error categorization and retry strategy.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::ErrorType;

/// Creates the exponential backoff delay sequence for probe retries.
///
/// The governor retries transport-level failures (Unknown verdicts) up to
/// `attempts` times, sleeping between attempts:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
///
/// Found, NotFound, and Timeout verdicts are never retried.
pub fn get_retry_strategy(attempts: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(attempts)
}

/// Categorizes a `reqwest::Error` into an [`ErrorType`].
///
/// Probes never call `error_for_status()`, so HTTP status codes arrive as
/// verdicts rather than errors; everything reaching this function is a
/// transport-level failure (DNS, connect, TLS, timeout, decode).
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::RequestTimeoutError
    } else if error.is_connect() {
        ErrorType::ConnectError
    } else if error.is_redirect() {
        ErrorType::RedirectError
    } else if error.is_builder() {
        ErrorType::BuilderError
    } else if error.is_body() || error.is_decode() {
        ErrorType::DecodeError
    } else if error.is_request() {
        ErrorType::RequestError
    } else {
        ErrorType::OtherTransport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_retry_strategy_attempt_count() {
        assert_eq!(get_retry_strategy(0).count(), 0);
        assert_eq!(get_retry_strategy(2).count(), 2);
        assert_eq!(get_retry_strategy(5).count(), 5);
    }

    #[test]
    fn test_get_retry_strategy_initial_delay() {
        let first = get_retry_strategy(3).next().unwrap();
        assert!(first.as_millis() >= crate::config::RETRY_INITIAL_DELAY_MS as u128);
    }

    #[test]
    fn test_get_retry_strategy_delays_bounded() {
        let max = Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS);
        for delay in get_retry_strategy(8) {
            assert!(delay <= max, "delay {:?} exceeds max {:?}", delay, max);
        }
    }

    #[test]
    fn test_get_retry_strategy_monotonic() {
        let delays: Vec<Duration> = get_retry_strategy(4).collect();
        for pair in delays.windows(2) {
            assert!(pair[1] >= pair[0], "delays should not decrease");
        }
    }

    // Categorizing real reqwest::Error values requires a live request; the
    // transport categories are exercised in the governor integration tests.
}
