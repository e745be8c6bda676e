//! Probe statistics tracking.
//!
//! Thread-safe counters for probe-level failures and notable events, plus an
//! in-flight gauge that records the peak number of simultaneously running
//! probes. The gauge is how tests verify the concurrency bound is honored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};

/// Thread-safe probe statistics tracker.
///
/// Tracks failure and info counters using atomics, allowing concurrent access
/// from all probe tasks. All types are initialized to zero on creation.
/// Shared across tasks via `Arc`.
pub struct ProbeStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ProbeStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProbeStats {
            errors,
            info,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Increment a failure counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProbeStats initialization.",
                error
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map. \
                 This indicates a bug in ProbeStats initialization.",
                info_type
            );
        }
    }

    /// Get the count for a failure type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total failure count across all failure types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }

    /// Number of probes currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of probes observed in flight at once since creation.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard pairing every in-flight increment with a decrement.
///
/// The guard path guarantees the gauge is decremented on every exit,
/// including panics, so the peak value stays trustworthy.
pub struct InFlightGuard {
    stats: Arc<ProbeStats>,
}

impl InFlightGuard {
    /// Marks a probe as in-flight and returns the guard that unmarks it on
    /// drop.
    pub fn enter(stats: &Arc<ProbeStats>) -> InFlightGuard {
        let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        InFlightGuard {
            stats: Arc::clone(stats),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = ProbeStats::new();
        assert_eq!(stats.total_errors(), 0);
        assert_eq!(stats.total_info(), 0);
        assert_eq!(stats.peak_in_flight(), 0);
    }

    #[test]
    fn test_increment_error() {
        let stats = ProbeStats::new();
        stats.increment_error(ErrorType::ProbeTimeout);
        stats.increment_error(ErrorType::ProbeTimeout);
        stats.increment_error(ErrorType::ConnectError);
        assert_eq!(stats.get_error_count(ErrorType::ProbeTimeout), 2);
        assert_eq!(stats.get_error_count(ErrorType::ConnectError), 1);
        assert_eq!(stats.total_errors(), 3);
    }

    #[test]
    fn test_increment_info() {
        let stats = ProbeStats::new();
        stats.increment_info(InfoType::HeadFallbackToGet);
        assert_eq!(stats.get_info_count(InfoType::HeadFallbackToGet), 1);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_in_flight_guard_tracks_peak() {
        let stats = Arc::new(ProbeStats::new());
        {
            let _a = InFlightGuard::enter(&stats);
            let _b = InFlightGuard::enter(&stats);
            assert_eq!(stats.in_flight(), 2);
            {
                let _c = InFlightGuard::enter(&stats);
                assert_eq!(stats.in_flight(), 3);
            }
            assert_eq!(stats.in_flight(), 2);
        }
        assert_eq!(stats.in_flight(), 0);
        // Peak survives after all guards are dropped
        assert_eq!(stats.peak_in_flight(), 3);
    }
}
