//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information for a running probe batch.
pub fn log_progress(
    start_time: std::time::Instant,
    completed_probes: &Arc<AtomicUsize>,
    total_probes: usize,
) {
    let elapsed = start_time.elapsed();
    let completed = completed_probes.load(Ordering::SeqCst);
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Completed {}/{} probes in {:.2} seconds (~{:.2} probes/sec)",
        completed, total_probes, elapsed_secs, rate
    );
}
