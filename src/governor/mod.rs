//! Concurrency governor: schedules the probe fan-out under two admission
//! levels.
//!
//! A global semaphore (owned by the [`crate::Searcher`], shared across all
//! concurrent searches) protects the host's outbound connection budget; a
//! per-search semaphore keeps one large fan-out from starving simultaneous
//! searches. Each spawned task acquires global then per-search, holds both as
//! owned permits, and releases them by scope on every exit path — success,
//! error, timeout, or panic — so a crashing probe can never leak a permit.
//!
//! One failing task never cancels or blocks siblings: failures are captured
//! as outcomes, and the batch completes when every task has produced one.
//! There is no early exit on first hit; callers want full coverage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::catalog::SiteSpec;
use crate::config::LOGGING_INTERVAL_SECS;
use crate::error_handling::{get_retry_strategy, InFlightGuard, ProbeStats};
use crate::initialization::ProbeClients;
use crate::probe::{probe, ProbeOutcome, ProbeTask, Verdict};

/// Shared resources and limits for one batch run.
///
/// `global_permits` is passed by reference (not created here) so a single
/// semaphore can bound every concurrent search in the process.
pub struct BatchContext {
    pub clients: Arc<ProbeClients>,
    pub global_permits: Arc<Semaphore>,
    pub per_search_limit: usize,
    pub timeout: Duration,
    pub retry_attempts: usize,
    pub user_agent: Option<Arc<str>>,
    pub stats: Arc<ProbeStats>,
}

/// Runs every task to completion and returns one outcome per task, in task
/// order.
///
/// Tasks are spawned immediately; admission is controlled inside each task by
/// permit acquisition, so the scheduling order is whatever the semaphores
/// hand out. A task that panics is converted into an Unknown outcome for its
/// ProbeTask rather than poisoning the batch.
pub async fn run_batch(
    tasks: Vec<ProbeTask>,
    specs_by_platform: Arc<HashMap<String, SiteSpec>>,
    ctx: Arc<BatchContext>,
) -> Vec<ProbeOutcome> {
    let search_permits = Arc::new(Semaphore::new(ctx.per_search_limit));
    let completed = Arc::new(AtomicUsize::new(0));
    let total = tasks.len();
    let start_time = std::time::Instant::now();

    let mut handles = Vec::with_capacity(tasks.len());
    for task in &tasks {
        let task = task.clone();
        let ctx = Arc::clone(&ctx);
        let specs = Arc::clone(&specs_by_platform);
        let search_permits = Arc::clone(&search_permits);
        let completed = Arc::clone(&completed);

        handles.push(tokio::spawn(async move {
            // Acquire global then per-search; every task acquires in this
            // order and holds at most its own two permits, so no deadlock.
            let _global = match Arc::clone(&ctx.global_permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    // Semaphore closed during shutdown; record, don't crash
                    return ProbeOutcome::unknown(
                        &task,
                        "global concurrency limiter closed",
                        Duration::ZERO,
                    );
                }
            };
            let _local = match search_permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    return ProbeOutcome::unknown(
                        &task,
                        "search concurrency limiter closed",
                        Duration::ZERO,
                    );
                }
            };

            let outcome = match specs.get(&task.platform_name) {
                Some(spec) => {
                    let _in_flight = InFlightGuard::enter(&ctx.stats);
                    probe_with_retry(&task, spec, &ctx).await
                }
                // Unreachable when tasks are built from the same catalog,
                // but a missing spec must not take the batch down.
                None => ProbeOutcome::unknown(
                    &task,
                    format!("no catalog entry for platform '{}'", task.platform_name),
                    Duration::ZERO,
                ),
            };
            completed.fetch_add(1, Ordering::SeqCst);
            outcome
        }));
    }

    let cancel = CancellationToken::new();
    let logging_task = spawn_progress_logger(
        cancel.child_token(),
        start_time,
        Arc::clone(&completed),
        total,
    );

    let joined = futures::future::join_all(handles).await;

    cancel.cancel();
    if let Err(e) = logging_task.await {
        log::warn!("Progress logging task failed: {:?}", e);
    }

    tasks
        .iter()
        .zip(joined)
        .map(|(task, result)| match result {
            Ok(outcome) => outcome,
            Err(join_error) => {
                log::warn!(
                    "Probe task for {} panicked: {:?}",
                    task.platform_name,
                    join_error
                );
                ProbeOutcome::unknown(task, "probe task panicked", Duration::ZERO)
            }
        })
        .collect()
}

/// Probes with bounded retries for transport failures.
///
/// Only Unknown verdicts are retried: Found and NotFound are answers, and a
/// Timeout already consumed the full per-probe budget. Delays come from the
/// exponential-backoff strategy; the last outcome is returned when the
/// attempts are exhausted.
async fn probe_with_retry(task: &ProbeTask, spec: &SiteSpec, ctx: &BatchContext) -> ProbeOutcome {
    let mut delays = get_retry_strategy(ctx.retry_attempts);
    loop {
        let outcome = probe(
            &ctx.clients,
            task,
            spec,
            ctx.timeout,
            ctx.user_agent.as_deref(),
            &ctx.stats,
        )
        .await;

        if outcome.verdict != Verdict::Unknown {
            return outcome;
        }
        match delays.next() {
            Some(delay) => {
                log::debug!(
                    "{}: transport failure for '{}', retrying in {:?}",
                    task.platform_name,
                    task.candidate_username,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            None => return outcome,
        }
    }
}

fn spawn_progress_logger(
    cancel: CancellationToken,
    start_time: std::time::Instant,
    completed: Arc<AtomicUsize>,
    total: usize,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(LOGGING_INTERVAL_SECS));
        // The first tick fires immediately; skip it so short batches stay quiet
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &completed, total);
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}
