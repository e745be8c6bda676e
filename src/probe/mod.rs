//! Probe executor: one HTTP request for one (platform, candidate) pair.
//!
//! A probe issues the platform's check request and interprets the response
//! into a [`Verdict`]. Failures of any kind become outcomes, never errors:
//! the caller always gets exactly one [`ProbeOutcome`] back.

use std::time::{Duration, Instant};

use crate::catalog::{CheckMethod, RedirectPolicy, SiteSpec};
use crate::config::MAX_ERROR_DETAIL_LENGTH;
use crate::error_handling::{categorize_reqwest_error, ErrorType, InfoType, ProbeStats};
use crate::initialization::ProbeClients;
use crate::user_agent::select_user_agent;

/// Classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The platform answered in a way consistent with an existing profile
    Found,
    /// The platform answered with one of its declared not-found signals
    NotFound,
    /// Transport failure (DNS, connect, TLS) or unclassifiable response
    Unknown,
    /// The probe exceeded its deadline
    Timeout,
}

/// One unit of work: check one candidate username on one platform.
///
/// Created from the variation-expander × catalog cross product, consumed
/// exactly once by [`probe`].
#[derive(Debug, Clone)]
pub struct ProbeTask {
    pub platform_name: String,
    pub candidate_username: String,
    pub target_url: String,
    pub method: CheckMethod,
}

impl ProbeTask {
    pub fn new(spec: &SiteSpec, candidate: &str) -> Self {
        ProbeTask {
            platform_name: spec.platform_name.clone(),
            candidate_username: candidate.to_string(),
            target_url: spec.resolve_url(candidate),
            method: spec.method,
        }
    }
}

/// Result of one probe.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub platform_name: String,
    pub candidate_username: String,
    pub verdict: Verdict,
    /// URL to present when the verdict is Found
    pub resolved_url: Option<String>,
    pub latency: Duration,
    /// Absent on transport failure and timeout
    pub http_status: Option<u16>,
    pub error_detail: Option<String>,
}

impl ProbeOutcome {
    fn from_task(task: &ProbeTask, verdict: Verdict, latency: Duration) -> Self {
        ProbeOutcome {
            platform_name: task.platform_name.clone(),
            candidate_username: task.candidate_username.clone(),
            verdict,
            resolved_url: None,
            latency,
            http_status: None,
            error_detail: None,
        }
    }

    pub fn found(task: &ProbeTask, status: u16, latency: Duration) -> Self {
        ProbeOutcome {
            resolved_url: Some(task.target_url.clone()),
            http_status: Some(status),
            ..Self::from_task(task, Verdict::Found, latency)
        }
    }

    pub fn not_found(task: &ProbeTask, status: u16, latency: Duration) -> Self {
        ProbeOutcome {
            http_status: Some(status),
            ..Self::from_task(task, Verdict::NotFound, latency)
        }
    }

    pub fn timeout(task: &ProbeTask, latency: Duration) -> Self {
        Self::from_task(task, Verdict::Timeout, latency)
    }

    pub fn unknown(task: &ProbeTask, detail: impl Into<String>, latency: Duration) -> Self {
        ProbeOutcome {
            error_detail: Some(truncate_detail(detail.into())),
            ..Self::from_task(task, Verdict::Unknown, latency)
        }
    }
}

fn truncate_detail(mut detail: String) -> String {
    if detail.len() > MAX_ERROR_DETAIL_LENGTH {
        let mut cut = MAX_ERROR_DETAIL_LENGTH;
        while !detail.is_char_boundary(cut) {
            cut -= 1;
        }
        detail.truncate(cut);
    }
    detail
}

/// Issues one probe and classifies the response.
///
/// Verdict rule:
/// - status in the platform's not-found set → NotFound
/// - redirect, when the platform's policy says redirects mean no profile → NotFound
/// - deadline exceeded → Timeout
/// - transport error (DNS, TLS, refused) → Unknown with detail
/// - anything else → Found, with `resolved_url` set to the checked URL
///
/// A HEAD request rejected with 405/501 is retried once as GET; if the GET is
/// rejected the same way the probe reports Unknown. No other retries happen
/// at this layer (the governor owns retry policy).
pub async fn probe(
    clients: &ProbeClients,
    task: &ProbeTask,
    spec: &SiteSpec,
    timeout: Duration,
    user_agent_override: Option<&str>,
    stats: &ProbeStats,
) -> ProbeOutcome {
    let client = match spec.redirect_policy {
        RedirectPolicy::Follow => &clients.follow,
        RedirectPolicy::NotFound => &clients.no_follow,
    };

    let started = Instant::now();
    let mut method = task.method;
    let mut head_retried = false;

    loop {
        let mut request = client
            .request(method.into(), &task.target_url)
            .header(
                reqwest::header::USER_AGENT,
                select_user_agent(user_agent_override),
            );
        for (name, value) in &spec.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match tokio::time::timeout(timeout, request.send()).await {
            Err(_elapsed) => {
                stats.increment_error(ErrorType::ProbeTimeout);
                log::debug!(
                    "{}: probe for '{}' timed out after {:?}",
                    task.platform_name,
                    task.candidate_username,
                    timeout
                );
                return ProbeOutcome::timeout(task, started.elapsed());
            }
            Ok(Err(e)) => {
                stats.increment_error(categorize_reqwest_error(&e));
                log::debug!(
                    "{}: probe for '{}' failed: {}",
                    task.platform_name,
                    task.candidate_username,
                    e
                );
                return ProbeOutcome::unknown(task, e.to_string(), started.elapsed());
            }
            Ok(Ok(response)) => response,
        };

        let status = response.status().as_u16();

        if matches!(status, 405 | 501) {
            if method == CheckMethod::Head && !head_retried {
                stats.increment_info(InfoType::HeadFallbackToGet);
                log::debug!(
                    "{}: HEAD rejected ({}), retrying as GET",
                    task.platform_name,
                    status
                );
                method = CheckMethod::Get;
                head_retried = true;
                continue;
            }
            stats.increment_error(ErrorType::MethodNotAllowed);
            let mut outcome = ProbeOutcome::unknown(
                task,
                format!("{} rejected with {}", method.as_str(), status),
                started.elapsed(),
            );
            outcome.http_status = Some(status);
            return outcome;
        }

        if spec.not_found_status_codes.contains(&status) {
            return ProbeOutcome::not_found(task, status, started.elapsed());
        }

        if (300..400).contains(&status) && spec.redirect_policy == RedirectPolicy::NotFound {
            stats.increment_info(InfoType::RedirectTreatedAsMiss);
            return ProbeOutcome::not_found(task, status, started.elapsed());
        }

        return ProbeOutcome::found(task, status, started.elapsed());
    }
}
