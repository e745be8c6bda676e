//! Result aggregation.
//!
//! Collapses the per-probe outcomes of one batch into the report handed to
//! the caller. Presentation order is deterministic (alphabetical by
//! platform via `BTreeMap`) regardless of completion order.

use std::collections::BTreeMap;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error_handling::{InfoType, ProbeStats};
use crate::probe::{ProbeOutcome, Verdict};

/// Aggregate result of one search, immutable once returned.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// The base username that was searched
    pub target_username: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Distinct platforms attempted, regardless of variant count
    pub platforms_checked: usize,
    /// Platform → profile URL; at most one entry per platform
    pub profiles_found: BTreeMap<String, String>,
    /// Convenience count, equal to `profiles_found.len()`
    pub found_count: usize,
    /// Outcome-level tally: a platform probed with three variants that all
    /// time out contributes three
    pub timeouts_count: usize,
    /// Outcome-level tally of transport failures
    pub errors_count: usize,
    /// Wall-clock time around the whole batch, not summed probe latency
    pub elapsed_seconds: f64,
}

/// How well a Found candidate matches the base username. Lower is better.
fn candidate_rank(base: &str, candidate: &str) -> u8 {
    if candidate == base {
        0
    } else if candidate.eq_ignore_ascii_case(base) {
        1
    } else {
        2
    }
}

/// Merges probe outcomes into a [`SearchReport`].
///
/// A platform is found if any of its outcomes (across variants) is Found.
/// When several variants hit, the candidate closest to the base username
/// wins: exact match, then case-insensitive match, then earliest outcome.
pub fn aggregate(
    target_username: &str,
    outcomes: &[ProbeOutcome],
    started_at: DateTime<Utc>,
    elapsed_seconds: f64,
    stats: &ProbeStats,
) -> SearchReport {
    let mut platforms: HashSet<&str> = HashSet::new();
    let mut best: BTreeMap<String, (u8, String, String)> = BTreeMap::new();
    let mut timeouts_count = 0;
    let mut errors_count = 0;

    for outcome in outcomes {
        platforms.insert(outcome.platform_name.as_str());
        match outcome.verdict {
            Verdict::Timeout => timeouts_count += 1,
            Verdict::Unknown => errors_count += 1,
            Verdict::NotFound => {}
            Verdict::Found => {
                let Some(url) = outcome.resolved_url.clone() else {
                    // Violates the Found invariant; drop rather than report
                    // a profile without a URL
                    log::warn!(
                        "{}: Found outcome without resolved URL, ignoring",
                        outcome.platform_name
                    );
                    continue;
                };
                let rank = candidate_rank(target_username, &outcome.candidate_username);
                match best.get(&outcome.platform_name) {
                    Some((existing_rank, _, _)) if *existing_rank <= rank => {}
                    _ => {
                        best.insert(
                            outcome.platform_name.clone(),
                            (rank, url, outcome.candidate_username.clone()),
                        );
                    }
                }
            }
        }
    }

    let mut profiles_found = BTreeMap::new();
    for (platform, (rank, url, candidate)) in best {
        if rank > 0 {
            stats.increment_info(InfoType::VariantHit);
            log::debug!(
                "{}: profile found under variant '{}' of '{}'",
                platform,
                candidate,
                target_username
            );
        }
        profiles_found.insert(platform, url);
    }

    let found_count = profiles_found.len();
    SearchReport {
        target_username: target_username.to_string(),
        started_at,
        completed_at: Utc::now(),
        platforms_checked: platforms.len(),
        profiles_found,
        found_count,
        timeouts_count,
        errors_count,
        elapsed_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CheckMethod;
    use crate::probe::ProbeTask;
    use std::time::Duration;

    fn task(platform: &str, candidate: &str) -> ProbeTask {
        ProbeTask {
            platform_name: platform.to_string(),
            candidate_username: candidate.to_string(),
            target_url: format!("https://{}.example/{}", platform.to_lowercase(), candidate),
            method: CheckMethod::Get,
        }
    }

    fn found(platform: &str, candidate: &str) -> ProbeOutcome {
        ProbeOutcome::found(&task(platform, candidate), 200, Duration::from_millis(10))
    }

    fn not_found(platform: &str, candidate: &str) -> ProbeOutcome {
        ProbeOutcome::not_found(&task(platform, candidate), 404, Duration::from_millis(10))
    }

    #[test]
    fn test_counts_and_found_mapping() {
        let outcomes = vec![
            found("GitHub", "alice"),
            not_found("Twitter", "alice"),
            ProbeOutcome::timeout(&task("Vimeo", "alice"), Duration::from_secs(1)),
            ProbeOutcome::unknown(&task("Steam", "alice"), "connect refused", Duration::ZERO),
        ];
        let stats = ProbeStats::new();
        let report = aggregate("alice", &outcomes, Utc::now(), 1.2, &stats);

        assert_eq!(report.platforms_checked, 4);
        assert_eq!(report.found_count, 1);
        assert_eq!(report.timeouts_count, 1);
        assert_eq!(report.errors_count, 1);
        assert_eq!(
            report.profiles_found.get("GitHub").map(String::as_str),
            Some("https://github.example/alice")
        );
        assert!(report.profiles_found.len() <= report.platforms_checked);
    }

    #[test]
    fn test_one_entry_per_platform_across_variants() {
        let outcomes = vec![
            not_found("GitHub", "alice"),
            found("GitHub", "alice1"),
            found("GitHub", "alice_"),
        ];
        let stats = ProbeStats::new();
        let report = aggregate("alice", &outcomes, Utc::now(), 0.5, &stats);

        assert_eq!(report.platforms_checked, 1);
        assert_eq!(report.profiles_found.len(), 1);
        // First Found wins among equally-ranked variants
        assert_eq!(
            report.profiles_found.get("GitHub").map(String::as_str),
            Some("https://github.example/alice1")
        );
        assert_eq!(stats.get_info_count(InfoType::VariantHit), 1);
    }

    #[test]
    fn test_exact_candidate_preferred_over_variant() {
        let outcomes = vec![found("GitHub", "alice1"), found("GitHub", "alice")];
        let stats = ProbeStats::new();
        let report = aggregate("alice", &outcomes, Utc::now(), 0.5, &stats);

        assert_eq!(
            report.profiles_found.get("GitHub").map(String::as_str),
            Some("https://github.example/alice")
        );
        assert_eq!(stats.get_info_count(InfoType::VariantHit), 0);
    }

    #[test]
    fn test_case_insensitive_match_beats_other_variants() {
        let outcomes = vec![found("GitHub", "alice1"), found("GitHub", "ALICE")];
        let stats = ProbeStats::new();
        let report = aggregate("alice", &outcomes, Utc::now(), 0.5, &stats);

        assert_eq!(
            report.profiles_found.get("GitHub").map(String::as_str),
            Some("https://github.example/ALICE")
        );
    }

    #[test]
    fn test_timeouts_counted_per_outcome_not_per_platform() {
        let outcomes = vec![
            ProbeOutcome::timeout(&task("GitHub", "alice"), Duration::from_secs(1)),
            ProbeOutcome::timeout(&task("GitHub", "alice1"), Duration::from_secs(1)),
            ProbeOutcome::timeout(&task("GitHub", "alice_"), Duration::from_secs(1)),
        ];
        let stats = ProbeStats::new();
        let report = aggregate("alice", &outcomes, Utc::now(), 3.0, &stats);

        assert_eq!(report.platforms_checked, 1);
        assert_eq!(report.timeouts_count, 3);
        assert!(report.profiles_found.is_empty());
    }

    #[test]
    fn test_presentation_order_is_alphabetical() {
        let outcomes = vec![found("Zulu", "alice"), found("Alpha", "alice")];
        let stats = ProbeStats::new();
        let report = aggregate("alice", &outcomes, Utc::now(), 0.1, &stats);

        let keys: Vec<&String> = report.profiles_found.keys().collect();
        assert_eq!(keys, vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn test_report_serializes() {
        let stats = ProbeStats::new();
        let report = aggregate("alice", &[found("GitHub", "alice")], Utc::now(), 0.1, &stats);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"profiles_found\""));
        assert!(json.contains("github.example"));
    }
}
