//! User-Agent rotation.
//!
//! Some platforms block obvious non-browser clients. Each probe picks a
//! User-Agent from a small pool of current browser strings unless the
//! configuration pins a fixed value. This is header variation only; no
//! further evasion is attempted.

use rand::seq::IndexedRandom;

use crate::config::DEFAULT_USER_AGENT;

/// Pool of browser User-Agent strings rotated across probes.
static USER_AGENT_POOL: &[&str] = &[
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
];

/// Picks a User-Agent for one probe.
///
/// Returns the configured override when present, otherwise a random entry
/// from the pool.
pub fn select_user_agent(configured: Option<&str>) -> String {
    if let Some(ua) = configured {
        return ua.to_string();
    }
    USER_AGENT_POOL
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(DEFAULT_USER_AGENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        assert_eq!(select_user_agent(Some("test-agent/1.0")), "test-agent/1.0");
    }

    #[test]
    fn test_rotation_picks_from_pool() {
        for _ in 0..50 {
            let ua = select_user_agent(None);
            assert!(USER_AGENT_POOL.contains(&ua.as_str()));
        }
    }

    #[test]
    fn test_pool_is_nonempty_and_plausible() {
        assert!(!USER_AGENT_POOL.is_empty());
        for ua in USER_AGENT_POOL {
            assert!(ua.starts_with("Mozilla/5.0"));
        }
    }
}
