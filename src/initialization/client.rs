//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{SearchConfig, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS};
use crate::error_handling::InitializationError;

/// The pair of HTTP clients probes run against.
///
/// Platforms whose redirect policy is `Follow` use `follow`; platforms that
/// treat a redirect as "profile not found" use `no_follow` so the 3xx status
/// is visible to the verdict rule instead of being chased.
pub struct ProbeClients {
    pub follow: Arc<reqwest::Client>,
    pub no_follow: Arc<reqwest::Client>,
}

/// Initializes both probe clients from the configuration.
///
/// Both share the per-probe timeout and a default User-Agent; the per-probe
/// rotation overrides the header per request.
pub async fn init_clients(config: &SearchConfig) -> Result<ProbeClients, InitializationError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let user_agent = config
        .user_agent
        .as_deref()
        .unwrap_or(DEFAULT_USER_AGENT)
        .to_string();

    let follow = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;

    let no_follow = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(user_agent)
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(ProbeClients {
        follow: Arc::new(follow),
        no_follow: Arc::new(no_follow),
    })
}
