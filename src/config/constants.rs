//! Configuration constants.
//!
//! Default values for concurrency budgets, timeouts, and retry pacing. All of
//! them can be overridden through [`crate::SearchConfig`].

// Concurrency budgets
/// Maximum probes in flight across all concurrent searches (global semaphore)
pub const GLOBAL_CONCURRENCY_LIMIT: usize = 20;
/// Maximum probes in flight for a single search (per-search semaphore)
pub const PER_SEARCH_CONCURRENCY_LIMIT: usize = 5;

// Timeouts
/// Per-probe timeout in seconds. Network-call-scale: long enough for a slow
/// platform, short enough that one dead host cannot stall a batch.
pub const PROBE_TIMEOUT_SECS: u64 = 10;

// Retry strategy (applied by the governor to transport failures only)
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which the retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Default number of retries after the initial attempt
pub const RETRY_ATTEMPTS: usize = 2;

// Username handling
/// Cap on the candidate list per platform, base username included
pub const MAX_VARIANTS_PER_SITE: usize = 5;
/// Maximum accepted username length; longer input is rejected before any
/// network activity
pub const MAX_USERNAME_LENGTH: usize = 64;

// Progress logging interval in seconds
pub const LOGGING_INTERVAL_SECS: u64 = 5;

// Redirect handling
/// Maximum redirect hops followed by the redirect-following client
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Error detail strings recorded in outcomes are truncated to this length
pub const MAX_ERROR_DETAIL_LENGTH: usize = 500;

/// Default User-Agent header value.
///
/// Used as the client-level default; individual probes rotate through the
/// pool in `user_agent.rs` unless an explicit override is configured.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
