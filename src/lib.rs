//! username_status library: concurrent username existence checking.
//!
//! Given a username, this library probes a catalog of web platforms in
//! parallel under a two-level concurrency budget and reports which platforms
//! host a matching profile, together with timing and error statistics.
//! Individual probe failures (timeouts, blocks, refused connections) are
//! recorded in the report, never raised: a validated search always produces
//! a [`SearchReport`].
//!
//! # Example
//!
//! ```no_run
//! use username_status::{SearchConfig, Searcher};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let searcher = Searcher::new(SearchConfig::default()).await?;
//! let report = searcher.search("alice").await?;
//! println!(
//!     "found {} profiles across {} platforms in {:.1}s",
//!     report.found_count, report.platforms_checked, report.elapsed_seconds
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

mod app;
pub mod catalog;
pub mod config;
mod error_handling;
pub mod extract;
mod governor;
pub mod imagesearch;
pub mod initialization;
mod probe;
mod report;
mod user_agent;
mod variations;

// Re-export public API
pub use config::{LogFormat, LogLevel, SearchConfig};
pub use error_handling::{
    ConfigurationError, ErrorType, InfoType, InitializationError, ProbeStats, SearchError,
};
pub use imagesearch::build_reverse_image_links;
pub use probe::{ProbeOutcome, ProbeTask, Verdict};
pub use report::SearchReport;
pub use run::Searcher;

// Internal run module (contains the main search logic)
mod run {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use log::info;
    use tokio::sync::Semaphore;

    use crate::app::{print_probe_statistics, validate_username};
    use crate::catalog::{load_catalog, SiteSpec};
    use crate::config::SearchConfig;
    use crate::error_handling::{ConfigurationError, ProbeStats, SearchError};
    use crate::governor::{run_batch, BatchContext};
    use crate::initialization::{init_clients, init_semaphore, ProbeClients};
    use crate::probe::ProbeTask;
    use crate::report::{aggregate, SearchReport};
    use crate::variations::expand;

    /// The long-lived search engine.
    ///
    /// Holds the validated site catalog, the HTTP clients, and the global
    /// concurrency semaphore. One `Searcher` serves any number of
    /// [`search`](Searcher::search) calls, concurrent or sequential; the
    /// global semaphore bounds total probes in flight across all of them.
    pub struct Searcher {
        catalog: Arc<Vec<SiteSpec>>,
        specs_by_platform: Arc<HashMap<String, SiteSpec>>,
        clients: Arc<ProbeClients>,
        global_permits: Arc<Semaphore>,
        stats: Arc<ProbeStats>,
        config: SearchConfig,
    }

    impl Searcher {
        /// Creates a searcher from the configuration.
        ///
        /// Loads and validates the site catalog (the built-in one unless a
        /// path is configured) and builds the HTTP clients. Fails fast on a
        /// malformed catalog or nonsensical limits; nothing network-facing
        /// happens here.
        pub async fn new(config: SearchConfig) -> Result<Self, SearchError> {
            if config.global_concurrency == 0 {
                return Err(ConfigurationError::InvalidLimit {
                    name: "global_concurrency",
                }
                .into());
            }
            if config.per_search_concurrency == 0 {
                return Err(ConfigurationError::InvalidLimit {
                    name: "per_search_concurrency",
                }
                .into());
            }
            if config.timeout_seconds == 0 {
                return Err(ConfigurationError::InvalidLimit {
                    name: "timeout_seconds",
                }
                .into());
            }

            let catalog = load_catalog(config.catalog.as_deref())?;
            let specs_by_platform: HashMap<String, SiteSpec> = catalog
                .iter()
                .map(|spec| (spec.platform_name.clone(), spec.clone()))
                .collect();
            let clients = Arc::new(init_clients(&config).await?);
            let global_permits = init_semaphore(config.global_concurrency);

            Ok(Searcher {
                catalog: Arc::new(catalog),
                specs_by_platform: Arc::new(specs_by_platform),
                clients,
                global_permits,
                stats: Arc::new(ProbeStats::new()),
                config,
            })
        }

        /// The validated site catalog, in declaration order.
        pub fn catalog(&self) -> &[SiteSpec] {
            &self.catalog
        }

        /// The probe statistics accumulated across all searches on this
        /// instance.
        pub fn stats(&self) -> Arc<ProbeStats> {
            Arc::clone(&self.stats)
        }

        /// Runs the full concurrent batch for one username and returns once
        /// every probe has produced an outcome.
        ///
        /// The username is validated synchronously; invalid input returns
        /// [`SearchError::InvalidUsername`] before any network activity.
        /// After that point the call cannot fail: partial coverage shows up
        /// as `timeouts_count`/`errors_count` in the report.
        pub async fn search(&self, username: &str) -> Result<SearchReport, SearchError> {
            validate_username(username)?;

            let started_at = Utc::now();
            let started = std::time::Instant::now();

            let mut tasks = Vec::new();
            for spec in self.catalog.iter() {
                let candidates = expand(
                    username,
                    spec.supports_variations && self.config.enable_variations,
                );
                for candidate in &candidates {
                    tasks.push(ProbeTask::new(spec, candidate));
                }
            }

            info!(
                "Checking username '{}' across {} platforms ({} probes)",
                username,
                self.catalog.len(),
                tasks.len()
            );

            let ctx = Arc::new(BatchContext {
                clients: Arc::clone(&self.clients),
                global_permits: Arc::clone(&self.global_permits),
                per_search_limit: self.config.per_search_concurrency,
                timeout: Duration::from_secs(self.config.timeout_seconds),
                retry_attempts: self.config.retry_attempts,
                user_agent: self.config.user_agent.as_deref().map(Arc::from),
                stats: Arc::clone(&self.stats),
            });

            let outcomes = run_batch(tasks, Arc::clone(&self.specs_by_platform), ctx).await;

            let report = aggregate(
                username,
                &outcomes,
                started_at,
                started.elapsed().as_secs_f64(),
                &self.stats,
            );
            crate::app::log_report_summary(&report);
            print_probe_statistics(&self.stats);

            Ok(report)
        }
    }
}
