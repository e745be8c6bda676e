//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    GLOBAL_CONCURRENCY_LIMIT, PER_SEARCH_CONCURRENCY_LIMIT, PROBE_TIMEOUT_SECS, RETRY_ATTEMPTS,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        })
    }
}

/// Search configuration.
///
/// Doubles as the CLI surface (via clap derive) and the library configuration
/// struct. Library callers construct it programmatically:
///
/// ```no_run
/// use username_status::SearchConfig;
///
/// let config = SearchConfig {
///     global_concurrency: 50,
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "username_status",
    about = "Checks a username against a catalog of web platforms and reports where a profile exists."
)]
pub struct SearchConfig {
    /// Username to search for
    #[arg(default_value = "")]
    pub username: String,

    /// Image URL to build reverse-image search links for
    #[arg(long)]
    pub image_url: Option<String>,

    /// Path to a site catalog file (JSON); the built-in catalog is used if omitted
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Maximum probes in flight across all concurrent searches
    #[arg(long, default_value_t = GLOBAL_CONCURRENCY_LIMIT)]
    pub global_concurrency: usize,

    /// Maximum probes in flight for a single search
    #[arg(long, default_value_t = PER_SEARCH_CONCURRENCY_LIMIT)]
    pub per_search_concurrency: usize,

    /// Per-probe timeout in seconds
    #[arg(long, default_value_t = PROBE_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Retries per probe after a transport failure
    #[arg(long, default_value_t = RETRY_ATTEMPTS)]
    pub retry_attempts: usize,

    /// Also try generated username variants on platforms that support them
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub enable_variations: bool,

    /// Override the rotating User-Agent pool with a fixed value
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            image_url: None,
            catalog: None,
            global_concurrency: GLOBAL_CONCURRENCY_LIMIT,
            per_search_concurrency: PER_SEARCH_CONCURRENCY_LIMIT,
            timeout_seconds: PROBE_TIMEOUT_SECS,
            retry_attempts: RETRY_ATTEMPTS,
            enable_variations: true,
            user_agent: None,
            json: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
