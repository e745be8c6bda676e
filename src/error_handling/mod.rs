//! Error taxonomy and probe statistics.
//!
//! Startup failures (catalog, client, logger) are typed errors raised to the
//! caller. Per-probe failures are never raised: they are categorized here and
//! tallied in [`ProbeStats`], then reported as counts in the final report.

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_reqwest_error, get_retry_strategy};
pub use stats::{InFlightGuard, ProbeStats};
pub use types::{ConfigurationError, ErrorType, InfoType, InitializationError, SearchError};
