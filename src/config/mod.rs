//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (concurrency budgets, timeouts, retry pacing)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, SearchConfig};
