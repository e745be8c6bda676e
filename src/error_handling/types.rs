//! Error type definitions.
//!
//! This module defines the error taxonomy: typed errors raised to the caller
//! before any network activity starts, and the stat enums used to tally
//! per-probe failures that are reported as data rather than raised.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for site-catalog loading and validation.
///
/// All variants are fatal at startup: the process must not proceed with a
/// partially-loaded catalog.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The catalog file could not be read.
    #[error("failed to read site catalog {path}: {source}")]
    CatalogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON or does not match the schema.
    #[error("failed to parse site catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// A catalog entry failed validation.
    #[error("invalid catalog entry '{platform}': {reason}")]
    InvalidEntry { platform: String, reason: String },

    /// An image URL handed to the reverse-image link builder is unusable.
    #[error("invalid image URL '{url}': {reason}")]
    InvalidImageUrl { url: String, reason: String },

    /// A concurrency or timeout setting is zero, which would stall every
    /// batch forever.
    #[error("invalid configuration: {name} must be greater than zero")]
    InvalidLimit { name: &'static str },
}

/// Errors surfaced by [`crate::Searcher`] to its caller.
///
/// Individual probe failures never appear here; they are recorded as
/// outcomes and tallied in the report's error/timeout counts.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The username failed validation before any network activity.
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    /// Catalog loading or validation failed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A shared resource (HTTP client, logger) could not be created.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

/// Types of probe-level failures tallied during a search.
///
/// These categorize outcomes, not raised errors: a probe that hits one of
/// these produces an Unknown or Timeout verdict and the batch continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Per-probe deadline exceeded (verdict: Timeout)
    ProbeTimeout,
    /// TCP/TLS connection failure
    ConnectError,
    /// Transport-level timeout reported by the HTTP client
    RequestTimeoutError,
    /// Request could not be sent (DNS failure, malformed request)
    RequestError,
    /// Redirect handling failed (loop, too many hops)
    RedirectError,
    /// Response body could not be read or decoded
    DecodeError,
    /// Request construction failed
    BuilderError,
    /// Platform rejected both HEAD and GET for this URL
    MethodNotAllowed,
    /// Anything else the HTTP client reports
    OtherTransport,
}

/// Notable per-probe events that are neither failures nor hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// HEAD was rejected with 405/501 and the probe was retried as GET
    HeadFallbackToGet,
    /// A redirect was classified as not-found per the platform's policy
    RedirectTreatedAsMiss,
    /// A profile was found under a generated variant, not the base username
    VariantHit,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ProbeTimeout => "Probe timeout",
            ErrorType::ConnectError => "Connection error",
            ErrorType::RequestTimeoutError => "HTTP request timeout",
            ErrorType::RequestError => "HTTP request error",
            ErrorType::RedirectError => "Redirect error",
            ErrorType::DecodeError => "Response decode error",
            ErrorType::BuilderError => "Request builder error",
            ErrorType::MethodNotAllowed => "Method not allowed (HEAD and GET rejected)",
            ErrorType::OtherTransport => "Other transport error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HeadFallbackToGet => "HEAD rejected, retried as GET",
            InfoType::RedirectTreatedAsMiss => "Redirect treated as not-found",
            InfoType::VariantHit => "Profile found under username variant",
        }
    }
}
