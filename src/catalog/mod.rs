//! Site catalog: the static registry of probeable platforms.
//!
//! Each entry declares how to build the check URL for a username, which HTTP
//! method to use, which status codes mean "no such profile", whether username
//! variants are worth trying, and how redirects are interpreted. The catalog
//! is loaded once at startup, validated entry by entry, and shared read-only
//! across all concurrent searches.
//!
//! Catalog file schema (JSON object; declaration order is preserved):
//!
//! ```json
//! {
//!   "GitHub": {
//!     "check_uri": "https://github.com/{username}",
//!     "check_method": "GET",
//!     "error_status_codes": [404],
//!     "variations": true,
//!     "headers": {"Accept": "text/html"},
//!     "redirect_as_miss": false
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error_handling::ConfigurationError;

/// The built-in catalog, compiled into the binary. Used when no catalog path
/// is configured; same schema and validation as a user-supplied file.
const DEFAULT_CATALOG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sites.json"));

/// Placeholder substituted with the candidate username in `url_template`.
pub const USERNAME_PLACEHOLDER: &str = "{username}";

/// HTTP method used for a platform's existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMethod {
    Get,
    Head,
}

impl CheckMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckMethod::Get => "GET",
            CheckMethod::Head => "HEAD",
        }
    }
}

impl From<CheckMethod> for reqwest::Method {
    fn from(m: CheckMethod) -> Self {
        match m {
            CheckMethod::Get => reqwest::Method::GET,
            CheckMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// How a redirect response is interpreted for a platform.
///
/// Most platforms 404 on unknown profiles and redirects can be followed
/// normally; a few redirect unknown profiles to a login or landing page, and
/// for those a redirect is itself the "not found" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Follow redirects and classify the final response
    Follow,
    /// Do not follow; any 3xx response is classified as NotFound
    NotFound,
}

/// One validated entry in the site catalog. Immutable after load.
#[derive(Debug, Clone)]
pub struct SiteSpec {
    /// Unique platform key, e.g. "GitHub"
    pub platform_name: String,
    /// URL template with exactly one `{username}` placeholder
    pub url_template: String,
    /// Request method for the check
    pub method: CheckMethod,
    /// Status codes meaning "no such profile" on this platform
    pub not_found_status_codes: Vec<u16>,
    /// Whether generated username variants are worth trying here
    pub supports_variations: bool,
    /// Extra request headers for platforms that block default clients
    pub extra_headers: Vec<(String, String)>,
    /// Redirect interpretation for this platform
    pub redirect_policy: RedirectPolicy,
}

impl SiteSpec {
    /// Resolves the URL template for a candidate username.
    pub fn resolve_url(&self, candidate: &str) -> String {
        self.url_template.replace(USERNAME_PLACEHOLDER, candidate)
    }
}

/// Raw catalog entry as it appears in the JSON file, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSiteSpec {
    check_uri: String,
    check_method: String,
    error_status_codes: Vec<u16>,
    variations: bool,
    #[serde(default)]
    headers: Option<HashMap<String, String>>,
    #[serde(default)]
    redirect_as_miss: bool,
}

/// Loads and validates the site catalog.
///
/// With a path, reads that file; without one, uses the built-in catalog.
/// Declaration order is preserved. Any malformed entry fails the whole load:
/// the process must not run with a partially-loaded catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<SiteSpec>, ConfigurationError> {
    let text = match path {
        Some(p) => {
            std::fs::read_to_string(p).map_err(|source| ConfigurationError::CatalogRead {
                path: p.display().to_string(),
                source,
            })?
        }
        None => DEFAULT_CATALOG.to_string(),
    };
    let specs = parse_catalog(&text)?;
    log::info!("Loaded site catalog with {} platforms", specs.len());
    Ok(specs)
}

/// Parses catalog text into validated specs, preserving declaration order.
pub fn parse_catalog(text: &str) -> Result<Vec<SiteSpec>, ConfigurationError> {
    let entries: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;

    let mut specs = Vec::with_capacity(entries.len());
    for (platform, value) in entries {
        let raw: RawSiteSpec = serde_json::from_value(value).map_err(|e| {
            ConfigurationError::InvalidEntry {
                platform: platform.clone(),
                reason: e.to_string(),
            }
        })?;
        specs.push(validate_entry(platform, raw)?);
    }
    Ok(specs)
}

fn validate_entry(platform: String, raw: RawSiteSpec) -> Result<SiteSpec, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidEntry {
        platform: platform.clone(),
        reason,
    };

    if platform.trim().is_empty() {
        return Err(invalid("empty platform name".into()));
    }

    let placeholders = raw.check_uri.matches(USERNAME_PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(invalid(format!(
            "check_uri must contain exactly one {} placeholder, found {}",
            USERNAME_PLACEHOLDER, placeholders
        )));
    }

    // Substituting a sample name must yield a parseable http(s) URL. Catches
    // templates like "{username}.example.com" that lack a scheme.
    let sample = raw.check_uri.replace(USERNAME_PLACEHOLDER, "sample");
    match url::Url::parse(&sample) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            return Err(invalid(format!(
                "unsupported scheme '{}' in check_uri",
                parsed.scheme()
            )))
        }
        Err(e) => return Err(invalid(format!("check_uri does not resolve to a URL: {e}"))),
    }

    let method = match raw.check_method.as_str() {
        "GET" => CheckMethod::Get,
        "HEAD" => CheckMethod::Head,
        other => return Err(invalid(format!("unknown check_method '{other}'"))),
    };

    if raw.error_status_codes.is_empty() {
        return Err(invalid("error_status_codes must not be empty".into()));
    }

    // Sorted for deterministic presentation; lookup is by contains() anyway.
    let mut extra_headers: Vec<(String, String)> = raw
        .headers
        .unwrap_or_default()
        .into_iter()
        .collect();
    extra_headers.sort();
    for (name, _) in &extra_headers {
        if name.trim().is_empty() {
            return Err(invalid("empty header name".into()));
        }
    }

    Ok(SiteSpec {
        platform_name: platform,
        url_template: raw.check_uri,
        method,
        not_found_status_codes: raw.error_status_codes,
        supports_variations: raw.variations,
        extra_headers,
        redirect_policy: if raw.redirect_as_miss {
            RedirectPolicy::NotFound
        } else {
            RedirectPolicy::Follow
        },
    })
}
