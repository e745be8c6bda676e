//! Username variation expansion.
//!
//! Platforms with loose naming rules often host the same person under a
//! slightly different spelling. For catalog entries flagged with
//! `variations`, the expander produces a small, deterministic set of
//! plausible alternates alongside the base username.

use crate::config::MAX_VARIANTS_PER_SITE;

/// Expands a base username into an ordered candidate list.
///
/// The base username is always first, so the unmodified name is tried even
/// when expansion is disabled. With `supports_variations`, alternates are
/// appended in a fixed order: lowercase fold, separator substitutions
/// (`_` ↔ `.`, `-` → `_`), trailing-digit strip, and a `1` suffix. The result
/// is deduplicated, free of empty/whitespace-only entries, and capped at
/// [`MAX_VARIANTS_PER_SITE`]. No randomness: identical input yields an
/// identical list.
pub fn expand(base: &str, supports_variations: bool) -> Vec<String> {
    let mut candidates = vec![base.to_string()];

    if supports_variations {
        candidates.push(base.to_lowercase());
        candidates.push(base.replace('_', "."));
        candidates.push(base.replace('.', "_"));
        candidates.push(base.replace('-', "_"));
        let stripped = base.trim_end_matches(|c: char| c.is_ascii_digit());
        candidates.push(stripped.to_string());
        candidates.push(format!("{base}1"));
    }

    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for candidate in candidates {
        if candidate.trim().is_empty() {
            continue;
        }
        if seen.insert(candidate.clone()) {
            out.push(candidate);
        }
        if out.len() == MAX_VARIANTS_PER_SITE {
            break;
        }
    }
    out
}
