//! Lightweight content extraction over fetched pages.
//!
//! Regex/DOM heuristics that turn raw HTML into structured findings:
//! contact details, geolocation hints, and dark-web indicators. All
//! functions are pure and deterministic; fetching the page is the caller's
//! concern. Output lists are deduplicated and bounded.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

/// Cap on each findings list; pages stuffed with matches are truncated.
const MAX_FINDINGS_PER_KIND: usize = 50;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("hard-coded regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+\d{1,3}[-\s]?\d{1,4}[-\s]?\d{1,4}[-\s]?\d{1,4}|\(\d{3}\)[-\s]?\d{3}[-\s]?\d{4}")
        .expect("hard-coded regex")
});

static COORDINATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d{1,3}\.\d{3,})\s*[,;]\s*(-?\d{1,3}\.\d{3,})").expect("hard-coded regex")
});

static ONION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z2-7]{16,56}\.onion)\b").expect("hard-coded regex")
});

static BITCOIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[13][a-km-zA-HJ-NP-Z1-9]{25,34}|bc1[a-z0-9]{39,59})\b")
        .expect("hard-coded regex")
});

static GEO_META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("hard-coded selector"));

/// Contact details found on a page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactFindings {
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
}

/// Geolocation hints found on a page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeoFindings {
    /// (latitude, longitude) pairs from meta tags or inline text
    pub coordinates: Vec<(f64, f64)>,
    /// Place names from geo/OpenGraph meta tags
    pub place_names: Vec<String>,
}

/// Dark-web indicators found in page text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DarkwebFindings {
    pub onion_services: Vec<String>,
    pub bitcoin_addresses: Vec<String>,
    pub has_pgp_block: bool,
}

/// Strips markup and returns the visible text of an HTML document.
///
/// Script, style, and noscript content is excluded; it is text in the parse
/// tree but not on the page.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    push_visible_text(document.root_element(), &mut out);
    out.trim().to_string()
}

fn push_visible_text(element: scraper::ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(trimmed);
            }
        } else if let Some(el) = scraper::ElementRef::wrap(child) {
            if !matches!(el.value().name(), "script" | "style" | "noscript") {
                push_visible_text(el, out);
            }
        }
    }
}

fn collect_bounded<'a>(matches: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for m in matches {
        if seen.insert(m) {
            out.push(m.to_string());
        }
        if out.len() == MAX_FINDINGS_PER_KIND {
            break;
        }
    }
    out
}

/// Extracts email addresses and phone numbers from HTML.
pub fn extract_contact_info(html: &str) -> ContactFindings {
    let text = visible_text(html);
    ContactFindings {
        emails: collect_bounded(EMAIL_RE.find_iter(&text).map(|m| m.as_str())),
        phone_numbers: collect_bounded(PHONE_RE.find_iter(&text).map(|m| m.as_str())),
    }
}

/// Extracts geolocation hints from HTML.
///
/// Looks at geo/OpenGraph meta tags first (`geo.position`, `og:latitude`/
/// `og:longitude`, `geo.placename`, `og:locality`), then falls back to
/// coordinate-looking pairs in the visible text.
pub fn extract_geolocation(html: &str) -> GeoFindings {
    let document = Html::parse_document(html);
    let mut findings = GeoFindings::default();
    let mut meta_lat: Option<f64> = None;
    let mut meta_lon: Option<f64> = None;

    for element in document.select(&GEO_META_SELECTOR) {
        let attr = |name: &str| element.value().attr(name);
        let key = attr("name").or_else(|| attr("property")).unwrap_or("");
        let Some(content) = attr("content") else {
            continue;
        };

        match key {
            "geo.position" => {
                // "lat;lon"
                let mut parts = content.split(';');
                if let (Some(lat), Some(lon)) = (parts.next(), parts.next()) {
                    meta_lat = lat.trim().parse().ok();
                    meta_lon = lon.trim().parse().ok();
                }
            }
            "og:latitude" => meta_lat = content.trim().parse().ok(),
            "og:longitude" => meta_lon = content.trim().parse().ok(),
            "geo.placename" | "og:locality" | "og:region" => {
                let place = content.trim();
                if !place.is_empty() && !findings.place_names.iter().any(|p| p == place) {
                    findings.place_names.push(place.to_string());
                }
            }
            _ => {}
        }
    }

    if let (Some(lat), Some(lon)) = (meta_lat, meta_lon) {
        findings.coordinates.push((lat, lon));
    }

    let text = visible_text(html);
    for captures in COORDINATE_RE.captures_iter(&text) {
        let (Some(lat), Some(lon)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        if let (Ok(lat), Ok(lon)) = (lat.as_str().parse::<f64>(), lon.as_str().parse::<f64>()) {
            if (-90.0..=90.0).contains(&lat)
                && (-180.0..=180.0).contains(&lon)
                && !findings.coordinates.contains(&(lat, lon))
            {
                findings.coordinates.push((lat, lon));
            }
        }
        if findings.coordinates.len() == MAX_FINDINGS_PER_KIND {
            break;
        }
    }

    findings
}

/// Extracts dark-web indicators from already-stripped page text.
pub fn extract_darkweb_indicators(text: &str) -> DarkwebFindings {
    DarkwebFindings {
        onion_services: collect_bounded(
            ONION_RE
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str()),
        ),
        bitcoin_addresses: collect_bounded(BITCOIN_RE.find_iter(text).map(|m| m.as_str())),
        has_pgp_block: text.contains("BEGIN PGP PUBLIC KEY BLOCK"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_emails_and_phones() {
        let html = r#"<html><body>
            <p>Reach me at alice@example.com or alice@example.com (again),
               or call +1 555 0123 100.</p>
            <p>Office: (555) 010-2030</p>
        </body></html>"#;
        let findings = extract_contact_info(html);
        assert_eq!(findings.emails, vec!["alice@example.com"]);
        assert_eq!(findings.phone_numbers.len(), 2);
    }

    #[test]
    fn test_script_text_is_not_visible() {
        let html = r#"<html><head><script>var x = "hidden@example.com";</script></head>
            <body>visible@example.com</body></html>"#;
        let findings = extract_contact_info(html);
        assert_eq!(findings.emails, vec!["visible@example.com"]);
    }

    #[test]
    fn test_geolocation_from_meta_tags() {
        let html = r#"<html><head>
            <meta name="geo.position" content="40.7128; -74.0060">
            <meta name="geo.placename" content="New York">
        </head><body></body></html>"#;
        let findings = extract_geolocation(html);
        assert_eq!(findings.coordinates, vec![(40.7128, -74.0060)]);
        assert_eq!(findings.place_names, vec!["New York"]);
    }

    #[test]
    fn test_geolocation_from_og_tags() {
        let html = r#"<html><head>
            <meta property="og:latitude" content="51.5074">
            <meta property="og:longitude" content="-0.1278">
            <meta property="og:locality" content="London">
        </head><body></body></html>"#;
        let findings = extract_geolocation(html);
        assert_eq!(findings.coordinates, vec![(51.5074, -0.1278)]);
        assert_eq!(findings.place_names, vec!["London"]);
    }

    #[test]
    fn test_inline_coordinates_bounded_to_valid_ranges() {
        let html = "<html><body>At 48.8566, 2.3522 and also 999.123456, 0.5</body></html>";
        let findings = extract_geolocation(html);
        assert_eq!(findings.coordinates, vec![(48.8566, 2.3522)]);
    }

    #[test]
    fn test_darkweb_indicators() {
        let text = "Mirror: expyuzz4wqqyqhjn.onion and expyuzz4wqqyqhjn.onion again. \
                    Donate: 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa \
                    -----BEGIN PGP PUBLIC KEY BLOCK-----";
        let findings = extract_darkweb_indicators(text);
        assert_eq!(findings.onion_services, vec!["expyuzz4wqqyqhjn.onion"]);
        assert_eq!(
            findings.bitcoin_addresses,
            vec!["1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"]
        );
        assert!(findings.has_pgp_block);
    }

    #[test]
    fn test_no_indicators_in_plain_text() {
        let findings = extract_darkweb_indicators("just a normal sentence about onions");
        assert!(findings.onion_services.is_empty());
        assert!(findings.bitcoin_addresses.is_empty());
        assert!(!findings.has_pgp_block);
    }

    #[test]
    fn test_findings_serialize() {
        let findings = extract_contact_info("<p>a@b.io</p>");
        let json = serde_json::to_string(&findings).unwrap();
        assert!(json.contains("a@b.io"));
    }
}
