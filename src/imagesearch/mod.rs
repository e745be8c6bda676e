//! Reverse-image search link builder.
//!
//! Pure string templating: given a validated image URL, produces a mapping
//! from search engine to the URL that runs a reverse-image search for it.
//! No network activity happens here; the links are handed to the user.

use std::collections::BTreeMap;

use crate::error_handling::ConfigurationError;

/// Builds reverse-image search links for the supported engines.
///
/// The image URL must parse as http(s); anything else is rejected before
/// templating so broken links are never presented.
pub fn build_reverse_image_links(
    image_url: &str,
) -> Result<BTreeMap<&'static str, String>, ConfigurationError> {
    let parsed = url::Url::parse(image_url).map_err(|e| ConfigurationError::InvalidImageUrl {
        url: image_url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigurationError::InvalidImageUrl {
            url: image_url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    let encoded: String = url::form_urlencoded::byte_serialize(image_url.as_bytes()).collect();

    let mut links = BTreeMap::new();
    links.insert(
        "Google",
        format!("https://lens.google.com/uploadbyurl?url={encoded}"),
    );
    links.insert(
        "Bing",
        format!(
            "https://www.bing.com/images/search?view=detailv2&iss=sbi&form=SBIVSP&sbisrc=UrlPaste&q=imgurl:{encoded}"
        ),
    );
    links.insert(
        "Yandex",
        format!("https://yandex.com/images/search?source=collections&url={encoded}&rpt=imageview"),
    );
    links.insert(
        "Baidu",
        format!("https://graph.baidu.com/details?isfromtusoupc=1&tn=pc&carousel=0&image={encoded}"),
    );
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_all_engines() {
        let links = build_reverse_image_links("https://example.com/photo.jpg").unwrap();
        assert_eq!(links.len(), 4);
        for engine in ["Google", "Bing", "Yandex", "Baidu"] {
            assert!(links.contains_key(engine), "missing {engine}");
        }
    }

    #[test]
    fn test_image_url_is_encoded() {
        let links = build_reverse_image_links("https://example.com/a photo.jpg?x=1&y=2").unwrap();
        let google = &links["Google"];
        // Scheme, separators, and the inner query must all be escaped
        assert!(google.contains("url=https%3A%2F%2Fexample.com%2Fa+photo.jpg%3Fx%3D1%26y%3D2"));
        assert!(!google.contains("a photo"));
        assert!(!google.contains("&y=2"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(build_reverse_image_links("not a url").is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = build_reverse_image_links("ftp://example.com/photo.jpg").unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_deterministic_ordering() {
        let links = build_reverse_image_links("https://example.com/p.png").unwrap();
        let engines: Vec<&&str> = links.keys().collect();
        assert_eq!(engines, vec![&"Baidu", &"Bing", &"Google", &"Yandex"]);
    }
}
