//! Username validation.

use crate::config::MAX_USERNAME_LENGTH;
use crate::error_handling::SearchError;

/// Validates a username before any network activity.
///
/// Rejects empty or whitespace-only input, over-long input, embedded
/// whitespace, and characters that cannot appear in a profile URL path
/// without escaping. Accepted characters are ASCII alphanumerics plus
/// `.`, `_`, and `-`, which covers the naming rules of the cataloged
/// platforms.
pub fn validate_username(username: &str) -> Result<(), SearchError> {
    if username.trim().is_empty() {
        return Err(SearchError::InvalidUsername("username is empty".into()));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(SearchError::InvalidUsername(format!(
            "username exceeds {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(SearchError::InvalidUsername(format!(
            "unsupported character {:?}",
            bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["alice", "alice_smith", "Alice.Smith-99", "a", "0xdead"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            validate_username(""),
            Err(SearchError::InvalidUsername(_))
        ));
    }

    #[test]
    fn test_whitespace_only_rejected() {
        assert!(validate_username("   ").is_err());
    }

    #[test]
    fn test_embedded_whitespace_rejected() {
        assert!(validate_username("alice smith").is_err());
    }

    #[test]
    fn test_over_long_rejected() {
        let long = "a".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(validate_username(&long).is_err());
    }

    #[test]
    fn test_url_unsafe_characters_rejected() {
        for name in ["alice/smith", "alice?x", "a#b", "héllo"] {
            assert!(validate_username(name).is_err(), "{name} should be invalid");
        }
    }
}
