//! # Request ID Tracking
//!
//! Request identifiers propagated through the `x-request-id` header.
//! Uses CUID2 for collision-resistant, URL-safe identifiers.

use std::str::FromStr;

/// Header carrying the request ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID using CUID2.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl FromStr for RequestId {
    type Err = String;

    /// Accepts 20 to 64 URL-safe characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid_len = (20 ..= 64).contains(&s.len());
        if valid_len &&
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(Self(s.to_string()))
        }
        else {
            Err("Invalid request ID format".to_string())
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

/// Reuse a well-formed incoming header value or mint a fresh ID.
pub fn from_header_or_new(value: Option<&str>) -> RequestId {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_from_str() {
        let cuid = "k192v2g4w3zq8h6j5k12345678";
        let id: RequestId = cuid.parse().unwrap();
        assert_eq!(id.as_str(), cuid);
    }

    #[test]
    fn test_request_id_from_str_invalid() {
        assert!("short".parse::<RequestId>().is_err());
        assert!("invalid!@#invalid!@#invalid".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_from_header_or_new() {
        let kept = from_header_or_new(Some("abcdefghijklmnopqrstuvwx"));
        assert_eq!(kept.as_str(), "abcdefghijklmnopqrstuvwx");

        let fresh = from_header_or_new(Some("bad"));
        assert_ne!(fresh.as_str(), "bad");
        assert!(!fresh.as_str().is_empty());
    }
}
