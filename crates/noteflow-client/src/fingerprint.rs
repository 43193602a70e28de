//! Request fingerprints for retry de-duplication.

use std::fmt;

/// Identifies a logical retryable request: method plus URL.
///
/// Two failures with the same fingerprint are treated as the same logical
/// call for refresh de-duplication. The request body is deliberately not
/// part of the key; a replay reuses the original request anyway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    method: String,
    url: String,
}

impl Fingerprint {
    /// Build a fingerprint from a method and URL.
    pub fn new(method: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            method: method.as_ref().to_uppercase(),
            url: url.into(),
        }
    }

    /// The (uppercased) HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_method_colon_url() {
        let fp = Fingerprint::new("GET", "https://api.example.com/notes");
        assert_eq!(fp.to_string(), "GET:https://api.example.com/notes");
    }

    #[test]
    fn test_method_is_normalized_to_uppercase() {
        let lower = Fingerprint::new("get", "/notes");
        let upper = Fingerprint::new("GET", "/notes");
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_distinct_urls_are_distinct_fingerprints() {
        let a = Fingerprint::new("GET", "/notes");
        let b = Fingerprint::new("GET", "/labels");
        assert_ne!(a, b);
    }

    #[test]
    fn test_distinct_methods_are_distinct_fingerprints() {
        let a = Fingerprint::new("GET", "/notes");
        let b = Fingerprint::new("DELETE", "/notes");
        assert_ne!(a, b);
    }
}
