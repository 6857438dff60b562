//! URL utilities for playlist and stream locators
//!
//! Playlist locators are frequently provider URLs carrying credentials in the
//! userinfo part or in query parameters, so anything that ends up in a log
//! line or status message should go through [`UrlUtils::obfuscate_credentials`].

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static USERINFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z][a-z0-9+.\-]*://)[^/@\s?#]+@").expect("static userinfo pattern")
});

static SENSITIVE_PARAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([?&](?:username|password|user|pass|pwd|passwd|token)=)[^&\s)]*")
        .expect("static query parameter pattern")
});

/// URL utilities for consistent locator handling
pub struct UrlUtils;

impl UrlUtils {
    /// Parse a locator and require an `http` or `https` scheme
    pub fn parse_http(url: &str) -> Option<Url> {
        Url::parse(url.trim())
            .ok()
            .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
    }

    /// Whether the string looks like an HTTP(S) URL rather than a file path
    pub fn is_http(url: &str) -> bool {
        Self::parse_http(url).is_some()
    }

    /// Path component of a locator, without query or fragment
    ///
    /// Opaque locators that do not parse as URLs are returned with any
    /// `?query` or `#fragment` suffix removed.
    pub fn locator_path(locator: &str) -> String {
        match Url::parse(locator) {
            Ok(parsed) if !parsed.cannot_be_a_base() => parsed.path().to_string(),
            _ => locator
                .split(['?', '#'])
                .next()
                .unwrap_or(locator)
                .to_string(),
        }
    }

    /// Mask credentials in a URL or in free text that contains URLs
    ///
    /// Handles `user:pass@host` userinfo and common credential query
    /// parameters (`username`, `password`, `token`, ...).
    pub fn obfuscate_credentials(text: &str) -> String {
        let masked = USERINFO.replace_all(text, "${1}****:****@");
        SENSITIVE_PARAMS
            .replace_all(&masked, "${1}****")
            .into_owned()
    }
}
