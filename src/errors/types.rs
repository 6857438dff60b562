//! Error type definitions for the IPTV player

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Player process errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem errors outside playlist loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while obtaining playlist text
#[derive(Error, Debug)]
pub enum SourceError {
    /// The locator could not be parsed as an absolute URL
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The server answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Connection or transfer failure; `message` has credentials removed
    #[error("Request failed: {message}")]
    Request { message: String },

    /// Body exceeded the configured size cap
    #[error("Playlist exceeds size limit ({limit} bytes)")]
    TooLarge { limit: usize },

    /// Local file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compressed payload could not be expanded
    #[error("Failed to decompress playlist: {message}")]
    Decompression { message: String },

    /// Preset name not present in configuration
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },
}

/// Errors raised while launching or controlling a player
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// No command configured for the chosen strategy
    #[error("No player command configured for {strategy} playback")]
    NoCommand { strategy: String },

    /// The player process could not be started
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A control request could not be delivered to the running player
    #[error("Player control failed: {message}")]
    Control { message: String },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a request error, stripping credentials from the message
    pub fn request<S: AsRef<str>>(message: S) -> Self {
        Self::Request {
            message: crate::utils::url::UrlUtils::obfuscate_credentials(message.as_ref()),
        }
    }

    /// Create an invalid URL error with credentials removed
    pub fn invalid_url<S: AsRef<str>>(url: S) -> Self {
        Self::InvalidUrl {
            url: crate::utils::url::UrlUtils::obfuscate_credentials(url.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message() {
        let err = SourceError::Http { status: 404 };
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn test_request_error_hides_credentials() {
        let err = SourceError::request("error sending request for url (http://example.com/get.php?username=bob&password=hunter2)");
        let message = err.to_string();
        assert!(!message.contains("hunter2"));
        assert!(!message.contains("bob"));
    }

    #[test]
    fn test_source_error_converts_into_app_error() {
        let err: AppError = SourceError::UnknownPreset {
            name: "Radio".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Source(SourceError::UnknownPreset { .. })));
        assert_eq!(err.to_string(), "Source error: Unknown preset: Radio");
    }
}
