//! HTTP playlist loader
//!
//! Downloads playlist text with a connect timeout, an overall request
//! timeout and a hard cap on body size. Provider playlists can run to tens
//! of megabytes, so the body is streamed and the cap checked per chunk
//! rather than trusting `Content-Length` alone.

use async_trait::async_trait;
use bytes::BytesMut;
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, warn};

use super::decode_playlist_bytes;
use super::traits::PlaylistLoader;
use crate::config::HttpConfig;
use crate::errors::{SourceError, SourceResult};
use crate::models::PlaylistSource;
use crate::utils::DecompressionService;
use crate::utils::url::UrlUtils;

pub struct HttpPlaylistLoader {
    client: Client,
    max_bytes: usize,
}

impl HttpPlaylistLoader {
    pub fn new(config: &HttpConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceError::request(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_bytes: config.max_playlist_bytes,
        })
    }

    /// Fetch a playlist over HTTP(S) and return its decoded text
    pub async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        let parsed = UrlUtils::parse_http(url).ok_or_else(|| SourceError::invalid_url(url))?;
        let display_url = UrlUtils::obfuscate_credentials(url);

        debug!("Fetching playlist from {}", display_url);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| SourceError::request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Playlist request to {} failed with status {}", display_url, status);
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length()
            && length > self.max_bytes as u64
        {
            return Err(SourceError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SourceError::request(e.to_string()))?;
            if body.len() + chunk.len() > self.max_bytes {
                return Err(SourceError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Downloaded {} bytes from {}", body.len(), display_url);

        let bytes = DecompressionService::decompress(body.freeze(), self.max_bytes)?;
        Ok(decode_playlist_bytes(&bytes))
    }
}

#[async_trait]
impl PlaylistLoader for HttpPlaylistLoader {
    async fn load_text(&self, source: &PlaylistSource) -> SourceResult<String> {
        match source {
            PlaylistSource::Url(url) | PlaylistSource::Preset { url, .. } => {
                self.fetch_text(url).await
            }
            PlaylistSource::File(path) => Err(SourceError::invalid_url(path.display().to_string())),
        }
    }
}
