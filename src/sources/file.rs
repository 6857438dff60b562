use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::decode_playlist_bytes;
use super::traits::PlaylistLoader;
use crate::config::defaults::DEFAULT_MAX_PLAYLIST_BYTES;
use crate::errors::{SourceError, SourceResult};
use crate::models::PlaylistSource;
use crate::utils::DecompressionService;

/// Reads playlists from the local filesystem
///
/// Gzip-compressed files are expanded transparently and invalid UTF-8 is
/// replaced rather than rejected. Both the file and its expanded contents
/// are capped at `max_bytes`.
#[derive(Debug, Clone)]
pub struct FilePlaylistLoader {
    max_bytes: usize,
}

impl Default for FilePlaylistLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePlaylistLoader {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_PLAYLIST_BYTES)
    }

    pub fn with_limit(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub async fn read_text(&self, path: &Path) -> SourceResult<String> {
        debug!("Reading playlist file {}", path.display());

        let io_error = |source: std::io::Error| SourceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        if metadata.len() > self.max_bytes as u64 {
            return Err(SourceError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let raw = tokio::fs::read(path).await.map_err(io_error)?;

        let bytes = DecompressionService::decompress(Bytes::from(raw), self.max_bytes)?;
        Ok(decode_playlist_bytes(&bytes))
    }
}

#[async_trait]
impl PlaylistLoader for FilePlaylistLoader {
    async fn load_text(&self, source: &PlaylistSource) -> SourceResult<String> {
        match source {
            PlaylistSource::File(path) => self.read_text(path).await,
            PlaylistSource::Preset { url, .. } => self.read_text(Path::new(url)).await,
            PlaylistSource::Url(url) => Err(SourceError::invalid_url(url)),
        }
    }
}
