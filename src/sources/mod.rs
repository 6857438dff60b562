//! Playlist sources
//!
//! A playlist can come from a local file, an HTTP(S) URL, or a named preset
//! from the configuration. [`SourceLoader`] routes each kind to the right
//! loader; [`resolve_source`] turns a command-line argument into a source.

pub mod file;
pub mod http;
pub mod traits;

pub use file::FilePlaylistLoader;
pub use http::HttpPlaylistLoader;
pub use traits::PlaylistLoader;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::{Config, HttpConfig};
use crate::errors::{SourceError, SourceResult};
use crate::models::PlaylistSource;
use crate::utils::url::UrlUtils;

/// Decode playlist bytes, replacing invalid UTF-8 and dropping a leading BOM
pub fn decode_playlist_bytes(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text.into_owned(),
    }
}

/// Interpret a user-supplied source argument
///
/// Preset names take priority, then HTTP(S) URLs; anything else with a
/// `scheme://` prefix is rejected and the rest is treated as a file path.
/// Without an argument the configured default preset is used.
pub fn resolve_source(arg: Option<&str>, config: &Config) -> SourceResult<PlaylistSource> {
    let Some(arg) = arg.map(str::trim).filter(|a| !a.is_empty()) else {
        return config
            .default_source()
            .ok_or_else(|| SourceError::UnknownPreset {
                name: config
                    .default_preset
                    .clone()
                    .unwrap_or_else(|| "(default)".to_string()),
            });
    };

    if let Some(preset) = config.preset(arg) {
        return Ok(PlaylistSource::Preset {
            name: preset.name.clone(),
            url: preset.url.clone(),
        });
    }

    if UrlUtils::is_http(arg) {
        return Ok(PlaylistSource::Url(arg.to_string()));
    }

    if arg.contains("://") {
        return Err(SourceError::invalid_url(arg));
    }

    Ok(PlaylistSource::File(PathBuf::from(arg)))
}

/// Routes sources to the file or HTTP loader
pub struct SourceLoader {
    file: FilePlaylistLoader,
    http: HttpPlaylistLoader,
}

impl SourceLoader {
    pub fn new(config: &HttpConfig) -> SourceResult<Self> {
        Ok(Self {
            file: FilePlaylistLoader::with_limit(config.max_playlist_bytes),
            http: HttpPlaylistLoader::new(config)?,
        })
    }
}

#[async_trait]
impl PlaylistLoader for SourceLoader {
    async fn load_text(&self, source: &PlaylistSource) -> SourceResult<String> {
        match source {
            PlaylistSource::File(_) => self.file.load_text(source).await,
            PlaylistSource::Url(_) => self.http.load_text(source).await,
            PlaylistSource::Preset { url, .. } if UrlUtils::is_http(url) => {
                self.http.load_text(source).await
            }
            PlaylistSource::Preset { .. } => self.file.load_text(source).await,
        }
    }
}
