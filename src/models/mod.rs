//! Core playlist data types shared across the player.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A single playlist entry
///
/// `name` is whatever followed the last comma of the preceding `#EXTINF:`
/// line. It stays `None` when there was no metadata line; any display
/// fallback is applied by the renderer through [`ChannelEntry::display_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
}

impl ChannelEntry {
    pub fn new(name: Option<String>, url: impl Into<String>) -> Self {
        Self {
            name,
            url: url.into(),
        }
    }

    /// Label shown in channel lists. `index` is zero-based.
    pub fn display_name(&self, index: usize) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Stream {}", index + 1),
        }
    }
}

/// Where a playlist's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    File(PathBuf),
    Url(String),
    Preset { name: String, url: String },
}

impl PlaylistSource {
    /// Label used in logs and status text
    pub fn label(&self) -> String {
        match self {
            PlaylistSource::File(path) => path.display().to_string(),
            PlaylistSource::Url(url) => crate::utils::url::UrlUtils::obfuscate_credentials(url),
            PlaylistSource::Preset { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for PlaylistSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A parsed playlist together with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub source: PlaylistSource,
    pub entries: Vec<ChannelEntry>,
}

impl Playlist {
    pub fn new(source: PlaylistSource, entries: Vec<ChannelEntry>) -> Self {
        Self { source, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChannelEntry> {
        self.entries.get(index)
    }
}
