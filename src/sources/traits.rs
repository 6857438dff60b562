use async_trait::async_trait;
use tracing::info;

use crate::errors::SourceResult;
use crate::models::{Playlist, PlaylistSource};
use crate::playlist::parse;

/// Anything that can turn a [`PlaylistSource`] into playlist text
#[async_trait]
pub trait PlaylistLoader: Send + Sync {
    /// Fetch the raw playlist text
    async fn load_text(&self, source: &PlaylistSource) -> SourceResult<String>;

    /// Fetch and parse the playlist
    ///
    /// An empty result is not an error; callers report "no streams" themselves.
    async fn load(&self, source: &PlaylistSource) -> SourceResult<Playlist> {
        let text = self.load_text(source).await?;
        let entries = parse(&text);
        info!(
            "Loaded {} channels from '{}' ({} bytes)",
            entries.len(),
            source,
            text.len()
        );
        Ok(Playlist::new(source.clone(), entries))
    }
}
