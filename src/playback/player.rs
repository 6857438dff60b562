use async_trait::async_trait;

use super::PlaybackStrategy;
use crate::errors::PlaybackResult;

/// A playback backend holding at most one active session
///
/// Starting a new stream replaces the current session; sessions are never pooled.
#[async_trait]
pub trait Player: Send {
    /// Start playing `url`, replacing whatever is playing now
    async fn play(&mut self, url: &str) -> PlaybackResult<PlaybackStrategy>;

    /// Stop the current session, if any
    async fn stop(&mut self) -> PlaybackResult<()>;

    async fn toggle_pause(&mut self) -> PlaybackResult<()>;

    async fn toggle_fullscreen(&mut self) -> PlaybackResult<()>;

    /// Whether a session is running
    fn is_active(&mut self) -> bool;
}
