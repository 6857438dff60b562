//! Stream playback
//!
//! Playback is delegated to an external player process. This module decides
//! *how* a locator should be played and keeps at most one player session
//! alive at a time.

pub mod player;
pub mod process;

pub use player::Player;
pub use process::ProcessPlayer;

use std::fmt;

use crate::config::{PlayerCommand, PlayerConfig};
use crate::utils::url::UrlUtils;

/// Kind of stream behind a locator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// HLS manifest (`.m3u8`)
    Hls,
    /// Anything else: progressive HTTP, MPEG-TS, UDP multicast, RTMP...
    Direct,
}

impl StreamKind {
    pub fn classify(locator: &str) -> Self {
        let path = UrlUtils::locator_path(locator.trim());
        if path.to_ascii_lowercase().ends_with(".m3u8") {
            StreamKind::Hls
        } else {
            StreamKind::Direct
        }
    }
}

/// How a stream will be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStrategy {
    /// HLS through the adaptive-streaming player
    Adaptive,
    /// HLS handed to the direct player, which understands manifests itself
    NativeHls,
    /// Locator handed straight to the direct player
    Direct,
}

impl PlaybackStrategy {
    pub fn choose(locator: &str, config: &PlayerConfig) -> Self {
        match StreamKind::classify(locator) {
            StreamKind::Hls if config.adaptive.is_some() => PlaybackStrategy::Adaptive,
            StreamKind::Hls if config.native_hls => PlaybackStrategy::NativeHls,
            _ => PlaybackStrategy::Direct,
        }
    }

    /// Player command used for this strategy
    pub fn command<'a>(&self, config: &'a PlayerConfig) -> Option<&'a PlayerCommand> {
        match self {
            PlaybackStrategy::Adaptive => config.adaptive.as_ref(),
            PlaybackStrategy::NativeHls | PlaybackStrategy::Direct => Some(&config.direct),
        }
    }
}

impl fmt::Display for PlaybackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaybackStrategy::Adaptive => "adaptive HLS",
            PlaybackStrategy::NativeHls => "native HLS",
            PlaybackStrategy::Direct => "direct",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://cdn.example.com/live/index.m3u8", StreamKind::Hls)]
    #[case("https://cdn.example.com/live/INDEX.M3U8?token=abc", StreamKind::Hls)]
    #[case("http://cdn.example.com/live/stream.ts", StreamKind::Direct)]
    #[case("http://cdn.example.com/get?file=x.m3u8", StreamKind::Direct)]
    #[case("udp://@239.0.0.1:1234", StreamKind::Direct)]
    #[case("opaque/path/playlist.m3u8", StreamKind::Hls)]
    fn test_classify(#[case] locator: &str, #[case] expected: StreamKind) {
        assert_eq!(StreamKind::classify(locator), expected);
    }

    #[test]
    fn test_choose_prefers_adaptive_for_hls() {
        let config = PlayerConfig::default();
        assert_eq!(
            PlaybackStrategy::choose("http://a/live.m3u8", &config),
            PlaybackStrategy::Adaptive
        );
        assert_eq!(
            PlaybackStrategy::choose("http://a/live.ts", &config),
            PlaybackStrategy::Direct
        );
    }

    #[test]
    fn test_choose_native_hls_without_adaptive_player() {
        let config = PlayerConfig {
            adaptive: None,
            ..PlayerConfig::default()
        };
        assert_eq!(
            PlaybackStrategy::choose("http://a/live.m3u8", &config),
            PlaybackStrategy::NativeHls
        );
    }

    #[test]
    fn test_choose_direct_fallback_for_hls() {
        let config = PlayerConfig {
            adaptive: None,
            native_hls: false,
            ..PlayerConfig::default()
        };
        assert_eq!(
            PlaybackStrategy::choose("http://a/live.m3u8", &config),
            PlaybackStrategy::Direct
        );
    }

    #[test]
    fn test_strategy_command() {
        let config = PlayerConfig::default();
        assert_eq!(
            PlaybackStrategy::Direct.command(&config),
            Some(&config.direct)
        );
        assert_eq!(
            PlaybackStrategy::Adaptive.command(&config),
            config.adaptive.as_ref()
        );
    }
}
