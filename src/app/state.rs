//! Application state and the event reducer
//!
//! All UI state lives in [`AppState`]. Input, loader results and playback
//! outcomes arrive as [`Event`]s; [`AppState::handle`] applies them and
//! returns the [`Action`]s the dispatch loop must carry out. The reducer
//! performs no I/O.

use crate::models::{ChannelEntry, Playlist, PlaylistSource};
use crate::playback::PlaybackStrategy;

pub const NO_STREAMS_MESSAGE: &str = "No streams found in the playlist.";
pub const PLAYER_EXITED_MESSAGE: &str = "Player exited. Select a channel to play again.";

/// Remote-control style keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    /// Show or hide the channel list
    ChannelList,
    PlayPause,
    Fullscreen,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// User asked for a playlist (preset name, URL or path)
    LoadRequested(String),
    PlaylistLoading(PlaylistSource),
    PlaylistLoaded(Playlist),
    PlaylistFailed(String),
    Key(Key),
    /// Pick a channel by zero-based index
    Select(usize),
    ToggleTvMode,
    Resize { width: u32 },
    PlaybackStarted { url: String, strategy: PlaybackStrategy },
    PlaybackFailed(String),
    /// The player process ended without being asked to
    PlayerExited,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Load(String),
    Play(String),
    TogglePause,
    ToggleFullscreen,
    Render,
    Quit,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub source: Option<PlaylistSource>,
    pub entries: Vec<ChannelEntry>,
    pub current_channel: Option<usize>,
    /// Cursor in the channel list overlay
    pub focused: Option<usize>,
    pub tv_mode: bool,
    pub overlay_visible: bool,
    pub status: Option<String>,
    tv_mode_min_width: u32,
}

impl AppState {
    pub fn new(tv_mode_min_width: u32) -> Self {
        Self {
            source: None,
            entries: Vec::new(),
            current_channel: None,
            focused: None,
            tv_mode: false,
            overlay_visible: true,
            status: None,
            tv_mode_min_width,
        }
    }

    pub fn current_entry(&self) -> Option<&ChannelEntry> {
        self.current_channel.and_then(|index| self.entries.get(index))
    }

    pub fn handle(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::LoadRequested(target) => vec![Action::Load(target)],
            Event::PlaylistLoading(source) => {
                self.status = Some(format!("Loading playlist from {source}..."));
                self.overlay_visible = true;
                vec![Action::Render]
            }
            Event::PlaylistLoaded(playlist) => {
                self.status = playlist
                    .is_empty()
                    .then(|| NO_STREAMS_MESSAGE.to_string());
                self.source = Some(playlist.source);
                self.entries = playlist.entries;
                self.current_channel = None;
                self.focused = None;
                vec![Action::Render]
            }
            Event::PlaylistFailed(message) => {
                self.status = Some(format!("Error loading playlist: {message}"));
                vec![Action::Render]
            }
            Event::Key(key) => self.handle_key(key),
            Event::Select(index) => self.select(index),
            Event::ToggleTvMode => {
                self.tv_mode = !self.tv_mode;
                vec![Action::Render]
            }
            Event::Resize { width } => {
                if width >= self.tv_mode_min_width && !self.tv_mode {
                    self.tv_mode = true;
                    vec![Action::Render]
                } else {
                    Vec::new()
                }
            }
            Event::PlaybackStarted { url, strategy } => {
                let label = self
                    .current_channel
                    .and_then(|index| self.entries.get(index).map(|entry| entry.display_name(index)))
                    .unwrap_or(url);
                self.status = Some(format!("Playing {label} ({strategy})"));
                vec![Action::Render]
            }
            Event::PlaybackFailed(message) => {
                self.status = Some(format!("Could not play stream: {message}"));
                vec![Action::Render]
            }
            Event::PlayerExited => {
                self.status = Some(PLAYER_EXITED_MESSAGE.to_string());
                vec![Action::Render]
            }
            Event::Quit => vec![Action::Quit],
        }
    }

    fn handle_key(&mut self, key: Key) -> Vec<Action> {
        if !self.tv_mode {
            // Focused list entries still respond to Enter outside TV mode
            return match key {
                Key::Enter => self.select_focused(),
                _ => Vec::new(),
            };
        }

        match key {
            Key::Up if self.overlay_visible => self.navigate(-1),
            Key::Up => self.change_channel(-1),
            Key::Down if self.overlay_visible => self.navigate(1),
            Key::Down => self.change_channel(1),
            Key::Enter => self.select_focused(),
            Key::ChannelList => self.toggle_overlay(),
            Key::PlayPause => vec![Action::TogglePause],
            Key::Fullscreen => vec![Action::ToggleFullscreen],
            Key::Other(_) => Vec::new(),
        }
    }

    fn select(&mut self, index: usize) -> Vec<Action> {
        let Some(entry) = self.entries.get(index) else {
            return Vec::new();
        };
        let url = entry.url.clone();
        self.current_channel = Some(index);
        self.focused = Some(index);
        self.overlay_visible = false;
        vec![Action::Play(url), Action::Render]
    }

    fn select_focused(&mut self) -> Vec<Action> {
        match self.focused {
            Some(index) if self.overlay_visible => self.select(index),
            _ => Vec::new(),
        }
    }

    /// Step the playing channel, wrapping at both ends
    fn change_channel(&mut self, direction: isize) -> Vec<Action> {
        let len = self.entries.len();
        if len == 0 {
            return Vec::new();
        }

        let next = match self.current_channel {
            None => 0,
            Some(current) => wrap_index(current, direction, len),
        };
        self.current_channel = Some(next);
        self.focused = Some(next);

        vec![Action::Play(self.entries[next].url.clone()), Action::Render]
    }

    /// Move the overlay cursor without starting playback
    fn navigate(&mut self, direction: isize) -> Vec<Action> {
        let len = self.entries.len();
        if len == 0 {
            return Vec::new();
        }

        let start = self.focused.or(self.current_channel).unwrap_or(0);
        let next = wrap_index(start, direction, len);
        self.focused = Some(next);
        self.current_channel = Some(next);
        vec![Action::Render]
    }

    fn toggle_overlay(&mut self) -> Vec<Action> {
        self.overlay_visible = !self.overlay_visible;
        if self.overlay_visible {
            self.focused = self.current_channel;
        }
        vec![Action::Render]
    }
}

fn wrap_index(index: usize, direction: isize, len: usize) -> usize {
    (index as isize + direction).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(count: usize) -> Playlist {
        let entries = (0..count)
            .map(|i| ChannelEntry::new(Some(format!("Channel {}", i + 1)), format!("http://a/{i}.m3u8")))
            .collect();
        Playlist::new(PlaylistSource::Url("http://a/list.m3u".to_string()), entries)
    }

    fn tv_state(count: usize) -> AppState {
        let mut state = AppState::new(1400);
        state.handle(Event::PlaylistLoaded(playlist(count)));
        state.handle(Event::ToggleTvMode);
        state.overlay_visible = false;
        state
    }

    #[test]
    fn test_empty_playlist_sets_status() {
        let mut state = AppState::new(1400);
        let actions = state.handle(Event::PlaylistLoaded(playlist(0)));
        assert_eq!(actions, vec![Action::Render]);
        assert_eq!(state.status.as_deref(), Some(NO_STREAMS_MESSAGE));
    }

    #[test]
    fn test_loading_resets_selection() {
        let mut state = tv_state(3);
        state.handle(Event::Select(2));
        state.handle(Event::PlaylistLoaded(playlist(1)));
        assert_eq!(state.current_channel, None);
        assert_eq!(state.focused, None);
        assert_eq!(state.status, None);
    }

    #[test]
    fn test_failed_load_reports_message() {
        let mut state = AppState::new(1400);
        state.handle(Event::PlaylistFailed("HTTP error! status: 404".to_string()));
        assert_eq!(
            state.status.as_deref(),
            Some("Error loading playlist: HTTP error! status: 404")
        );
    }

    #[test]
    fn test_select_plays_and_hides_overlay() {
        let mut state = AppState::new(1400);
        state.handle(Event::PlaylistLoaded(playlist(3)));

        let actions = state.handle(Event::Select(1));
        assert_eq!(
            actions,
            vec![Action::Play("http://a/1.m3u8".to_string()), Action::Render]
        );
        assert_eq!(state.current_channel, Some(1));
        assert!(!state.overlay_visible);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut state = AppState::new(1400);
        state.handle(Event::PlaylistLoaded(playlist(2)));
        assert!(state.handle(Event::Select(5)).is_empty());
        assert_eq!(state.current_channel, None);
    }

    #[test]
    fn test_keys_ignored_outside_tv_mode() {
        let mut state = AppState::new(1400);
        state.handle(Event::PlaylistLoaded(playlist(3)));
        assert!(state.handle(Event::Key(Key::Down)).is_empty());
        assert!(state.handle(Event::Key(Key::PlayPause)).is_empty());
        assert_eq!(state.current_channel, None);
    }

    #[test]
    fn test_change_channel_starts_at_first() {
        let mut state = tv_state(3);
        let actions = state.handle(Event::Key(Key::Up));
        assert_eq!(actions[0], Action::Play("http://a/0.m3u8".to_string()));
        assert_eq!(state.current_channel, Some(0));
    }

    #[test]
    fn test_change_channel_wraps_both_ways() {
        let mut state = tv_state(3);
        state.handle(Event::Key(Key::Down)); // 0
        state.handle(Event::Key(Key::Up)); // wraps to 2
        assert_eq!(state.current_channel, Some(2));
        state.handle(Event::Key(Key::Down)); // wraps to 0
        assert_eq!(state.current_channel, Some(0));
        assert_eq!(state.focused, Some(0));
    }

    #[test]
    fn test_change_channel_on_empty_playlist() {
        let mut state = tv_state(0);
        assert!(state.handle(Event::Key(Key::Down)).is_empty());
        assert_eq!(state.current_channel, None);
    }

    #[test]
    fn test_overlay_navigation_moves_cursor_without_playing() {
        let mut state = tv_state(3);
        state.handle(Event::Key(Key::ChannelList));
        assert!(state.overlay_visible);

        let actions = state.handle(Event::Key(Key::Down));
        assert_eq!(actions, vec![Action::Render]);
        assert_eq!(state.focused, Some(1));

        state.handle(Event::Key(Key::Up));
        state.handle(Event::Key(Key::Up));
        assert_eq!(state.focused, Some(2));
    }

    #[test]
    fn test_enter_plays_focused_entry() {
        let mut state = tv_state(3);
        state.handle(Event::Key(Key::ChannelList));
        state.handle(Event::Key(Key::Down));

        let actions = state.handle(Event::Key(Key::Enter));
        assert_eq!(
            actions,
            vec![Action::Play("http://a/1.m3u8".to_string()), Action::Render]
        );
        assert!(!state.overlay_visible);
    }

    #[test]
    fn test_opening_overlay_focuses_current_channel() {
        let mut state = tv_state(4);
        state.handle(Event::Select(3));
        state.handle(Event::Key(Key::ChannelList));
        assert!(state.overlay_visible);
        assert_eq!(state.focused, Some(3));
    }

    #[test]
    fn test_media_keys() {
        let mut state = tv_state(1);
        assert_eq!(state.handle(Event::Key(Key::PlayPause)), vec![Action::TogglePause]);
        assert_eq!(
            state.handle(Event::Key(Key::Fullscreen)),
            vec![Action::ToggleFullscreen]
        );
        assert!(state.handle(Event::Key(Key::Other("x".to_string()))).is_empty());
    }

    #[test]
    fn test_resize_enables_tv_mode() {
        let mut state = AppState::new(1400);
        assert!(state.handle(Event::Resize { width: 1280 }).is_empty());
        assert!(!state.tv_mode);
        assert_eq!(state.handle(Event::Resize { width: 1920 }), vec![Action::Render]);
        assert!(state.tv_mode);
        assert!(state.handle(Event::Resize { width: 1920 }).is_empty());
    }

    #[test]
    fn test_playback_outcomes_update_status() {
        let mut state = tv_state(2);
        state.handle(Event::Select(1));
        state.handle(Event::PlaybackStarted {
            url: "http://a/1.m3u8".to_string(),
            strategy: PlaybackStrategy::Adaptive,
        });
        assert_eq!(state.status.as_deref(), Some("Playing Channel 2 (adaptive HLS)"));

        state.handle(Event::PlaybackFailed("no player".to_string()));
        assert_eq!(state.status.as_deref(), Some("Could not play stream: no player"));
    }

    #[test]
    fn test_player_exit_keeps_selection() {
        let mut state = tv_state(2);
        state.handle(Event::Select(1));
        assert_eq!(state.handle(Event::PlayerExited), vec![Action::Render]);
        assert_eq!(state.status.as_deref(), Some(PLAYER_EXITED_MESSAGE));
        assert_eq!(state.current_channel, Some(1));
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 5), 4);
        assert_eq!(wrap_index(4, 1, 5), 0);
        assert_eq!(wrap_index(2, 1, 5), 3);
        assert_eq!(wrap_index(0, 1, 1), 0);
    }
}
