//! Text rendering of the player state

use std::fmt::Write as _;

use super::state::AppState;

const TV_BANNER: &str =
    "[TV] up/down: channel  c: channel list  enter: play  p: pause  f: fullscreen  t: exit TV mode  q: quit";
const DESKTOP_HINT: &str = "Type a channel number to play it, 't' for TV mode, 'load <preset|url|file>', 'q' to quit";

/// Render the channel list and status line
///
/// `>` marks the playing channel and `*` the overlay cursor. In TV mode with
/// the overlay hidden only the playing channel is shown.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", if state.tv_mode { TV_BANNER } else { DESKTOP_HINT });
    if let Some(source) = &state.source {
        let _ = writeln!(out, "Playlist: {} ({} channels)", source, state.entries.len());
    }
    if let Some(status) = &state.status {
        let _ = writeln!(out, "{status}");
    }

    if state.tv_mode && !state.overlay_visible {
        if let Some((index, entry)) = state
            .current_channel
            .and_then(|index| state.entries.get(index).map(|entry| (index, entry)))
        {
            let _ = writeln!(out, "Now playing: {:>3}. {}", index + 1, entry.display_name(index));
        }
        return out;
    }

    for (index, entry) in state.entries.iter().enumerate() {
        let marker = if state.current_channel == Some(index) {
            '>'
        } else if state.focused == Some(index) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{marker} {:>3}. {}", index + 1, entry.display_name(index));
    }

    out
}
