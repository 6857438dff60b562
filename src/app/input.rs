//! Terminal input mapping
//!
//! The interactive loop reads whole lines from stdin. Each line maps to at
//! most one [`Event`]; unknown input becomes `Key::Other` so the reducer can
//! ignore it.

use super::state::{Event, Key};

pub fn parse_input(line: &str) -> Event {
    // A lone space is the play/pause key, so check before trimming
    if line.trim_end_matches(['\r', '\n']) == " " {
        return Event::Key(Key::PlayPause);
    }

    let trimmed = line.trim();
    if let Some(target) = trimmed
        .get(..5)
        .filter(|prefix| prefix.eq_ignore_ascii_case("load "))
        .map(|_| &trimmed[5..])
    {
        return Event::LoadRequested(target.trim().to_string());
    }

    if let Ok(number) = trimmed.parse::<usize>() {
        return match number.checked_sub(1) {
            Some(index) => Event::Select(index),
            None => Event::Key(Key::Other(trimmed.to_string())),
        };
    }

    match trimmed.to_lowercase().as_str() {
        "" | "enter" => Event::Key(Key::Enter),
        "up" | "k" | "w" => Event::Key(Key::Up),
        "down" | "j" | "s" => Event::Key(Key::Down),
        "c" | "channels" => Event::Key(Key::ChannelList),
        "p" | "space" | "pause" => Event::Key(Key::PlayPause),
        "f" | "fullscreen" => Event::Key(Key::Fullscreen),
        "t" | "tv" => Event::ToggleTvMode,
        "q" | "quit" | "exit" => Event::Quit,
        _ => Event::Key(Key::Other(trimmed.to_string())),
    }
}
