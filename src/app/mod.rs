//! Interactive player
//!
//! [`state`] holds the reducer, [`view`] turns state into text, [`input`]
//! maps stdin lines to events and [`runner`] drives the whole thing.

pub mod input;
pub mod runner;
pub mod state;
pub mod view;

pub use input::parse_input;
pub use runner::{App, spawn_input_reader, spawn_playlist_load};
pub use state::{Action, AppState, Event, Key};
pub use view::render;
