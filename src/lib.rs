pub mod app;
pub mod config;
pub mod errors;
pub mod models;
pub mod observability;
pub mod playback;
pub mod playlist;
pub mod sources;
pub mod utils;
