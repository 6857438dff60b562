//! Centralized error handling for the IPTV player
//!
//! The playlist parser itself has no error type: it is total over all input.
//! Everything around it (fetching playlists, launching players, loading
//! configuration) reports failures through the types defined here.
//!
//! # Error Categories
//!
//! - **Source Errors**: reading playlists from files, URLs and presets
//! - **Playback Errors**: launching and controlling the player process
//! - **Configuration Errors**: invalid or unreadable configuration
//!
//! # Usage
//!
//! ```rust
//! use iptv_player::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("missing preset"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for Playback Results
pub type PlaybackResult<T> = Result<T, PlaybackError>;
