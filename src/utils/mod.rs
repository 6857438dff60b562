//! Utility modules shared across the player

pub mod decompression;
pub mod url;

pub use decompression::{CompressionFormat, DecompressionService};
