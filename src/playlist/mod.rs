//! M3U playlist reading and writing

pub mod parser;
pub mod writer;

pub use parser::parse;
pub use writer::to_m3u;
