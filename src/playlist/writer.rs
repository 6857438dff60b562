//! Extended M3U writer

use crate::models::ChannelEntry;

use super::parser::{EXTINF_PREFIX, EXTM3U_HEADER};

/// Serialize entries as extended M3U text
///
/// Entries with a name get an `#EXTINF:-1,<name>` line. Newlines inside a
/// name or locator are flattened to spaces so each entry stays on its own lines.
pub fn to_m3u(entries: &[ChannelEntry]) -> String {
    let mut out = String::with_capacity(16 + entries.len() * 64);
    out.push_str(EXTM3U_HEADER);
    out.push('\n');

    for entry in entries {
        if let Some(name) = &entry.name {
            out.push_str(EXTINF_PREFIX);
            out.push_str("-1,");
            out.push_str(&single_line(name));
            out.push('\n');
        }
        out.push_str(&single_line(&entry.url));
        out.push('\n');
    }

    out
}

fn single_line(value: &str) -> String {
    value.replace('\n', " ")
}
