//! M3U playlist parser
//!
//! Turns raw M3U/M3U8 text into an ordered list of [`ChannelEntry`] values.
//! The parser is total: it never fails, and malformed input simply yields
//! fewer entries.
//!
//! Rules, applied per line with whitespace and any byte order mark trimmed:
//! - `#EXTINF:` lines set the pending name to the text after the last comma
//!   (or clear it when the line has no comma)
//! - any other non-empty line not starting with `#` is a locator and emits an entry
//! - blank lines and other `#` directives are skipped
//!
//! Names are never synthesized. A locator without preceding metadata yields
//! an entry whose `name` is `None`.

use tracing::debug;

use crate::models::ChannelEntry;

/// Per-entry metadata marker
pub const EXTINF_PREFIX: &str = "#EXTINF:";

/// Header written at the top of extended M3U files
pub const EXTM3U_HEADER: &str = "#EXTM3U";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Entry under construction
#[derive(Debug, Default)]
struct PendingEntry {
    name: Option<String>,
}

impl PendingEntry {
    fn complete(&mut self, url: &str) -> ChannelEntry {
        ChannelEntry::new(self.name.take(), url)
    }
}

/// Parse playlist text into channel entries, in locator order
pub fn parse(content: &str) -> Vec<ChannelEntry> {
    let mut entries = Vec::new();
    let mut pending = PendingEntry::default();

    // `lines` splits on `\n` and drops a trailing `\r`, covering mixed endings
    for line in content.lines() {
        let line = line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);

        if line.starts_with(EXTINF_PREFIX) {
            pending.name = extinf_name(line).map(str::to_string);
        } else if !line.is_empty() && !line.starts_with('#') {
            entries.push(pending.complete(line));
        }
    }

    debug!(
        "Parsed {} playlist entries (dangling metadata: {})",
        entries.len(),
        pending.name.is_some()
    );

    entries
}

/// Display name carried by an `#EXTINF:` line: everything after the last comma
fn extinf_name(line: &str) -> Option<&str> {
    line.rfind(',').map(|pos| &line[pos + 1..])
}
