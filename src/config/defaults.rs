/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.

// Config file
pub const DEFAULT_CONFIG_FILE: &str = "iptv-player.toml";
pub const CONFIG_FILE_ENV: &str = "IPTV_PLAYER_CONFIG";

// Preset playlists
pub const DEFAULT_PRESETS: &[(&str, &str)] = &[
    ("Vietnamese TV", "https://iptv-org.github.io/iptv/countries/vn.m3u"),
    ("International TV", "https://iptv-org.github.io/iptv/index.m3u"),
];

// HTTP defaults
pub const DEFAULT_CONNECT_TIMEOUT: &str = "10s";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "60s";
pub const DEFAULT_MAX_PLAYLIST_BYTES: usize = 64 * 1024 * 1024; // 64MB

// Player defaults
pub const DEFAULT_PLAYER_PROGRAM: &str = "mpv";
pub const URL_PLACEHOLDER: &str = "{url}";
pub const DEFAULT_PAUSE_COMMAND: &str = "cycle pause";
pub const DEFAULT_FULLSCREEN_COMMAND: &str = "cycle fullscreen";

// UI defaults
pub const DEFAULT_TV_MODE_MIN_WIDTH: u32 = 1400;
pub const DEFAULT_EVENT_BUFFER: usize = 64;
