use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

use crate::errors::{AppError, AppResult};
use crate::models::PlaylistSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preset loaded when no source is given; falls back to the first preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_preset: Option<String>,
    #[serde(default = "default_presets")]
    pub presets: Vec<PresetConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Named playlist offered out of the box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(with = "duration_serde::duration", default = "default_connect_timeout")]
    pub connect_timeout: Duration,
    /// Total time allowed for a playlist download
    #[serde(with = "duration_serde::duration", default = "default_request_timeout")]
    pub request_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_playlist_bytes")]
    pub max_playlist_bytes: usize,
}

/// External player invocation; `{url}` in `args` is replaced by the stream locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Whether the direct player can open HLS manifests itself
    #[serde(default = "default_native_hls")]
    pub native_hls: bool,
    /// Line written to the player's stdin to toggle pause
    #[serde(default = "default_pause_command")]
    pub pause_command: String,
    /// Line written to the player's stdin to toggle fullscreen
    #[serde(default = "default_fullscreen_command")]
    pub fullscreen_command: String,
    /// Player used for HLS manifests. Omitting it from a `[player]` section
    /// disables adaptive playback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive: Option<PlayerCommand>,
    #[serde(default = "default_direct_command")]
    pub direct: PlayerCommand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Terminal/window width at which TV mode switches on by itself
    #[serde(default = "default_tv_mode_min_width")]
    pub tv_mode_min_width: u32,
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_presets() -> Vec<PresetConfig> {
    DEFAULT_PRESETS
        .iter()
        .map(|(name, url)| PresetConfig {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

fn default_connect_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_CONNECT_TIMEOUT).unwrap_or(Duration::from_secs(10))
}

fn default_request_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_REQUEST_TIMEOUT).unwrap_or(Duration::from_secs(60))
}

fn default_user_agent() -> String {
    format!("iptv-player/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_playlist_bytes() -> usize {
    DEFAULT_MAX_PLAYLIST_BYTES
}

fn default_native_hls() -> bool {
    true
}

fn default_pause_command() -> String {
    DEFAULT_PAUSE_COMMAND.to_string()
}

fn default_fullscreen_command() -> String {
    DEFAULT_FULLSCREEN_COMMAND.to_string()
}

fn mpv_command(extra: &[&str]) -> PlayerCommand {
    let mut args: Vec<String> = vec![
        "--really-quiet".to_string(),
        "--input-file=/dev/stdin".to_string(),
    ];
    args.extend(extra.iter().map(|arg| arg.to_string()));
    args.push(URL_PLACEHOLDER.to_string());
    PlayerCommand {
        program: DEFAULT_PLAYER_PROGRAM.to_string(),
        args,
    }
}

fn default_adaptive_command() -> Option<PlayerCommand> {
    Some(mpv_command(&["--hls-bitrate=max"]))
}

fn default_direct_command() -> PlayerCommand {
    mpv_command(&[])
}

fn default_tv_mode_min_width() -> u32 {
    DEFAULT_TV_MODE_MIN_WIDTH
}

fn default_event_buffer() -> usize {
    DEFAULT_EVENT_BUFFER
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            max_playlist_bytes: default_max_playlist_bytes(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            native_hls: default_native_hls(),
            pause_command: default_pause_command(),
            fullscreen_command: default_fullscreen_command(),
            adaptive: default_adaptive_command(),
            direct: default_direct_command(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tv_mode_min_width: default_tv_mode_min_width(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_preset: None,
            presets: default_presets(),
            http: HttpConfig::default(),
            player: PlayerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl PlayerCommand {
    /// Arguments with the `{url}` placeholder filled in
    pub fn resolve_args(&self, url: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(URL_PLACEHOLDER, url))
            .collect()
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let config_file =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Read the config file, writing out the defaults when it does not exist yet
    pub fn load_from_file(config_file: &str) -> AppResult<Self> {
        let config = if Path::new(config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Self::from_toml(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::configuration(format!("Failed to render defaults: {e}")))?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents)
            .map_err(|e| AppError::configuration(format!("Invalid config file: {e}")))
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut seen = std::collections::HashSet::new();
        for preset in &self.presets {
            if preset.name.trim().is_empty() {
                return Err(AppError::configuration("Preset names must not be empty"));
            }
            if !seen.insert(preset.name.to_lowercase()) {
                return Err(AppError::configuration(format!(
                    "Duplicate preset name: {}",
                    preset.name
                )));
            }
        }

        if let Some(name) = &self.default_preset
            && self.preset(name).is_none()
        {
            return Err(AppError::configuration(format!(
                "default_preset '{name}' does not match any configured preset"
            )));
        }

        if self.player.direct.program.trim().is_empty() {
            return Err(AppError::configuration("player.direct.program must not be empty"));
        }
        if let Some(adaptive) = &self.player.adaptive
            && adaptive.program.trim().is_empty()
        {
            return Err(AppError::configuration("player.adaptive.program must not be empty"));
        }

        if self.ui.event_buffer == 0 {
            return Err(AppError::configuration("ui.event_buffer must be at least 1"));
        }

        Ok(())
    }

    /// Look up a preset by name, ignoring case
    pub fn preset(&self, name: &str) -> Option<&PresetConfig> {
        self.presets
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Source used when the user does not name one
    pub fn default_source(&self) -> Option<PlaylistSource> {
        let preset = match &self.default_preset {
            Some(name) => self.preset(name),
            None => self.presets.first(),
        }?;
        Some(PlaylistSource::Preset {
            name: preset.name.clone(),
            url: preset.url.clone(),
        })
    }
}
