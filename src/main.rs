use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;

use iptv_player::{
    app::{App, AppState, Event, spawn_input_reader, spawn_playlist_load},
    config::{Config, defaults::CONFIG_FILE_ENV},
    observability::{LogFormat, init_tracing},
    playback::{Player, ProcessPlayer},
    sources::{PlaylistLoader, SourceLoader, resolve_source},
};

#[derive(Parser)]
#[command(name = "iptv-player")]
#[command(version)]
#[command(about = "Browse and play IPTV channels from M3U playlists")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a playlist and print its channels
    List {
        /// Preset name, http(s) URL or file path
        source: Option<String>,

        /// Print the channels as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show the configured presets
    Presets,
    /// Play one channel and wait for the player to exit
    Play {
        source: Option<String>,

        /// 1-based channel number
        #[arg(short = 'n', long)]
        channel: usize,
    },
    /// Interactive channel browser reading commands from stdin
    Watch {
        source: Option<String>,

        /// Start in TV mode
        #[arg(long)]
        tv: bool,

        /// Screen width in pixels, switches to TV mode when wide enough
        #[arg(long, value_name = "PX")]
        width: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    init_tracing(&cli.log_level, format);

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(),
    }
    .with_context(|| {
        format!(
            "Failed to load configuration (set --config or {})",
            CONFIG_FILE_ENV
        )
    })?;

    match cli.command {
        Command::List { source, json } => list(&config, source.as_deref(), json).await,
        Command::Presets => {
            for preset in &config.presets {
                let marker = if config.default_preset.as_deref() == Some(preset.name.as_str()) {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}: {}", preset.name, marker, preset.url);
            }
            Ok(())
        }
        Command::Play { source, channel } => play(&config, source.as_deref(), channel).await,
        Command::Watch { source, tv, width } => watch(config, source.as_deref(), tv, width).await,
    }
}

async fn list(config: &Config, source: Option<&str>, json: bool) -> Result<()> {
    let source = resolve_source(source, config)?;
    let loader = SourceLoader::new(&config.http)?;
    let playlist = loader.load(&source).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&playlist.entries)?);
        return Ok(());
    }

    if playlist.is_empty() {
        println!("{}", iptv_player::app::state::NO_STREAMS_MESSAGE);
    }
    for (index, entry) in playlist.entries.iter().enumerate() {
        println!("{:>4}. {}  {}", index + 1, entry.display_name(index), entry.url);
    }
    Ok(())
}

async fn play(config: &Config, source: Option<&str>, channel: usize) -> Result<()> {
    let source = resolve_source(source, config)?;
    let loader = SourceLoader::new(&config.http)?;
    let playlist = loader.load(&source).await?;

    let Some(entry) = channel.checked_sub(1).and_then(|index| playlist.get(index)) else {
        bail!(
            "Channel {} is out of range, the playlist has {} channels",
            channel,
            playlist.len()
        );
    };

    let mut player = ProcessPlayer::new(config.player.clone());
    let strategy = player.play(&entry.url).await?;
    println!("Playing {} ({})", entry.display_name(channel - 1), strategy);

    if let Some(status) = player.wait().await? {
        info!("Player finished: {}", status);
    }
    Ok(())
}

async fn watch(config: Config, source: Option<&str>, tv: bool, width: Option<u32>) -> Result<()> {
    let config = Arc::new(config);
    let loader: Arc<dyn PlaylistLoader> = Arc::new(SourceLoader::new(&config.http)?);
    let (tx, rx) = mpsc::channel(config.ui.event_buffer);

    let source = resolve_source(source, &config)?;

    let mut state = AppState::new(config.ui.tv_mode_min_width);
    state.tv_mode = tv;
    if let Some(width) = width {
        state.handle(Event::Resize { width });
    }

    let app = App::new(
        state,
        ProcessPlayer::new(config.player.clone()),
        std::io::stdout(),
        loader.clone(),
        config.clone(),
        tx.clone(),
    );

    spawn_playlist_load(loader, source, tx.clone());

    let interrupt = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, shutting down");
            let _ = interrupt.send(Event::Quit).await;
        }
    });

    spawn_input_reader(tx);
    app.run(rx).await?;
    Ok(())
}
