//! External player process management
//!
//! Each session is one child process started from the configured command
//! template. Control requests (pause, fullscreen) are written as lines to the
//! child's stdin, which suits players that accept an input command stream
//! such as mpv's `--input-file=/dev/stdin`.

use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command as TokioCommand};
use tracing::{debug, info, warn};

use super::{PlaybackStrategy, Player};
use crate::config::PlayerConfig;
use crate::errors::{PlaybackError, PlaybackResult};
use crate::utils::url::UrlUtils;

struct PlayerSession {
    child: Child,
    stdin: Option<ChildStdin>,
    url: String,
}

/// Plays streams by launching an external player per selection
pub struct ProcessPlayer {
    config: PlayerConfig,
    session: Option<PlayerSession>,
}

impl ProcessPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Close the player's input and wait for it to exit on its own
    pub async fn wait(&mut self) -> PlaybackResult<Option<ExitStatus>> {
        let Some(mut session) = self.session.take() else {
            return Ok(None);
        };
        drop(session.stdin.take());

        let status = session
            .child
            .wait()
            .await
            .map_err(|e| PlaybackError::Control {
                message: format!("Failed to wait for player: {e}"),
            })?;
        info!("Player exited with {}", status);
        Ok(Some(status))
    }

    async fn send_line(&mut self, line: &str) -> PlaybackResult<()> {
        let Some(session) = self.session.as_mut() else {
            debug!("No active player session, ignoring '{}'", line);
            return Ok(());
        };
        let Some(stdin) = session.stdin.as_mut() else {
            debug!("Player input closed, ignoring '{}'", line);
            return Ok(());
        };

        let mut payload = line.as_bytes().to_vec();
        payload.push(b'\n');
        stdin
            .write_all(&payload)
            .await
            .map_err(|e| PlaybackError::Control {
                message: format!("Failed to send '{line}': {e}"),
            })?;
        stdin.flush().await.map_err(|e| PlaybackError::Control {
            message: format!("Failed to send '{line}': {e}"),
        })
    }

    fn relay_stderr(child: &mut Child) {
        let Some(stderr) = child.stderr.take() else {
            return;
        };

        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.to_lowercase().contains("error") {
                    warn!("player: {}", line);
                } else {
                    debug!("player: {}", line);
                }
            }
        });
    }
}

#[async_trait]
impl Player for ProcessPlayer {
    async fn play(&mut self, url: &str) -> PlaybackResult<PlaybackStrategy> {
        self.stop().await?;

        let strategy = PlaybackStrategy::choose(url, &self.config);
        let command = strategy
            .command(&self.config)
            .ok_or_else(|| PlaybackError::NoCommand {
                strategy: strategy.to_string(),
            })?;

        let args = command.resolve_args(url);
        info!(
            "Playing {} stream {} with {}",
            strategy,
            UrlUtils::obfuscate_credentials(url),
            command.program
        );

        let mut cmd = TokioCommand::new(&command.program);
        cmd.args(&args);
        cmd.kill_on_drop(true);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| PlaybackError::Spawn {
            command: command.program.clone(),
            source,
        })?;

        Self::relay_stderr(&mut child);
        let stdin = child.stdin.take();

        self.session = Some(PlayerSession {
            child,
            stdin,
            url: url.to_string(),
        });

        Ok(strategy)
    }

    async fn stop(&mut self) -> PlaybackResult<()> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };

        drop(session.stdin.take());
        if let Err(e) = session.child.kill().await {
            warn!(
                "Failed to stop player for {}: {}",
                UrlUtils::obfuscate_credentials(&session.url),
                e
            );
            return Err(PlaybackError::Control {
                message: format!("Failed to stop player: {e}"),
            });
        }

        debug!("Stopped player for {}", UrlUtils::obfuscate_credentials(&session.url));
        Ok(())
    }

    async fn toggle_pause(&mut self) -> PlaybackResult<()> {
        let command = self.config.pause_command.clone();
        self.send_line(&command).await
    }

    async fn toggle_fullscreen(&mut self) -> PlaybackResult<()> {
        let command = self.config.fullscreen_command.clone();
        self.send_line(&command).await
    }

    fn is_active(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) => matches!(session.child.try_wait(), Ok(None)),
            None => false,
        }
    }
}
