//! Event dispatch loop
//!
//! One task owns the [`AppState`] and the [`Player`]. Everything else
//! (stdin, playlist downloads) talks to it through an `mpsc` channel of
//! [`Event`]s.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use super::input::parse_input;
use super::state::{Action, AppState, Event};
use super::view::render;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::PlaylistSource;
use crate::playback::Player;
use crate::sources::{PlaylistLoader, resolve_source};

pub struct App<P, W> {
    state: AppState,
    player: P,
    out: W,
    loader: Arc<dyn PlaylistLoader>,
    config: Arc<Config>,
    events: mpsc::Sender<Event>,
}

impl<P, W> App<P, W>
where
    P: Player,
    W: Write + Send,
{
    pub fn new(
        state: AppState,
        player: P,
        out: W,
        loader: Arc<dyn PlaylistLoader>,
        config: Arc<Config>,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            state,
            player,
            out,
            loader,
            config,
            events,
        }
    }

    /// Process events until `Quit` or until every sender is gone
    ///
    /// The player is stopped on the way out. Returns the final state.
    pub async fn run(mut self, mut receiver: mpsc::Receiver<Event>) -> AppResult<AppState> {
        while let Some(event) = receiver.recv().await {
            debug!("Dispatching {:?}", event);
            let actions = self.state.handle(event);
            if self.execute(actions).await? {
                break;
            }
        }

        if let Err(e) = self.player.stop().await {
            warn!("Failed to stop player on exit: {}", e);
        }
        Ok(self.state)
    }

    /// Carry out actions; returns true when the loop should end
    async fn execute(&mut self, actions: Vec<Action>) -> AppResult<bool> {
        let mut queue: VecDeque<Action> = actions.into();

        while let Some(action) = queue.pop_front() {
            match action {
                Action::Load(target) => self.start_load(&target),
                Action::Play(url) => {
                    let outcome = match self.player.play(&url).await {
                        Ok(strategy) => Event::PlaybackStarted { url, strategy },
                        Err(e) => {
                            error!("Playback failed: {}", e);
                            Event::PlaybackFailed(e.to_string())
                        }
                    };
                    queue.extend(self.state.handle(outcome));
                }
                Action::TogglePause | Action::ToggleFullscreen if !self.player.is_active() => {
                    debug!("Player not running, ignoring {:?}", action);
                    queue.extend(self.state.handle(Event::PlayerExited));
                }
                Action::TogglePause => {
                    if let Err(e) = self.player.toggle_pause().await {
                        warn!("{}", e);
                    }
                }
                Action::ToggleFullscreen => {
                    if let Err(e) = self.player.toggle_fullscreen().await {
                        warn!("{}", e);
                    }
                }
                Action::Render => {
                    write!(self.out, "{}", render(&self.state))?;
                    self.out.flush()?;
                }
                Action::Quit => return Ok(true),
            }
        }

        Ok(false)
    }

    fn start_load(&self, target: &str) {
        match resolve_source(Some(target), &self.config) {
            Ok(source) => spawn_playlist_load(self.loader.clone(), source, self.events.clone()),
            Err(e) => {
                let events = self.events.clone();
                let message = e.to_string();
                tokio::spawn(async move {
                    let _ = events.send(Event::PlaylistFailed(message)).await;
                });
            }
        }
    }
}

/// Load a playlist in the background and report the outcome as events
pub fn spawn_playlist_load(
    loader: Arc<dyn PlaylistLoader>,
    source: PlaylistSource,
    events: mpsc::Sender<Event>,
) {
    tokio::spawn(async move {
        if events
            .send(Event::PlaylistLoading(source.clone()))
            .await
            .is_err()
        {
            return;
        }

        let event = match loader.load(&source).await {
            Ok(playlist) => Event::PlaylistLoaded(playlist),
            Err(e) => {
                error!("Error loading playlist from '{}': {}", source, e);
                Event::PlaylistFailed(e.to_string())
            }
        };
        let _ = events.send(event).await;
    });
}

/// Forward stdin lines as events; sends `Quit` at end of input
pub fn spawn_input_reader(events: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if events.send(parse_input(&line)).await.is_err() {
                        return;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        let _ = events.send(Event::Quit).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Key;
    use crate::errors::{PlaybackError, PlaybackResult, SourceResult};
    use crate::models::{ChannelEntry, Playlist};
    use crate::playback::PlaybackStrategy;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default, Clone)]
    struct RecordingPlayer {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
        active: bool,
    }

    #[async_trait]
    impl Player for RecordingPlayer {
        async fn play(&mut self, url: &str) -> PlaybackResult<PlaybackStrategy> {
            self.calls.lock().unwrap().push(format!("play {url}"));
            if self.fail {
                return Err(PlaybackError::NoCommand {
                    strategy: "direct".to_string(),
                });
            }
            self.active = true;
            Ok(PlaybackStrategy::Direct)
        }

        async fn stop(&mut self) -> PlaybackResult<()> {
            self.calls.lock().unwrap().push("stop".to_string());
            self.active = false;
            Ok(())
        }

        async fn toggle_pause(&mut self) -> PlaybackResult<()> {
            self.calls.lock().unwrap().push("pause".to_string());
            Ok(())
        }

        async fn toggle_fullscreen(&mut self) -> PlaybackResult<()> {
            self.calls.lock().unwrap().push("fullscreen".to_string());
            Ok(())
        }

        fn is_active(&mut self) -> bool {
            self.active
        }
    }

    struct StaticLoader(&'static str);

    #[async_trait]
    impl PlaylistLoader for StaticLoader {
        async fn load_text(&self, _source: &PlaylistSource) -> SourceResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn app(
        player: RecordingPlayer,
        loader: StaticLoader,
    ) -> (App<RecordingPlayer, Vec<u8>>, mpsc::Sender<Event>, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(16);
        let app = App::new(
            AppState::new(1400),
            player,
            Vec::new(),
            Arc::new(loader),
            Arc::new(Config::default()),
            tx.clone(),
        );
        (app, tx, rx)
    }

    fn loaded(count: usize) -> Event {
        Event::PlaylistLoaded(Playlist::new(
            PlaylistSource::Url("http://a/list.m3u".to_string()),
            (0..count)
                .map(|i| ChannelEntry::new(None, format!("http://a/{i}.ts")))
                .collect(),
        ))
    }

    #[tokio::test]
    async fn test_run_plays_and_controls() {
        let player = RecordingPlayer::default();
        let calls = player.calls.clone();
        let (app, tx, rx) = app(player, StaticLoader(""));

        tx.send(loaded(3)).await.unwrap();
        tx.send(Event::ToggleTvMode).await.unwrap();
        tx.send(Event::Select(1)).await.unwrap();
        tx.send(Event::Key(Key::Down)).await.unwrap();
        tx.send(Event::Key(Key::PlayPause)).await.unwrap();
        tx.send(Event::Quit).await.unwrap();

        let state = app.run(rx).await.unwrap();

        assert_eq!(state.current_channel, Some(2));
        assert_eq!(state.status.as_deref(), Some("Playing Stream 3 (direct)"));
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["play http://a/1.ts", "play http://a/2.ts", "pause", "stop"]
        );
    }

    #[tokio::test]
    async fn test_controls_after_player_exit_report_status() {
        let player = RecordingPlayer::default();
        let calls = player.calls.clone();
        let (app, tx, rx) = app(player, StaticLoader(""));

        tx.send(loaded(2)).await.unwrap();
        tx.send(Event::ToggleTvMode).await.unwrap();
        tx.send(Event::Key(Key::PlayPause)).await.unwrap();
        tx.send(Event::Key(Key::Fullscreen)).await.unwrap();
        tx.send(Event::Quit).await.unwrap();

        let state = app.run(rx).await.unwrap();

        assert_eq!(
            state.status.as_deref(),
            Some(crate::app::state::PLAYER_EXITED_MESSAGE)
        );
        assert_eq!(*calls.lock().unwrap(), vec!["stop"]);
    }

    #[tokio::test]
    async fn test_playback_failure_sets_status() {
        let player = RecordingPlayer {
            fail: true,
            ..RecordingPlayer::default()
        };
        let (app, tx, rx) = app(player, StaticLoader(""));

        tx.send(loaded(1)).await.unwrap();
        tx.send(Event::Select(0)).await.unwrap();
        tx.send(Event::Quit).await.unwrap();

        let state = app.run(rx).await.unwrap();
        assert_eq!(
            state.status.as_deref(),
            Some("Could not play stream: No player command configured for direct playback")
        );
    }

    #[tokio::test]
    async fn test_playlist_load_reports_progress() {
        let (tx, mut rx) = mpsc::channel(4);
        let source = PlaylistSource::Url("https://example.com/list.m3u".to_string());

        spawn_playlist_load(
            Arc::new(StaticLoader("#EXTM3U\n#EXTINF:-1,Only\nhttp://a/only.ts\n")),
            source.clone(),
            tx,
        );

        assert_eq!(rx.recv().await, Some(Event::PlaylistLoading(source.clone())));
        match rx.recv().await {
            Some(Event::PlaylistLoaded(playlist)) => {
                assert_eq!(playlist.source, source);
                assert_eq!(playlist.entries.len(), 1);
                assert_eq!(playlist.entries[0].name.as_deref(), Some("Only"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unresolvable_load_request_fails() {
        let (app, _tx, mut rx) = app(RecordingPlayer::default(), StaticLoader(""));

        app.start_load("ftp://example.com/list.m3u");

        match rx.recv().await {
            Some(Event::PlaylistFailed(message)) => assert!(message.starts_with("Invalid URL")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_render_written_to_output() {
        let (mut app, _tx, _rx) = app(RecordingPlayer::default(), StaticLoader(""));
        let quit = app.execute(vec![Action::Render]).await.unwrap();

        assert!(!quit);
        let text = String::from_utf8(app.out.clone()).unwrap();
        assert!(text.starts_with("Type a channel number"));
    }
}
