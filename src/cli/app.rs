//! The interactive timer loop.
//!
//! A single task multiplexes the redraw interval, terminal input and
//! Ctrl-C, so the controller is only ever touched from one place.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{self, Action, KeyBindings, TomatoConfig};
use crate::sound::{try_create_player, AlarmPlayer, RodioAlarmPlayer, SoundSource};
use crate::timer::{Clock, Fingerprint, MonotonicClock, Tomato, View};

use super::commands::Cli;
use super::display::Display;

/// How often the timer is polled and the frame refreshed.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(400);

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The exit key was pressed.
    ExitKey,
    /// Terminal input was closed.
    EndOfInput,
    /// Ctrl-C.
    Interrupted,
}

/// Loaded settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub path: PathBuf,
    pub config: TomatoConfig,
    pub key_bindings: KeyBindings,
}

impl Settings {
    /// Reads the config file and applies command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => config::default_path()?,
        };
        let file = config::load_or_create(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        let mut config = file.to_config()?;
        cli.apply_overrides(&mut config);
        config.validate()?;

        Ok(Self {
            path,
            config,
            key_bindings: file.key_bindings(),
        })
    }
}

/// The alarm to play for `config`.
///
/// A configured file that is missing or not an audio format is reported
/// once and replaced by the chime.
#[must_use]
pub fn sound_source(config: &TomatoConfig) -> SoundSource {
    match config.alarm_sound.as_deref() {
        None => SoundSource::Chime,
        Some(path) => SoundSource::file_validated(path).unwrap_or_else(|e| {
            warn!("Cannot use alarm sound: {}, using the chime", e);
            SoundSource::Chime
        }),
    }
}

/// Opens the audio device unless sound is muted.
#[must_use]
pub fn alarm_player(config: &TomatoConfig) -> Option<RodioAlarmPlayer> {
    if config.mute_sound {
        debug!("Sound muted, not opening audio device");
        return None;
    }
    try_create_player(sound_source(config))
}

/// Runs the timer on the real clock and terminal until the user exits.
pub async fn run(settings: Settings) -> Result<ExitReason> {
    let alarm = alarm_player(&settings.config);
    let tomato = Tomato::new(settings.config, alarm, MonotonicClock::new());
    let input = BufReader::new(tokio::io::stdin());

    let mut app = App::new(tomato, settings.key_bindings);
    app.run(input, Display::draw).await
}

// ============================================================================
// App
// ============================================================================

/// The controller plus the input mapping and last drawn frame.
pub struct App<A, C> {
    tomato: Tomato<A, C>,
    key_bindings: KeyBindings,
    hint: String,
    last_drawn: Option<Fingerprint>,
}

impl<A: AlarmPlayer, C: Clock> App<A, C> {
    pub fn new(tomato: Tomato<A, C>, key_bindings: KeyBindings) -> Self {
        let hint = Display::key_hint(&key_bindings);
        Self {
            tomato,
            key_bindings,
            hint,
            last_drawn: None,
        }
    }

    #[must_use]
    pub fn tomato(&self) -> &Tomato<A, C> {
        &self.tomato
    }

    /// Applies one line of input. Returns `true` if it was the exit key.
    pub fn handle_input(&mut self, line: &str) -> bool {
        let Some(action) = self.key_bindings.action_for(line) else {
            debug!("Ignoring unmapped input {:?}", line.trim());
            return false;
        };

        match action {
            Action::Start => self.tomato.start(),
            Action::Pause => self.tomato.pause(),
            Action::Reset => self.tomato.reset(),
            Action::ResetAll => self.tomato.reset_all(),
            Action::Exit => return true,
        }
        // Input always redraws; the prompt line was consumed by the echo.
        self.last_drawn = None;
        false
    }

    /// Advances the timer and returns the view if it changed since the
    /// last frame.
    pub fn frame(&mut self) -> Option<View> {
        self.tomato.tick();
        let (view, fingerprint) = self.tomato.render();
        if self.last_drawn == Some(fingerprint) {
            return None;
        }
        self.last_drawn = Some(fingerprint);
        Some(view)
    }

    /// Drives the timer from `input` until exit.
    ///
    /// `draw` receives every changed frame together with the key hint.
    pub async fn run<R, D>(&mut self, input: R, mut draw: D) -> Result<ExitReason>
    where
        R: AsyncBufRead + Unpin,
        D: FnMut(&View, &str) -> std::io::Result<()>,
    {
        let mut lines = input.lines();
        let mut ticker = interval(REDRAW_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        if let Some(view) = self.frame() {
            draw(&view, &self.hint).context("Failed to draw frame")?;
        }

        let reason = loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(view) = self.frame() {
                        draw(&view, &self.hint).context("Failed to draw frame")?;
                    }
                }
                line = lines.next_line() => {
                    match line.context("Failed to read input")? {
                        Some(line) => {
                            if self.handle_input(&line) {
                                break ExitReason::ExitKey;
                            }
                            if let Some(view) = self.frame() {
                                draw(&view, &self.hint).context("Failed to draw frame")?;
                            }
                        }
                        None => break ExitReason::EndOfInput,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    break ExitReason::Interrupted;
                }
            }
        };

        info!("Leaving timer: {:?}", reason);
        Ok(reason)
    }
}

// ============================================================================
// Tests
// ============================================================================
