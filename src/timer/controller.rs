//! Timer controller.
//!
//! `Tomato` owns the current [`Phase`] and the [`SessionCounter`] and is the
//! only thing that mutates them. The shell calls its operations from input
//! handlers and a periodic tick; all calls must be serialized by the caller.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::TomatoConfig;
use crate::sound::AlarmPlayer;

use super::clock::Clock;
use super::counter::SessionCounter;
use super::phase::Phase;

/// The Pomodoro timer.
#[derive(Debug)]
pub struct Tomato<A, C> {
    config: TomatoConfig,
    phase: Phase,
    counter: SessionCounter,
    alarm: A,
    clock: C,
}

impl<A: AlarmPlayer, C: Clock> Tomato<A, C> {
    /// Creates an idle timer. `config` must already be validated.
    pub fn new(config: TomatoConfig, alarm: A, clock: C) -> Self {
        let counter = SessionCounter::new(config.tomatoes_per_set);
        Self {
            config,
            phase: Phase::Idle,
            counter,
            alarm,
            clock,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TomatoConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn counter(&self) -> &SessionCounter {
        &self.counter
    }

    /// Numeric remaining time of the running or paused phase, brought up to
    /// date. `None` while idle or waiting.
    pub fn remaining(&mut self) -> Option<Duration> {
        let now = self.clock.now();
        self.phase.refresh(now);
        self.phase.remaining()
    }

    /// Start button: begins work, resumes a paused phase, or confirms the
    /// phase a finished one is waiting on.
    pub fn start(&mut self) {
        let now = self.clock.now();
        let was_idle = matches!(self.phase, Phase::Idle);
        if let Phase::Limbo(limbo) = &self.phase {
            debug!(
                "Starting {} after waiting {}s",
                limbo.next().name(),
                now.saturating_sub(limbo.entered_at()).as_secs()
            );
        }
        self.apply("start", |phase, config| phase.start(config, now));
        if was_idle {
            self.play_alarm();
        }
    }

    /// Pause button.
    pub fn pause(&mut self) {
        let now = self.clock.now();
        self.phase.refresh(now);
        self.apply("pause", |phase, _| phase.pause());
    }

    /// Reset button: restarts the current countdown from its full duration.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.apply("reset", |phase, _| phase.reset(now));
    }

    /// Reset-all button: back to idle with no completed tomatoes.
    pub fn reset_all(&mut self) {
        info!(
            "Resetting session ({} tomatoes completed)",
            self.counter.tomatoes()
        );
        self.phase = Phase::Idle;
        self.counter.reset();
    }

    /// Periodic update. Replaces a finished phase with its successor.
    ///
    /// Returns true if a transition happened. Calling it repeatedly while
    /// the phase is not done has no effect.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.phase.refresh(now);
        if !self.phase.is_done() {
            return false;
        }

        let finished = std::mem::take(&mut self.phase);
        let from = finished.name();
        let length = match &finished {
            Phase::Working(c) | Phase::SmallBreak(c) | Phase::LongBreak(c) => c.duration(),
            _ => Duration::ZERO,
        };
        self.phase = finished.next_state(&mut self.counter, now);
        info!(
            "Phase '{}' ({}s) finished, now '{}' ({} tomatoes completed)",
            from,
            length.as_secs(),
            self.phase.name(),
            self.counter.tomatoes()
        );
        self.sound_limbo_alarm(now);
        true
    }

    /// Countdown text for the current phase.
    ///
    /// While waiting for the user this also re-sounds the alarm once the
    /// cooldown has passed. With `mute_clock` the countdown of a running or
    /// paused phase is blanked; prompts are always shown.
    pub fn time_remaining(&mut self) -> String {
        let now = self.clock.now();
        self.sound_limbo_alarm(now);
        let text = self.phase.time_remaining(now);
        if self.config.mute_clock && self.phase.remaining().is_some() {
            String::new()
        } else {
            text
        }
    }

    /// Plays the alarm unless sound is muted. Failures are logged and dropped.
    pub fn play_alarm(&self) {
        if self.config.mute_sound {
            return;
        }
        if let Err(e) = self.alarm.play() {
            debug!("Alarm playback failed: {}", e);
        }
    }

    fn apply(&mut self, event: &str, op: impl FnOnce(Phase, &TomatoConfig) -> Phase) {
        let previous = std::mem::take(&mut self.phase);
        let from = previous.name();
        self.phase = op(previous, &self.config);
        if from != self.phase.name() {
            debug!("{}: '{}' -> '{}'", event, from, self.phase.name());
        }
    }

    fn sound_limbo_alarm(&mut self, now: Duration) {
        let cooldown = self.config.alarm_cooldown;
        let due = match &mut self.phase {
            Phase::Limbo(limbo) => limbo.alarm_due(now, cooldown),
            _ => false,
        };
        if due {
            self.play_alarm();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
