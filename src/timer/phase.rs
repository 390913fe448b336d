//! Phase state machine.
//!
//! Transition table (event → resulting phase):
//!
//! ```text
//!              start()            pause()          reset()              done
//! Idle         Working (fresh)    Idle             Idle                 never
//! Working      Working            Paused(Work)     Working (full)       Limbo → SmallBreak | LongBreak
//! SmallBreak   SmallBreak         Paused(Small)    SmallBreak (full)    Limbo → Working
//! LongBreak    LongBreak          Paused(Long)     LongBreak (full)     Limbo → Working
//! Paused(X)    X (resumed)        Paused(X)        Paused(X, full)      never
//! Limbo(next)  next (fresh)       Limbo            Limbo                never
//! ```
//!
//! Every operation consumes the current phase and returns its successor,
//! so a phase is always replaced wholesale.

use std::time::Duration;

use crate::config::TomatoConfig;

use super::counter::SessionCounter;

/// Seconds per minute, for countdown formatting.
const SECONDS_PER_MIN: u64 = 60;

/// Frames of the cosmetic progress indicator shown while a phase runs.
pub const PROGRESS_FRAMES: [&str; 4] = ["|#  |", "| # |", "|  #|", "| # |"];

// ============================================================================
// PhaseKind
// ============================================================================

/// The three kinds of timed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Work,
    SmallBreak,
    LongBreak,
}

impl PhaseKind {
    /// Human-readable name, used in the Limbo prompt.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PhaseKind::Work => "work",
            PhaseKind::SmallBreak => "small break",
            PhaseKind::LongBreak => "long break",
        }
    }

    /// Configured length of this kind of phase.
    #[must_use]
    pub fn duration(&self, config: &TomatoConfig) -> Duration {
        match self {
            PhaseKind::Work => config.work_duration,
            PhaseKind::SmallBreak => config.small_break_duration,
            PhaseKind::LongBreak => config.long_break_duration,
        }
    }
}

// ============================================================================
// PhaseStatus
// ============================================================================

/// Coarse status of a phase, independent of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    None,
    Started,
    Paused,
    Limbo,
}

impl PhaseStatus {
    /// Status label shown next to the tomato.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PhaseStatus::Paused => "PAUSED",
            PhaseStatus::None | PhaseStatus::Started | PhaseStatus::Limbo => "",
        }
    }
}

// ============================================================================
// Countdown
// ============================================================================

/// Remaining-time bookkeeping for a timed phase.
///
/// `remaining` is only valid as of `started_at`; [`Countdown::refresh`]
/// subtracts the wall time elapsed since then and moves the checkpoint to
/// the current reading, so slow or irregular polling never accumulates
/// drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    remaining: Duration,
    started_at: Duration,
    frame: usize,
}

impl Countdown {
    #[must_use]
    pub fn new(duration: Duration, now: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            started_at: now,
            frame: 0,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Remaining time as of the last checkpoint.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    #[must_use]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Applies the time elapsed since the last checkpoint and returns the
    /// new remaining time. Never goes below zero.
    pub fn refresh(&mut self, now: Duration) -> Duration {
        let elapsed = now.saturating_sub(self.started_at);
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.started_at = now;
        self.remaining
    }

    /// Restores the full duration.
    fn rewind(&mut self, now: Duration) {
        self.remaining = self.duration;
        self.started_at = now;
    }

    fn resume_at(&mut self, now: Duration) {
        self.started_at = now;
    }

    fn next_frame(&mut self) -> &'static str {
        let frame = PROGRESS_FRAMES[self.frame % PROGRESS_FRAMES.len()];
        self.frame = (self.frame + 1) % PROGRESS_FRAMES.len();
        frame
    }
}

// ============================================================================
// Limbo
// ============================================================================

/// Waiting state between a finished phase and the user confirming the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limbo {
    next: PhaseKind,
    entered_at: Duration,
    last_alarm_at: Option<Duration>,
}

impl Limbo {
    #[must_use]
    pub fn new(next: PhaseKind, now: Duration) -> Self {
        Self {
            next,
            entered_at: now,
            last_alarm_at: None,
        }
    }

    /// The phase that `start()` will construct.
    #[must_use]
    pub fn next(&self) -> PhaseKind {
        self.next
    }

    #[must_use]
    pub fn entered_at(&self) -> Duration {
        self.entered_at
    }

    #[must_use]
    pub fn last_alarm_at(&self) -> Option<Duration> {
        self.last_alarm_at
    }

    /// Returns true if the alarm should sound now, and records it as sounded.
    ///
    /// The first call always fires; later calls fire only once more than
    /// `cooldown` has passed since the last firing.
    pub fn alarm_due(&mut self, now: Duration, cooldown: Duration) -> bool {
        let due = match self.last_alarm_at {
            None => true,
            Some(last) => now.saturating_sub(last) > cooldown,
        };
        if due {
            self.last_alarm_at = Some(now);
        }
        due
    }
}

// ============================================================================
// Paused
// ============================================================================

/// A suspended timed phase. Owns the suspended countdown exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paused {
    kind: PhaseKind,
    saved: Countdown,
}

impl Paused {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        self.kind
    }

    #[must_use]
    pub fn saved(&self) -> &Countdown {
        &self.saved
    }

    fn resume(mut self, now: Duration) -> Phase {
        self.saved.resume_at(now);
        Phase::running(self.kind, self.saved)
    }
}

// ============================================================================
// Phase
// ============================================================================

/// The timer's current mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing started yet.
    #[default]
    Idle,
    /// A phase ended; waiting for the user to start the next one.
    Limbo(Limbo),
    Working(Countdown),
    SmallBreak(Countdown),
    LongBreak(Countdown),
    Paused(Paused),
}

impl Phase {
    /// Wraps a countdown in the running variant for `kind`.
    #[must_use]
    pub fn running(kind: PhaseKind, countdown: Countdown) -> Self {
        match kind {
            PhaseKind::Work => Phase::Working(countdown),
            PhaseKind::SmallBreak => Phase::SmallBreak(countdown),
            PhaseKind::LongBreak => Phase::LongBreak(countdown),
        }
    }

    /// A freshly started phase of `kind` with its full configured duration.
    #[must_use]
    pub fn fresh(kind: PhaseKind, config: &TomatoConfig, now: Duration) -> Self {
        Self::running(kind, Countdown::new(kind.duration(config), now))
    }

    /// Name of the phase, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "initial",
            Phase::Limbo(_) => "waiting",
            Phase::Working(_) => "work",
            Phase::SmallBreak(_) => "small break",
            Phase::LongBreak(_) => "long break",
            Phase::Paused(paused) => match paused.kind {
                PhaseKind::Work => "work paused",
                PhaseKind::SmallBreak => "small break paused",
                PhaseKind::LongBreak => "long break paused",
            },
        }
    }

    /// The task this phase belongs to. Paused phases report the suspended kind.
    #[must_use]
    pub fn kind(&self) -> Option<PhaseKind> {
        match self {
            Phase::Idle | Phase::Limbo(_) => None,
            Phase::Working(_) => Some(PhaseKind::Work),
            Phase::SmallBreak(_) => Some(PhaseKind::SmallBreak),
            Phase::LongBreak(_) => Some(PhaseKind::LongBreak),
            Phase::Paused(paused) => Some(paused.kind),
        }
    }

    #[must_use]
    pub fn status(&self) -> PhaseStatus {
        match self {
            Phase::Idle => PhaseStatus::None,
            Phase::Limbo(_) => PhaseStatus::Limbo,
            Phase::Working(_) | Phase::SmallBreak(_) | Phase::LongBreak(_) => PhaseStatus::Started,
            Phase::Paused(_) => PhaseStatus::Paused,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status() == PhaseStatus::Started
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, Phase::Paused(_))
    }

    #[must_use]
    pub fn is_limbo(&self) -> bool {
        matches!(self, Phase::Limbo(_))
    }

    /// True when a running phase has no time left. Idle, Paused and Limbo
    /// are never done.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.running_countdown().is_some_and(Countdown::is_done)
    }

    /// Remaining time as of the last checkpoint, for running and paused phases.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            Phase::Working(c) | Phase::SmallBreak(c) | Phase::LongBreak(c) => Some(c.remaining()),
            Phase::Paused(paused) => Some(paused.saved.remaining()),
            Phase::Idle | Phase::Limbo(_) => None,
        }
    }

    fn running_countdown(&self) -> Option<&Countdown> {
        match self {
            Phase::Working(c) | Phase::SmallBreak(c) | Phase::LongBreak(c) => Some(c),
            _ => None,
        }
    }

    fn running_countdown_mut(&mut self) -> Option<&mut Countdown> {
        match self {
            Phase::Working(c) | Phase::SmallBreak(c) | Phase::LongBreak(c) => Some(c),
            _ => None,
        }
    }

    /// Brings a running countdown up to date. No-op for other phases.
    pub fn refresh(&mut self, now: Duration) {
        if let Some(countdown) = self.running_countdown_mut() {
            countdown.refresh(now);
        }
    }

    /// Handles the start button.
    #[must_use]
    pub fn start(self, config: &TomatoConfig, now: Duration) -> Phase {
        match self {
            Phase::Idle => Phase::fresh(PhaseKind::Work, config, now),
            Phase::Limbo(limbo) => Phase::fresh(limbo.next, config, now),
            Phase::Paused(paused) => paused.resume(now),
            running @ (Phase::Working(_) | Phase::SmallBreak(_) | Phase::LongBreak(_)) => running,
        }
    }

    /// Handles the pause button.
    #[must_use]
    pub fn pause(self) -> Phase {
        match self {
            Phase::Working(saved) => Phase::Paused(Paused {
                kind: PhaseKind::Work,
                saved,
            }),
            Phase::SmallBreak(saved) => Phase::Paused(Paused {
                kind: PhaseKind::SmallBreak,
                saved,
            }),
            Phase::LongBreak(saved) => Phase::Paused(Paused {
                kind: PhaseKind::LongBreak,
                saved,
            }),
            other @ (Phase::Idle | Phase::Limbo(_) | Phase::Paused(_)) => other,
        }
    }

    /// Handles the reset button: restores the full duration of the current
    /// (or suspended) countdown without changing the phase.
    ///
    /// A paused phase stays paused with its full duration; the next start
    /// resumes it.
    #[must_use]
    pub fn reset(mut self, now: Duration) -> Phase {
        match &mut self {
            Phase::Working(c) | Phase::SmallBreak(c) | Phase::LongBreak(c) => c.rewind(now),
            Phase::Paused(paused) => paused.saved.rewind(now),
            Phase::Idle | Phase::Limbo(_) => {}
        }
        self
    }

    /// Computes the successor of a finished phase.
    ///
    /// Finishing a work phase records one completed tomato on `counter`
    /// and picks the long break when that closes a set. A phase that is not
    /// done is returned unchanged and the counter is not touched.
    #[must_use]
    pub fn next_state(self, counter: &mut SessionCounter, now: Duration) -> Phase {
        if !self.is_done() {
            return self;
        }
        match self {
            Phase::Working(_) => {
                counter.increment();
                let next = if counter.at_set_boundary() {
                    PhaseKind::LongBreak
                } else {
                    PhaseKind::SmallBreak
                };
                Phase::Limbo(Limbo::new(next, now))
            }
            Phase::SmallBreak(_) | Phase::LongBreak(_) => {
                Phase::Limbo(Limbo::new(PhaseKind::Work, now))
            }
            other => other,
        }
    }

    /// Countdown text for display.
    ///
    /// Reading the text of a running phase refreshes its countdown and
    /// advances the progress glyph.
    pub fn time_remaining(&mut self, now: Duration) -> String {
        match self {
            Phase::Idle => "Press [start]".to_string(),
            Phase::Limbo(limbo) => {
                format!("Press [start] to continue with {}", limbo.next.name())
            }
            Phase::Working(c) | Phase::SmallBreak(c) | Phase::LongBreak(c) => {
                let remaining = c.refresh(now);
                let frame = c.next_frame();
                format!("{} {}", frame, format_remaining(remaining))
            }
            Phase::Paused(paused) => format_remaining(paused.saved.remaining()),
        }
    }
}

/// Formats a remaining time as `MMmin SSs remaining`.
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!(
        "{:02}min {:02}s remaining",
        secs / SECONDS_PER_MIN,
        secs % SECONDS_PER_MIN
    )
}

// ============================================================================
// Tests
// ============================================================================
