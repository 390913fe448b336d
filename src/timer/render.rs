//! Render snapshot of the timer.
//!
//! [`render`] maps the controller to a [`View`] of plain strings plus a
//! [`Fingerprint`] the shell compares between frames to skip redraws.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::sound::AlarmPlayer;

use super::clock::Clock;
use super::controller::Tomato;
use super::counter::SessionCounter;
use super::phase::PhaseKind;

/// Number of banner lines in a task label.
pub const TASK_LINES: usize = 4;

const WORK_BANNER: [&str; TASK_LINES] = [
    r" __      __       _",
    r" \ \    / ___ _ _| |__",
    r"  \ \/\/ / _ | '_| / /",
    r"   \_/\_/\___|_| |_\_\",
];

const SMALL_BREAK_BANNER: [&str; TASK_LINES] = [
    r"  ___    SMALL      _",
    r" | _ )_ _ ___ __ _| |__",
    r" | _ | '_/ -_/ _` | / /",
    r" |___|_| \___\__,_|_\_\",
];

const LONG_BREAK_BANNER: [&str; TASK_LINES] = [
    r"  ___    LONG      _",
    r" | _ )_ _ ___ __ _| |__",
    r" | _ | '_/ -_/ _` | / /",
    r" |___|_| \___\__,_|_\_\",
];

/// Glyph for one outstanding tomato in the current set.
pub const TOMATO_GLYPH: &str = "(`) ";

/// Glyph for one outstanding tomato when emoji are enabled.
pub const TOMATO_EMOJI: &str = "\u{1F345} ";

/// ASCII banner for a phase kind.
#[must_use]
pub fn banner(kind: PhaseKind) -> [&'static str; TASK_LINES] {
    match kind {
        PhaseKind::Work => WORK_BANNER,
        PhaseKind::SmallBreak => SMALL_BREAK_BANNER,
        PhaseKind::LongBreak => LONG_BREAK_BANNER,
    }
}

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct View {
    /// Task banner, blank outside a work or break phase.
    pub task: [String; TASK_LINES],
    /// "PAUSED" or empty.
    pub status: String,
    /// Countdown or prompt.
    pub time: String,
    /// One glyph per tomato left in the current set.
    pub count: String,
    /// Completed sets, or empty before the first one.
    pub sets: String,
}

/// Change detector for [`View`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    #[must_use]
    pub fn of(view: &View) -> Self {
        let mut hasher = DefaultHasher::new();
        view.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Text for the number of completed sets.
#[must_use]
pub fn sets_label(sets: u32) -> String {
    match sets {
        0 => String::new(),
        1 => "1 set completed".to_string(),
        n => format!("{} sets completed", n),
    }
}

/// One glyph per tomato still to go in the current set.
#[must_use]
pub fn count_label(counter: &SessionCounter, emoji: bool) -> String {
    let glyph = if emoji { TOMATO_EMOJI } else { TOMATO_GLYPH };
    glyph.repeat(counter.remaining_in_set() as usize)
}

/// Builds the view for the current state of `tomato`.
///
/// Reading the countdown advances the progress glyph and may re-sound the
/// waiting alarm; it never changes the phase or the counter.
pub fn render<A: AlarmPlayer, C: Clock>(tomato: &mut Tomato<A, C>) -> (View, Fingerprint) {
    let time = tomato.time_remaining();
    let phase = tomato.phase();

    let task = match phase.kind() {
        Some(kind) => banner(kind).map(str::to_string),
        None => Default::default(),
    };

    let view = View {
        task,
        status: phase.status().label().to_string(),
        time,
        count: count_label(tomato.counter(), tomato.config().emoji),
        sets: sets_label(tomato.counter().sets_completed()),
    };
    let fingerprint = Fingerprint::of(&view);
    (view, fingerprint)
}

impl<A: AlarmPlayer, C: Clock> Tomato<A, C> {
    /// See [`render`].
    pub fn render(&mut self) -> (View, Fingerprint) {
        render(self)
    }
}
