//! Tomato Timer Library
//!
//! A Pomodoro timer for the terminal. It includes:
//! - Timer state machine with lazily computed countdowns
//! - Render snapshots with change fingerprints for redraw skipping
//! - TOML configuration and key bindings
//! - Alarm playback for phase changes
//! - CLI command parsing and the interactive loop

pub mod cli;
pub mod config;
pub mod sound;
pub mod timer;

// Re-export commonly used types for convenience
pub use config::{Action, ConfigError, KeyBindings, TomatoConfig};
pub use sound::{AlarmPlayer, MockAlarmPlayer, RodioAlarmPlayer, SoundError, SoundSource};
pub use timer::{
    Clock, Fingerprint, ManualClock, MonotonicClock, Phase, PhaseKind, SessionCounter, Tomato,
    View,
};
