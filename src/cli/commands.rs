//! Command definitions for the tomato CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::{minutes, TomatoConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Terminal Pomodoro timer
#[derive(Parser, Debug)]
#[command(
    name = "tomato",
    version,
    about = "Terminal Pomodoro timer",
    long_about = "A Pomodoro timer for the terminal.\n\
                  Work, take a small break, repeat, and take a long break after every set.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (runs the timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of $TOMATO_CONFIG_FILE or ~/.tomato.toml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hide the clock
    #[arg(long)]
    pub no_clock: bool,

    /// Mute all sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Focus mode: hide the clock and mute sounds (same as --no-clock --no-sound)
    #[arg(long)]
    pub focus: bool,

    /// Use the tomato emoji instead of ASCII glyphs
    #[arg(short, long)]
    pub emoji: bool,

    /// Play the alarm once and exit
    #[arg(long)]
    pub audio_check: bool,

    #[command(flatten)]
    pub time: TimeArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the config file location and the effective settings
    Config,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Time Overrides
// ============================================================================

/// Per-run overrides of the `[time]` config section
#[derive(Args, Debug, Clone, Default)]
pub struct TimeArgs {
    /// Work duration in minutes (fractions allowed)
    #[arg(long, value_name = "MINUTES", value_parser = parse_minutes)]
    pub work: Option<Duration>,

    /// Small break duration in minutes
    #[arg(long, value_name = "MINUTES", value_parser = parse_minutes)]
    pub small_break: Option<Duration>,

    /// Long break duration in minutes
    #[arg(long, value_name = "MINUTES", value_parser = parse_minutes)]
    pub long_break: Option<Duration>,

    /// Work phases per set
    #[arg(
        long,
        value_name = "COUNT",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub tomatoes_per_set: Option<u32>,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration.
    ///
    /// Flags can only switch features off; an unset flag keeps the file value.
    pub fn apply_overrides(&self, config: &mut TomatoConfig) {
        config.mute_clock |= self.no_clock || self.focus;
        config.mute_sound |= self.no_sound || self.focus;
        config.emoji |= self.emoji;

        if let Some(work) = self.time.work {
            config.work_duration = work;
        }
        if let Some(small_break) = self.time.small_break {
            config.small_break_duration = small_break;
        }
        if let Some(long_break) = self.time.long_break {
            config.long_break_duration = long_break;
        }
        if let Some(tomatoes) = self.time.tomatoes_per_set {
            config.tomatoes_per_set = tomatoes;
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a positive, possibly fractional number of minutes.
fn parse_minutes(s: &str) -> Result<Duration, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    let duration = minutes(value).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}

// ============================================================================
// Tests
// ============================================================================
