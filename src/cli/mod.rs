//! CLI module for the tomato timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Frame composition and output formatting
//! - `app`: Config loading and the interactive timer loop

pub mod app;
pub mod commands;
pub mod display;

pub use app::{alarm_player, run, sound_source, App, ExitReason, Settings};
pub use commands::{Cli, Commands, TimeArgs};
pub use display::Display;
