//! Display utilities for the tomato CLI.
//!
//! This module provides formatted output for:
//! - The timer frame (tomato art with the view fields beside it)
//! - The key hint line
//! - Error messages

use std::io::{self, Write};

use crate::config::{Action, KeyBindings, TomatoConfig};
use crate::timer::View;

/// Clears the screen and moves the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Tomato art, padded so every slot starts in the same column.
const TOMATO_ART: [&str; 9] = [
    r"      /'\/`\         ",
    r"    .-  |/  -.       ",
    r"   /          \      ",
    r"  '   tomato   \     ",
    r" ;             '     ",
    r" ;             ;     ",
    r" :          /  .     ",
    r"  \       .'  /      ",
    r"    \ ____ .'        ",
];

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Lays out `view` beside the tomato art.
    #[must_use]
    pub fn compose(view: &View) -> String {
        let slots: [&str; 9] = [
            &view.task[0],
            &view.task[1],
            &view.task[2],
            &view.task[3],
            &view.status,
            &view.time,
            "",
            &view.count,
            &view.sets,
        ];

        TOMATO_ART
            .iter()
            .zip(slots)
            .map(|(art, slot)| format!("{}{}", art, slot).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One line listing the keys for every action.
    #[must_use]
    pub fn key_hint(bindings: &KeyBindings) -> String {
        Action::ALL
            .iter()
            .filter_map(|action| {
                let keys = bindings.keys_for(*action);
                if keys.is_empty() {
                    return None;
                }
                Some(format!("[{}] {}", keys.join("/"), Self::action_label(*action)))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Clears the terminal and draws a full frame.
    pub fn draw(view: &View, hint: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}{}\n\n{}\n> ", CLEAR_SCREEN, Self::compose(view), hint)?;
        stdout.flush()
    }

    /// Shows where the config lives and what it resolves to.
    pub fn show_config(path: &std::path::Path, config: &TomatoConfig) {
        println!("Config file: {}", path.display());
        println!("─────────────────────────────");
        println!("work:              {}", Self::format_minutes(config.work_duration));
        println!(
            "small break:       {}",
            Self::format_minutes(config.small_break_duration)
        );
        println!(
            "long break:        {}",
            Self::format_minutes(config.long_break_duration)
        );
        println!("tomatoes per set:  {}", config.tomatoes_per_set);
        println!("alarm cooldown:    {}s", config.alarm_cooldown.as_secs());
        println!("clock:             {}", Self::on_off(!config.mute_clock));
        println!("sound:             {}", Self::on_off(!config.mute_sound));
        if let Some(sound) = &config.alarm_sound {
            println!("alarm sound:       {}", sound.display());
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    fn action_label(action: Action) -> &'static str {
        match action {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Reset => "reset",
            Action::ResetAll => "reset all",
            Action::Exit => "exit",
        }
    }

    fn format_minutes(duration: std::time::Duration) -> String {
        let secs = duration.as_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    fn on_off(enabled: bool) -> &'static str {
        if enabled {
            "on"
        } else {
            "off"
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
