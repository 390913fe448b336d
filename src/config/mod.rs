//! Configuration for the tomato timer.
//!
//! - `TomatoConfig`: the read-only settings the timer core consumes
//! - `file`: the TOML config file schema and loader
//! - `keys`: mapping of terminal input to timer actions

mod error;
pub mod file;
pub mod keys;

use std::path::PathBuf;
use std::time::Duration;

pub use error::ConfigError;
pub use file::{default_path, load_or_create, ConfigFile, GeneralSection, TimeSection};
pub use keys::{Action, KeyBindings};

/// Seconds in a minute.
const SECONDS_PER_MIN: f64 = 60.0;

// ============================================================================
// TomatoConfig
// ============================================================================

/// Settings for a timer run.
///
/// Loaded once by the application shell and treated as immutable by the
/// timer afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TomatoConfig {
    /// Length of a work phase
    pub work_duration: Duration,
    /// Length of a small break
    pub small_break_duration: Duration,
    /// Length of the long break that closes a set
    pub long_break_duration: Duration,
    /// Work phases per set (>= 1)
    pub tomatoes_per_set: u32,
    /// Minimum gap between repeated alarms while waiting for the user
    pub alarm_cooldown: Duration,
    /// Hide the countdown text
    pub mute_clock: bool,
    /// Never play the alarm
    pub mute_sound: bool,
    /// Use the tomato emoji instead of ASCII glyphs
    pub emoji: bool,
    /// Sound file to play instead of the built-in chime
    pub alarm_sound: Option<PathBuf>,
}

impl Default for TomatoConfig {
    fn default() -> Self {
        Self {
            work_duration: Duration::from_secs(25 * 60),
            small_break_duration: Duration::from_secs(5 * 60),
            long_break_duration: Duration::from_secs(15 * 60),
            tomatoes_per_set: 4,
            alarm_cooldown: Duration::from_secs(20),
            mute_clock: false,
            mute_sound: false,
            emoji: false,
            alarm_sound: None,
        }
    }
}

impl TomatoConfig {
    #[must_use]
    pub fn with_work_duration(mut self, duration: Duration) -> Self {
        self.work_duration = duration;
        self
    }

    #[must_use]
    pub fn with_small_break_duration(mut self, duration: Duration) -> Self {
        self.small_break_duration = duration;
        self
    }

    #[must_use]
    pub fn with_long_break_duration(mut self, duration: Duration) -> Self {
        self.long_break_duration = duration;
        self
    }

    #[must_use]
    pub fn with_tomatoes_per_set(mut self, tomatoes: u32) -> Self {
        self.tomatoes_per_set = tomatoes;
        self
    }

    #[must_use]
    pub fn with_alarm_cooldown(mut self, cooldown: Duration) -> Self {
        self.alarm_cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_mute_clock(mut self, mute: bool) -> Self {
        self.mute_clock = mute;
        self
    }

    #[must_use]
    pub fn with_mute_sound(mut self, mute: bool) -> Self {
        self.mute_sound = mute;
        self
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: bool) -> Self {
        self.emoji = emoji;
        self
    }

    /// Validates the configuration.
    ///
    /// The timer assumes a valid configuration; the shell must call this
    /// before constructing one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("work", self.work_duration),
            ("small break", self.small_break_duration),
            ("long break", self.long_break_duration),
        ];
        for (name, duration) in durations {
            if duration.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "{} duration must be greater than zero",
                    name
                )));
            }
        }
        if self.tomatoes_per_set < 1 {
            return Err(ConfigError::Invalid(
                "tomatoes_per_set must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Converts a (possibly fractional) number of minutes to a duration.
pub fn minutes(value: f64) -> Result<Duration, ConfigError> {
    seconds(value * SECONDS_PER_MIN)
}

/// Converts a (possibly fractional) number of seconds to a duration.
pub fn seconds(value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| ConfigError::Invalid(format!("{} is not a valid time value", value)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = TomatoConfig::default();
        assert_eq!(config.work_duration, Duration::from_secs(1500));
        assert_eq!(config.small_break_duration, Duration::from_secs(300));
        assert_eq!(config.long_break_duration, Duration::from_secs(900));
        assert_eq!(config.tomatoes_per_set, 4);
        assert_eq!(config.alarm_cooldown, Duration::from_secs(20));
        assert!(!config.mute_clock);
        assert!(!config.mute_sound);
        assert!(!config.emoji);
        assert!(config.alarm_sound.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TomatoConfig::default()
            .with_work_duration(Duration::from_secs(6))
            .with_small_break_duration(Duration::from_secs(3))
            .with_long_break_duration(Duration::from_secs(9))
            .with_tomatoes_per_set(2)
            .with_alarm_cooldown(Duration::from_secs(5))
            .with_mute_clock(true)
            .with_mute_sound(true)
            .with_emoji(true);

        assert_eq!(config.work_duration, Duration::from_secs(6));
        assert_eq!(config.small_break_duration, Duration::from_secs(3));
        assert_eq!(config.long_break_duration, Duration::from_secs(9));
        assert_eq!(config.tomatoes_per_set, 2);
        assert_eq!(config.alarm_cooldown, Duration::from_secs(5));
        assert!(config.mute_clock);
        assert!(config.mute_sound);
        assert!(config.emoji);
    }

    #[test]
    fn test_validate_zero_tomatoes_per_set() {
        let config = TomatoConfig::default().with_tomatoes_per_set(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_zero_durations() {
        let config = TomatoConfig::default().with_work_duration(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = TomatoConfig::default().with_small_break_duration(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = TomatoConfig::default().with_long_break_duration(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cooldown_is_valid() {
        let config = TomatoConfig::default().with_alarm_cooldown(Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fractional_minutes() {
        assert_eq!(minutes(0.1).unwrap(), Duration::from_secs(6));
        assert_eq!(minutes(25.0).unwrap(), Duration::from_secs(1500));
    }

    #[test]
    fn test_invalid_time_values() {
        assert!(minutes(-1.0).is_err());
        assert!(minutes(f64::NAN).is_err());
        assert!(seconds(f64::INFINITY).is_err());
    }
}
