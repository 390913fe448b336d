//! TOML config file.
//!
//! The file lives at `$TOMATO_CONFIG_FILE`, or `~/.tomato.toml` when the
//! variable is unset. A missing file is created with default contents.
//!
//! ```toml
//! [general]
//! no_clock = false
//! no_sound = false
//! emoji = false
//!
//! [time]
//! tomatoes_per_set = 4
//! work_minutes = 25.0
//! small_break_minutes = 5.0
//! long_break_minutes = 15.0
//! alarm_seconds = 20.0
//!
//! [key_bindings]
//! start = "s"
//! pause = "p"
//! reset = "r"
//! reset_all = "a"
//! exit = "q"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::ConfigError;
use super::keys::KeyBindings;
use super::{minutes, seconds, TomatoConfig};

/// Environment variable overriding the config file location.
pub const CONFIG_FILE_ENV: &str = "TOMATO_CONFIG_FILE";

/// File name of the default config file in the home directory.
const DEFAULT_FILE_NAME: &str = ".tomato.toml";

fn default_tomatoes_per_set() -> u32 {
    4
}
fn default_work_minutes() -> f64 {
    25.0
}
fn default_small_break_minutes() -> f64 {
    5.0
}
fn default_long_break_minutes() -> f64 {
    15.0
}
fn default_alarm_seconds() -> f64 {
    20.0
}

/// `[general]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralSection {
    #[serde(default)]
    pub no_clock: bool,
    #[serde(default)]
    pub no_sound: bool,
    #[serde(default)]
    pub emoji: bool,
    /// Custom alarm sound file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_sound: Option<PathBuf>,
}

/// `[time]` section. Durations are in (fractional) minutes, the alarm
/// cooldown in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSection {
    #[serde(default = "default_tomatoes_per_set")]
    pub tomatoes_per_set: u32,
    #[serde(default = "default_work_minutes")]
    pub work_minutes: f64,
    #[serde(default = "default_small_break_minutes")]
    pub small_break_minutes: f64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: f64,
    #[serde(default = "default_alarm_seconds")]
    pub alarm_seconds: f64,
}

impl Default for TimeSection {
    fn default() -> Self {
        Self {
            tomatoes_per_set: default_tomatoes_per_set(),
            work_minutes: default_work_minutes(),
            small_break_minutes: default_small_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            alarm_seconds: default_alarm_seconds(),
        }
    }
}

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub time: TimeSection,
    /// Action name → comma-separated keys.
    #[serde(default = "KeyBindings::default_table")]
    pub key_bindings: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            general: GeneralSection::default(),
            time: TimeSection::default(),
            key_bindings: KeyBindings::default_table(),
        }
    }
}

impl ConfigFile {
    /// Parses config file contents. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Renders the file contents.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("cannot serialize config: {}", e)))
    }

    /// Builds the timer configuration.
    ///
    /// Only conversion errors are reported here. Range checks wait for
    /// [`TomatoConfig::validate`] so command-line overrides can replace a bad
    /// file value first.
    pub fn to_config(&self) -> Result<TomatoConfig, ConfigError> {
        let config = TomatoConfig {
            work_duration: minutes(self.time.work_minutes)?,
            small_break_duration: minutes(self.time.small_break_minutes)?,
            long_break_duration: minutes(self.time.long_break_minutes)?,
            tomatoes_per_set: self.time.tomatoes_per_set,
            alarm_cooldown: seconds(self.time.alarm_seconds)?,
            mute_clock: self.general.no_clock,
            mute_sound: self.general.no_sound,
            emoji: self.general.emoji,
            alarm_sound: self.general.alarm_sound.clone(),
        };
        Ok(config)
    }

    /// Key bindings, with defaults for actions the file does not mention.
    #[must_use]
    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::from_table(&self.key_bindings)
    }
}

/// Resolves the config file location.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_FILE_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Loads the config file at `path`, creating it with defaults if missing.
pub fn load_or_create(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        let config = ConfigFile::default();
        write(path, &config)?;
        info!("Config file not found, created {}", path.display());
        return Ok(config);
    }

    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded config file {}", path.display());
    ConfigFile::parse(&text, path)
}

fn write(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
    let to_write_error = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, config.to_toml()?).map_err(to_write_error)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Action;

    fn parse(text: &str) -> Result<ConfigFile, ConfigError> {
        ConfigFile::parse(text, Path::new("test.toml"))
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = parse("").unwrap();
        assert_eq!(file, ConfigFile::default());
        assert_eq!(file.to_config().unwrap(), TomatoConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let file = parse(
            r#"
            [general]
            no_sound = true

            [time]
            work_minutes = 0.1
            tomatoes_per_set = 2
            "#,
        )
        .unwrap();

        let config = file.to_config().unwrap();
        assert!(config.mute_sound);
        assert!(!config.mute_clock);
        assert_eq!(config.work_duration, Duration::from_secs(6));
        assert_eq!(config.small_break_duration, Duration::from_secs(300));
        assert_eq!(config.tomatoes_per_set, 2);
    }

    #[test]
    fn test_alarm_sound_path() {
        let file = parse(
            r#"
            [general]
            alarm_sound = "/usr/share/sounds/bell.wav"
            "#,
        )
        .unwrap();
        assert_eq!(
            file.to_config().unwrap().alarm_sound,
            Some(PathBuf::from("/usr/share/sounds/bell.wav"))
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = parse("[time]\ntomatoes_per_set = 0\n").unwrap();
        let config = file.to_config().unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let file = parse("[time]\nwork_minutes = -5.0\n").unwrap();
        assert!(file.to_config().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse("[time\nwork_minutes = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn test_wrong_type() {
        assert!(parse("[time]\ntomatoes_per_set = \"four\"\n").is_err());
    }

    #[test]
    fn test_default_file_round_trips() {
        let text = ConfigFile::default().to_toml().unwrap();
        assert!(text.contains("[time]"));
        assert!(text.contains("[key_bindings]"));
        assert_eq!(parse(&text).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_custom_key_bindings() {
        let file = parse(
            r#"
            [key_bindings]
            start = "g, go"
            "#,
        )
        .unwrap();
        let keys = file.key_bindings();
        assert_eq!(keys.action_for("go"), Some(Action::Start));
        assert_eq!(keys.action_for("s"), None);
        assert_eq!(keys.action_for("q"), Some(Action::Exit));
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tomato.toml");

        let file = load_or_create(&path).unwrap();
        assert_eq!(file, ConfigFile::default());
        assert!(path.exists());

        let reloaded = load_or_create(&path).unwrap();
        assert_eq!(reloaded, file);
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tomato.toml");
        fs::write(&path, "[general]\nemoji = true\n").unwrap();

        let file = load_or_create(&path).unwrap();
        assert!(file.general.emoji);
        assert!(file.to_config().unwrap().emoji);
    }
}
