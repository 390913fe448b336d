//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The default config file could not be written.
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has wrongly typed values.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// No home directory to place the default config file in.
    #[error("could not determine the home directory")]
    NoHomeDir,
}

impl ConfigError {
    /// Returns true if the error comes from file I/O rather than content.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. } | Self::NoHomeDir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::Invalid("tomatoes_per_set must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: tomatoes_per_set must be at least 1"
        );
        assert!(!err.is_io_error());
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("/tmp/tomato.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/tomato.toml"));
        assert!(err.is_io_error());
    }

    #[test]
    fn test_no_home_dir_is_io() {
        assert!(ConfigError::NoHomeDir.is_io_error());
    }
}
