//! Alarm sound sources.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Audio file extensions the rodio decoders handle.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "aiff"];

/// What to play when the alarm sounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SoundSource {
    /// A user-supplied sound file.
    File {
        /// Path to the sound file.
        path: PathBuf,
    },
    /// The synthesized chime built into the binary.
    #[default]
    Chime,
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a file source, rejecting missing files and unknown extensions.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        validate_sound_path(&path)?;
        Ok(Self::file(path))
    }

    /// A short name for logs.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::File { path } => path
                .file_stem()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned()),
            Self::Chime => "chime".to_string(),
        }
    }
}

fn validate_sound_path(path: &Path) -> Result<(), SoundError> {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(SoundError::UnsupportedFormat(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(SoundError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chime() {
        let source = SoundSource::default();
        assert_eq!(source, SoundSource::Chime);
        assert_eq!(source.name(), "chime");
    }

    #[test]
    fn test_file_source() {
        let source = SoundSource::file("/sounds/bell.wav");
        assert_eq!(source.name(), "bell");
        assert!(matches!(source, SoundSource::File { ref path } if path == Path::new("/sounds/bell.wav")));
    }

    #[test]
    fn test_validated_rejects_unknown_extension() {
        let result = SoundSource::file_validated("/tmp/notes.txt");
        assert!(matches!(result, Err(SoundError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validated_rejects_missing_file() {
        let result = SoundSource::file_validated("/nonexistent/path/to/bell.wav");
        match result {
            Err(SoundError::FileNotFound(msg)) => assert!(msg.contains("bell.wav")),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_validated_accepts_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bell.WAV");
        std::fs::write(&path, b"RIFF").unwrap();
        assert!(SoundSource::file_validated(&path).is_ok());
    }
}
