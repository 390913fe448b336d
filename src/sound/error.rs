//! Sound system error types.
//!
//! Alarm playback is best-effort: the timer logs and discards these, so
//! they exist mainly to make log lines and the `--audio-check` report
//! specific.

use thiserror::Error;

/// Errors that can occur while playing the alarm.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device could be opened.
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The configured sound file does not exist or cannot be opened.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// The sound file uses an extension the player does not handle.
    #[error("unsupported sound format: {0}")]
    UnsupportedFormat(String),

    /// The sound file could not be decoded.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// A playback sink could not be created on the output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Any other playback failure.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to the sound file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::UnsupportedFormat(_) | Self::DecodeError(_)
        )
    }

    /// Returns true if playback should fall back to the built-in chime.
    #[must_use]
    pub fn should_fallback_to_chime(&self) -> bool {
        self.is_file_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert_eq!(err.to_string(), "audio device not available: no device");

        let err = SoundError::FileNotFound("/path/to/bell.wav".to_string());
        assert!(err.to_string().contains("/path/to/bell.wav"));

        let err = SoundError::UnsupportedFormat("bell.txt".to_string());
        assert!(err.to_string().contains("bell.txt"));

        let err = SoundError::DecodeError("invalid header".to_string());
        assert!(err.to_string().contains("invalid header"));

        let err = SoundError::PlaybackError("unknown".to_string());
        assert!(err.to_string().contains("unknown"));
    }

    #[test]
    fn test_file_errors_fall_back() {
        assert!(SoundError::FileNotFound("x".into()).should_fallback_to_chime());
        assert!(SoundError::UnsupportedFormat("x".into()).should_fallback_to_chime());
        assert!(SoundError::DecodeError("x".into()).should_fallback_to_chime());
        assert!(!SoundError::StreamError("x".into()).should_fallback_to_chime());
        assert!(!SoundError::DeviceNotAvailable("x".into()).should_fallback_to_chime());
    }
}
