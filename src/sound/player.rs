//! Alarm player implementation using rodio.
//!
//! `RodioAlarmPlayer` keeps the output stream open for the lifetime of the
//! player and plays each alarm through its own detached `Sink`, so a call
//! to `play` returns as soon as the sound is queued.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::chime::append_chime;
use super::error::SoundError;
use super::source::SoundSource;

/// Plays the alarm on the default audio output device.
pub struct RodioAlarmPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    source: SoundSource,
}

impl RodioAlarmPlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(source: SoundSource) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            source,
        })
    }

    #[must_use]
    pub fn source(&self) -> &SoundSource {
        &self.source
    }

    /// Starts the alarm and returns immediately.
    pub fn play(&self) -> Result<(), SoundError> {
        let sink = self.queue()?;
        sink.detach();
        debug!("Alarm playback started (detached)");
        Ok(())
    }

    /// Plays the alarm and waits until it has finished.
    pub fn play_blocking(&self) -> Result<(), SoundError> {
        let sink = self.queue()?;
        sink.sleep_until_end();
        Ok(())
    }

    /// Creates a sink with the alarm queued on it.
    ///
    /// A sound file that cannot be opened or decoded is replaced by the chime.
    fn queue(&self) -> Result<Sink, SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        match &self.source {
            SoundSource::File { path } => match open_decoder(path) {
                Ok(decoder) => sink.append(decoder),
                Err(e) if e.should_fallback_to_chime() => {
                    warn!(
                        "Failed to play sound file '{}': {}, falling back to chime",
                        path.display(),
                        e
                    );
                    append_chime(&sink);
                }
                Err(e) => return Err(e),
            },
            SoundSource::Chime => append_chime(&sink),
        }

        Ok(sink)
    }
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))
}

impl std::fmt::Debug for RodioAlarmPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAlarmPlayer")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Creates a player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and the alarm stays
/// silent for the rest of the run.
#[must_use]
pub fn try_create_player(source: SoundSource) -> Option<RodioAlarmPlayer> {
    match RodioAlarmPlayer::new(source) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, alarm disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Audio hardware is usually missing in CI containers, so tests that
    // need a device return early when the player cannot be created.

    #[test]
    fn test_open_decoder_missing_file() {
        let result = open_decoder(Path::new("/nonexistent/path/to/bell.wav"));
        assert!(matches!(result, Err(SoundError::FileNotFound(_))));
    }

    #[test]
    fn test_open_decoder_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let result = open_decoder(&path);
        assert!(matches!(result, Err(SoundError::DecodeError(_))));
    }

    #[test]
    fn test_try_create_player_no_panic() {
        let _ = try_create_player(SoundSource::Chime);
    }

    #[test]
    fn test_play_missing_file_falls_back() {
        let player = match RodioAlarmPlayer::new(SoundSource::file("/nonexistent/bell.wav")) {
            Ok(p) => p,
            Err(_) => return,
        };
        assert!(player.play().is_ok());
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioAlarmPlayer::new(SoundSource::Chime) {
            Ok(p) => p,
            Err(_) => return,
        };
        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioAlarmPlayer"));
        assert!(debug_str.contains("Chime"));
    }
}
