//! Alarm playback for the tomato timer.
//!
//! The timer only knows the [`AlarmPlayer`] capability: "play the alarm,
//! don't block, failures are not my problem". This module provides:
//!
//! - `RodioAlarmPlayer`: plays a sound file or the built-in chime on the
//!   default output device
//! - `MockAlarmPlayer`: records plays, for tests
//! - blanket impls so `Arc<P>` and `Option<P>` are players too (`None`
//!   stands for "no audio device" and plays nothing)
//!
//! # Usage
//!
//! ```rust,no_run
//! use tomato::sound::{AlarmPlayer, RodioAlarmPlayer, SoundSource};
//!
//! let player = RodioAlarmPlayer::new(SoundSource::Chime).expect("audio init");
//! player.play().expect("playback failed");
//! ```

mod chime;
mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub use chime::{append_chime, CHIME_NOTES};
pub use error::SoundError;
pub use player::{try_create_player, RodioAlarmPlayer};
pub use source::SoundSource;

/// Capability to sound the alarm.
///
/// Implementations must not block the caller for longer than it takes to
/// queue the sound.
pub trait AlarmPlayer {
    /// Starts playing the alarm.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started. Callers treat
    /// this as best-effort and discard it.
    fn play(&self) -> Result<(), SoundError>;
}

impl AlarmPlayer for RodioAlarmPlayer {
    fn play(&self) -> Result<(), SoundError> {
        RodioAlarmPlayer::play(self)
    }
}

impl<T: AlarmPlayer + ?Sized> AlarmPlayer for Arc<T> {
    fn play(&self) -> Result<(), SoundError> {
        (**self).play()
    }
}

impl<T: AlarmPlayer> AlarmPlayer for Option<T> {
    fn play(&self) -> Result<(), SoundError> {
        match self {
            Some(player) => player.play(),
            None => Ok(()),
        }
    }
}

/// Mock alarm player for testing.
#[derive(Debug, Default)]
pub struct MockAlarmPlayer {
    plays: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockAlarmPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of play attempts, including failed ones.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) {
        self.plays.store(0, Ordering::SeqCst);
    }
}

impl AlarmPlayer for MockAlarmPlayer {
    fn play(&self) -> Result<(), SoundError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}

/// Plays the alarm once and waits for it to finish.
///
/// Used by `--audio-check` to confirm sound works before a session.
///
/// # Errors
///
/// Returns an error if the audio device cannot be opened or playback fails.
pub fn audio_check(source: SoundSource) -> Result<(), SoundError> {
    let player = RodioAlarmPlayer::new(source)?;
    player.play_blocking()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts_plays() {
        let mock = MockAlarmPlayer::new();
        assert_eq!(mock.play_count(), 0);
        mock.play().unwrap();
        mock.play().unwrap();
        assert_eq!(mock.play_count(), 2);
        mock.clear_calls();
        assert_eq!(mock.play_count(), 0);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockAlarmPlayer::new();
        mock.set_should_fail(true);
        assert!(matches!(mock.play(), Err(SoundError::PlaybackError(_))));
        assert_eq!(mock.play_count(), 1);
    }

    #[test]
    fn test_arc_player_shares_state() {
        let mock = Arc::new(MockAlarmPlayer::new());
        let player: Arc<MockAlarmPlayer> = Arc::clone(&mock);
        AlarmPlayer::play(&player).unwrap();
        assert_eq!(mock.play_count(), 1);
    }

    #[test]
    fn test_missing_player_is_silent() {
        let player: Option<MockAlarmPlayer> = None;
        assert!(player.play().is_ok());

        let player = Some(MockAlarmPlayer::new());
        player.play().unwrap();
        assert_eq!(player.as_ref().map(MockAlarmPlayer::play_count), Some(1));
    }

    #[test]
    fn test_audio_check_graceful_failure() {
        // May fail in a container without audio, that's expected
        let _ = audio_check(SoundSource::Chime);
    }
}
