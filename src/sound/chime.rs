//! Built-in alarm chime.
//!
//! The chime is synthesized from sine tones at playback time, so the binary
//! does not ship an audio asset. Used when no sound file is configured, or
//! as the fallback when the configured file cannot be played.

use std::time::Duration;

use rodio::source::{SineWave, Source, Zero};
use rodio::Sink;

/// Sample rate of the silent gaps, matching rodio's sine generator.
const SAMPLE_RATE: u32 = 48_000;

/// Volume applied to each tone.
const TONE_AMPLITUDE: f32 = 0.25;

/// Chime notes as (frequency in Hz, length in ms). A frequency of zero is a rest.
pub const CHIME_NOTES: &[(f32, u64)] = &[
    (880.0, 160),
    (0.0, 80),
    (880.0, 160),
    (0.0, 80),
    (1320.0, 320),
];

/// Queues the chime on `sink`.
pub fn append_chime(sink: &Sink) {
    for &(frequency, millis) in CHIME_NOTES {
        let length = Duration::from_millis(millis);
        if frequency > 0.0 {
            sink.append(
                SineWave::new(frequency)
                    .take_duration(length)
                    .amplify(TONE_AMPLITUDE),
            );
        } else {
            sink.append(Zero::<f32>::new(1, SAMPLE_RATE).take_duration(length));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chime_length() {
        let total: u64 = CHIME_NOTES.iter().map(|&(_, millis)| millis).sum();
        assert_eq!(total, 800);
    }

    #[test]
    fn test_chime_starts_and_ends_with_tone() {
        assert!(CHIME_NOTES.first().is_some_and(|&(f, _)| f > 0.0));
        assert!(CHIME_NOTES.last().is_some_and(|&(f, _)| f > 0.0));
    }

    #[test]
    fn test_append_to_silent_sink() {
        let (sink, _queue) = Sink::new_idle();
        append_chime(&sink);
        assert_eq!(sink.len(), CHIME_NOTES.len());
    }
}
