//! Timeline mixer
//!
//! Places every note on a single sample timeline and sums them. Tick
//! positions become sample offsets through the score tempo; each note is
//! rendered independently from phase 0 and added in place. There is no
//! gain compensation or normalization, so dense passages can exceed full
//! scale and clip in the container writer.

use std::ops::Range;

use crate::config::RenderConfig;
use crate::generator::Oscillator;
use crate::pipeline::parser::{NoteEvent, Score, TICKS_PER_BEAT};

/// Mixes scores into a mono sample buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineMixer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Scale applied to every note on top of its own amplitude
    pub base_amplitude: f64,
}

impl TimelineMixer {
    pub fn new(sample_rate: u32, base_amplitude: f64) -> Self {
        Self {
            sample_rate,
            base_amplitude,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.sample_rate, config.base_amplitude)
    }

    /// Convert a tick count to a (rounded) sample count at `bpm`
    ///
    /// `None` when the position does not fit in memory addressing, which
    /// happens for huge tick counts or vanishingly small tempos.
    pub fn tick_to_sample(&self, tick: u64, bpm: f64) -> Option<usize> {
        let seconds_per_tick = 60.0 / (bpm * TICKS_PER_BEAT as f64);
        let samples = (tick as f64 * seconds_per_tick * self.sample_rate as f64).round();
        if samples.is_finite() && samples >= 0.0 && samples < usize::MAX as f64 {
            Some(samples as usize)
        } else {
            None
        }
    }

    /// Sample range covered by a note
    ///
    /// Start and length are rounded separately, so back-to-back notes can
    /// overlap or leave a gap of one sample.
    pub fn note_span(&self, event: &NoteEvent, bpm: f64) -> Option<Range<usize>> {
        let start = self.tick_to_sample(event.start_tick as u64, bpm)?;
        let length = self.tick_to_sample(event.duration_ticks as u64, bpm)?;
        Some(start..start.checked_add(length)?)
    }

    /// Buffer length needed for a score: the latest note end in samples
    ///
    /// `None` if any note lies beyond the addressable timeline.
    pub fn length(&self, score: &Score) -> Option<usize> {
        score.events.iter().try_fold(0usize, |len, event| {
            Some(len.max(self.note_span(event, score.bpm)?.end))
        })
    }

    /// Render and sum every note of the score
    ///
    /// Returns `None` under the same conditions as [`TimelineMixer::length`].
    /// The buffer is allocated in full, so callers bound `length` first.
    ///
    /// # Example
    /// ```
    /// use wav_maker::pipeline::{parse_score, TimelineMixer};
    ///
    /// let score = parse_score("120\n0 Q A4 1.0 S").unwrap();
    /// let buffer = TimelineMixer::new(44100, 0.5).mix(&score).unwrap();
    /// assert_eq!(buffer.len(), 22050);
    /// assert_eq!(buffer[0], 0.0);
    /// ```
    pub fn mix(&self, score: &Score) -> Option<Vec<f64>> {
        let mut buffer = vec![0.0f64; self.length(score)?];

        for event in &score.events {
            let span = self.note_span(event, score.bpm)?;
            log::debug!(
                "mixing {:?} {:.3} Hz into samples {}..{}",
                event.waveform,
                event.frequency,
                span.start,
                span.end
            );

            Oscillator::new(
                event.waveform,
                event.frequency,
                self.base_amplitude * event.amplitude,
                self.sample_rate,
            )
            .add_into(&mut buffer[span]);
        }

        Some(buffer)
    }
}

/// Largest absolute sample value (0 for an empty buffer)
pub fn peak(buffer: &[f64]) -> f64 {
    buffer.iter().fold(0.0f64, |max, s| max.max(s.abs()))
}
