//! Render configuration
//!
//! Output format and loudness are fixed constants. The base amplitude is the
//! single scalar handed to the mixer and oscillators.

use crate::wav::WavFormat;

/// Output sample rate in Hz
pub const SAMPLE_RATE: u32 = 44100;
/// Output bit depth
pub const BITS_PER_SAMPLE: u16 = 16;
/// Output channel count (mono)
pub const CHANNELS: u16 = 1;
/// Peak level of a unit-amplitude note, relative to full scale (1.0)
pub const BASE_AMPLITUDE: f64 = 0.0625;
/// Longest score a render accepts, in seconds of audio
///
/// The whole mix is held in memory as `f64` samples, so this bounds a
/// default render to roughly 1.3 GiB of working memory.
pub const MAX_SECONDS: u32 = 1800;

/// Configuration for a single render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per PCM sample (8, 16, 24 or 32)
    pub bits_per_sample: u16,
    /// Number of interleaved channels in the container
    pub channels: u16,
    /// Scale applied to every note before its own amplitude
    pub base_amplitude: f64,
    /// Render length limit in seconds of audio
    pub max_seconds: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bits_per_sample: BITS_PER_SAMPLE,
            channels: CHANNELS,
            base_amplitude: BASE_AMPLITUDE,
            max_seconds: MAX_SECONDS,
        }
    }
}

impl RenderConfig {
    /// Container format described by this configuration
    pub fn wav_format(&self) -> WavFormat {
        WavFormat {
            sample_rate: self.sample_rate,
            channels: self.channels,
            bits_per_sample: self.bits_per_sample,
        }
    }

    /// Largest mix, in sample frames, a render will allocate
    pub fn max_frames(&self) -> usize {
        (self.sample_rate as u64 * self.max_seconds as u64)
            .try_into()
            .unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.bits_per_sample, 16);
        assert_eq!(config.channels, 1);
        // 2048 out of a 16-bit full scale of 32768
        assert_eq!(config.base_amplitude * 32768.0, 2048.0);
        assert_eq!(config.max_seconds, 1800);
        assert_eq!(config.max_frames(), 79_380_000);
    }

    #[test]
    fn test_max_frames_follows_rate() {
        let config = RenderConfig {
            sample_rate: 8000,
            max_seconds: 2,
            ..Default::default()
        };
        assert_eq!(config.max_frames(), 16000);
    }

    #[test]
    fn test_wav_format_from_config() {
        let config = RenderConfig {
            sample_rate: 22050,
            bits_per_sample: 24,
            channels: 2,
            ..Default::default()
        };
        let format = config.wav_format();
        assert_eq!(format.sample_rate, 22050);
        assert_eq!(format.bits_per_sample, 24);
        assert_eq!(format.channels, 2);
    }
}
