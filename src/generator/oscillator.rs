use crate::error::ParseErrorKind;
use std::f64::consts::PI;
use std::str::FromStr;

/// Periodic waveform shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Unit-amplitude value after `cycles` periods, in [-1.0, 1.0]
    ///
    /// Every shape starts at phase 0 when `cycles` is 0:
    /// - Sine: `sin(2πx)`
    /// - Square: sign of the sine, with sign(0) = +1
    /// - Sawtooth: rises linearly from -1 to +1 each period, centred so it
    ///   starts at 0 like the sine
    /// - Triangle: -1 → +1 → -1 each period
    pub fn value(&self, cycles: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * PI * cycles).sin(),
            Waveform::Square => {
                if (2.0 * PI * cycles).sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (cycles - (cycles + 0.5).floor()),
            Waveform::Triangle => 4.0 * (cycles - (cycles + 0.5).floor()).abs() - 1.0,
        }
    }
}

impl FromStr for Waveform {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Waveform::Sine),
            "Q" => Ok(Waveform::Square),
            "A" => Ok(Waveform::Sawtooth),
            "T" => Ok(Waveform::Triangle),
            _ => Err(ParseErrorKind::InvalidWaveform(s.to_string())),
        }
    }
}

/// A periodic tone starting at phase 0
///
/// Stateless: the value of sample `i` depends only on `i`, so a tone can be
/// rendered in one pass or in pieces with identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f64,
    amplitude: f64,
    sample_rate: u32,
}

impl Oscillator {
    /// Create a new oscillator
    ///
    /// # Arguments
    /// * `waveform` - Wave shape
    /// * `frequency` - Fundamental in Hz
    /// * `amplitude` - Peak level of the output
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(waveform: Waveform, frequency: f64, amplitude: f64, sample_rate: u32) -> Self {
        Self {
            waveform,
            frequency,
            amplitude,
            sample_rate,
        }
    }

    /// Value of sample `index`, counted from the start of the tone
    pub fn sample_at(&self, index: usize) -> f64 {
        let t = index as f64 / self.sample_rate as f64;
        self.amplitude * self.waveform.value(self.frequency * t)
    }

    /// Overwrite `out` with the first `out.len()` samples of the tone
    pub fn fill(&self, out: &mut [f64]) {
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.sample_at(i);
        }
    }

    /// Add the first `out.len()` samples of the tone onto `out`
    pub fn add_into(&self, out: &mut [f64]) {
        for (i, sample) in out.iter_mut().enumerate() {
            *sample += self.sample_at(i);
        }
    }
}

/// Render one note's samples
///
/// Pure: the same arguments always produce the same samples, starting at
/// phase 0.
///
/// # Example
/// ```
/// use wav_maker::generator::{generate, Waveform};
///
/// let samples = generate(Waveform::Square, 441.0, 1.0, 200, 44100, 0.5);
/// assert_eq!(samples.len(), 200);
/// assert_eq!(samples[0], 0.5);
/// assert_eq!(samples[75], -0.5);
/// ```
pub fn generate(
    waveform: Waveform,
    frequency: f64,
    amplitude_scale: f64,
    sample_count: usize,
    sample_rate: u32,
    base_amplitude: f64,
) -> Vec<f64> {
    let oscillator = Oscillator::new(
        waveform,
        frequency,
        base_amplitude * amplitude_scale,
        sample_rate,
    );
    let mut samples = vec![0.0; sample_count];
    oscillator.fill(&mut samples);
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44100;

    #[test]
    fn test_waveform_abbreviations() {
        assert_eq!("S".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!("Q".parse::<Waveform>().unwrap(), Waveform::Square);
        assert_eq!("A".parse::<Waveform>().unwrap(), Waveform::Sawtooth);
        assert_eq!("T".parse::<Waveform>().unwrap(), Waveform::Triangle);
        for bad in ["s", "W", "Sine", ""] {
            assert_eq!(
                bad.parse::<Waveform>(),
                Err(ParseErrorKind::InvalidWaveform(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_all_waveforms_bounded() {
        for waveform in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Triangle,
        ] {
            for i in 0..1000 {
                let v = waveform.value(i as f64 * 0.0137);
                assert!((-1.0..=1.0).contains(&v), "{:?} out of range: {}", waveform, v);
            }
        }
    }

    #[test]
    fn test_phase_zero_start() {
        assert_eq!(Waveform::Sine.value(0.0), 0.0);
        assert_eq!(Waveform::Square.value(0.0), 1.0);
        assert_eq!(Waveform::Sawtooth.value(0.0), 0.0);
        assert_eq!(Waveform::Triangle.value(0.0), -1.0);
    }

    #[test]
    fn test_sawtooth_ramp() {
        assert_eq!(Waveform::Sawtooth.value(0.25), 0.5);
        assert_eq!(Waveform::Sawtooth.value(0.75), -0.5);
        // Just before the wrap it approaches +1, then restarts at -1
        assert!(Waveform::Sawtooth.value(0.499) > 0.99);
        assert_eq!(Waveform::Sawtooth.value(0.5), -1.0);
    }

    #[test]
    fn test_triangle_shape() {
        assert_eq!(Waveform::Triangle.value(0.25), 0.0);
        assert_eq!(Waveform::Triangle.value(0.5), 1.0);
        assert_eq!(Waveform::Triangle.value(0.75), 0.0);
        assert_eq!(Waveform::Triangle.value(1.0), -1.0);
    }

    #[test]
    fn test_square_halves() {
        // 100 Hz at 44.1kHz: 441 samples per period
        let samples = generate(Waveform::Square, 100.0, 1.0, 441, RATE, 1.0);
        let positive = samples.iter().filter(|&&s| s == 1.0).count();
        let negative = samples.iter().filter(|&&s| s == -1.0).count();
        assert_eq!(positive + negative, 441);
        assert!((positive as i64 - negative as i64).abs() <= 2);
    }

    #[test]
    fn test_amplitude_scaling() {
        let unit = generate(Waveform::Sine, 440.0, 1.0, 500, RATE, 1.0);
        let scaled = generate(Waveform::Sine, 440.0, 0.5, 500, RATE, 0.25);
        for (u, s) in unit.iter().zip(scaled.iter()) {
            assert!((u * 0.125 - s).abs() < 1e-12);
        }

        let silent = generate(Waveform::Triangle, 440.0, 0.0, 100, RATE, 0.25);
        assert!(silent.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(Waveform::Sawtooth, 330.0, 0.8, 2000, RATE, 0.0625);
        let b = generate(Waveform::Sawtooth, 330.0, 0.8, 2000, RATE, 0.0625);
        assert_eq!(a, b);
    }

    #[test]
    fn test_add_into_silence_matches_generate() {
        let whole = generate(Waveform::Triangle, 523.25, 1.0, 1000, RATE, 0.5);
        let osc = Oscillator::new(Waveform::Triangle, 523.25, 0.5, RATE);

        let mut mixed = vec![0.0f64; 1000];
        osc.add_into(&mut mixed);
        assert_eq!(mixed, whole);

        let mut filled = vec![9.0f64; 1000];
        osc.fill(&mut filled);
        assert_eq!(filled, whole);
    }

    #[test]
    fn test_add_into_accumulates() {
        let osc = Oscillator::new(Waveform::Square, 441.0, 0.25, RATE);
        let mut buffer = vec![1.0f64; 100];
        osc.add_into(&mut buffer);
        osc.add_into(&mut buffer);
        assert_eq!(buffer[0], 1.5);
        assert_eq!(buffer[75], 0.5);
        assert_eq!(buffer[75], 1.0 + 2.0 * osc.sample_at(75));
    }

    #[test]
    fn test_zero_length() {
        assert!(generate(Waveform::Sine, 440.0, 1.0, 0, RATE, 1.0).is_empty());
        let osc = Oscillator::new(Waveform::Sine, 440.0, 1.0, RATE);
        osc.add_into(&mut []);
    }
}
