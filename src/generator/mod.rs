pub mod oscillator;

pub use oscillator::{generate, Oscillator, Waveform};
