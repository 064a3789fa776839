//! Error types
//!
//! Score syntax errors always carry the 1-based line number and the raw token
//! that failed. Container errors cover unsupported output formats.

use thiserror::Error;

/// What went wrong on a score line, with the offending token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid tempo: \"{0}\"")]
    InvalidTempo(String),
    #[error("malformed line (expected 5 fields): \"{0}\"")]
    MalformedLine(String),
    #[error("invalid start tick: \"{0}\"")]
    InvalidTick(String),
    #[error("invalid duration: \"{0}\"")]
    InvalidDuration(String),
    #[error("invalid pitch: \"{0}\"")]
    InvalidPitch(String),
    #[error("invalid amplitude: \"{0}\"")]
    InvalidAmplitude(String),
    #[error("invalid waveform abbreviation: \"{0}\"")]
    InvalidWaveform(String),
}

impl ParseErrorKind {
    /// The raw token that caused the error
    pub fn token(&self) -> &str {
        match self {
            Self::InvalidTempo(s)
            | Self::MalformedLine(s)
            | Self::InvalidTick(s)
            | Self::InvalidDuration(s)
            | Self::InvalidPitch(s)
            | Self::InvalidAmplitude(s)
            | Self::InvalidWaveform(s) => s,
        }
    }

    /// Attach a line number
    pub fn at_line(self, line: usize) -> ParseError {
        ParseError { line, kind: self }
    }
}

/// A syntax error located in the score text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error (line {line}): {kind}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Errors raised while encoding the PCM container
#[derive(Debug, Error)]
pub enum WavError {
    #[error("unsupported bit depth: {0} (expected 8, 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
    #[error("invalid channel count: {0}")]
    InvalidChannelCount(u16),
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
    #[error("audio data too large for a WAV container: {bytes} bytes")]
    DataTooLarge { bytes: u64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that aborts a render
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Wav(#[from] WavError),
    #[error("score renders {frames} sample frames, over the limit of {max_frames}")]
    TooLong { frames: usize, max_frames: usize },
}
