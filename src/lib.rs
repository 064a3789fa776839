//! Text score to WAV renderer
//!
//! A score is a tempo line followed by one line per note. [`render`] parses
//! it, mixes every note onto one sample timeline and encodes the result as a
//! PCM WAV file in memory. File handling is left to the caller.

pub mod config;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod wav;

pub use config::RenderConfig;
pub use error::{ParseError, ParseErrorKind, RenderError, WavError};
pub use generator::Waveform;
pub use pipeline::{parse_score, NoteEvent, Score, TimelineMixer};

/// Render score text into WAV file bytes
///
/// Fails on the first syntax error in the score, on an unsupported output
/// format, or when the score is longer than the container or
/// [`RenderConfig::max_seconds`] allows. Nothing is mixed until the length
/// has been checked.
///
/// # Example
/// ```
/// use wav_maker::{render, RenderConfig};
///
/// let wav = render("120\n0 16 A4 1.0 S", &RenderConfig::default()).unwrap();
/// assert_eq!(&wav[0..4], b"RIFF");
/// assert_eq!(wav.len(), 44 + 22050 * 2);
/// ```
pub fn render(score_text: &str, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let format = config.wav_format();
    format.validate()?;

    let score = parse_score(score_text)?;
    let mixer = TimelineMixer::from_config(config);
    let unaddressable = || WavError::DataTooLarge { bytes: u64::MAX };

    let frames = mixer.length(&score).ok_or_else(unaddressable)?;
    format.data_size(frames)?;
    let max_frames = config.max_frames();
    if frames > max_frames {
        return Err(RenderError::TooLong { frames, max_frames });
    }

    let samples = mixer.mix(&score).ok_or_else(unaddressable)?;

    let peak = pipeline::peak(&samples);
    log::info!(
        "rendered {} notes at {} BPM: {} samples ({:.3}s), peak {:.3}",
        score.events.len(),
        score.bpm,
        samples.len(),
        samples.len() as f64 / config.sample_rate as f64,
        peak
    );
    if peak > 1.0 {
        log::warn!("mix peaks at {:.3} of full scale; output will clip", peak);
    }

    Ok(wav::wav_bytes(&samples, &format)?)
}
