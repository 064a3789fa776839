//! Parser for the score format
//!
//! Format:
//! ```text
//! <tempo BPM>
//! <start tick> <duration> <pitch> <amplitude> <waveform>
//! ...
//! ```
//!
//! - Tempo: positive decimal, beats (quarter notes) per minute
//! - Start tick: non-negative integer, in 64th notes from the start
//! - Duration: abbreviation (`TS`, `DTS`, `S`, `DS`, `E`, `DE`, `Q`, `DQ`, `H`,
//!   `DH`, `W`) or a literal tick count
//! - Pitch: scientific pitch notation (`A4`, `C#5`, `Bb3`)
//! - Amplitude: non-negative decimal scale factor
//! - Waveform: `S` sine, `Q` square, `A` sawtooth, `T` triangle
//!
//! Parsing is fail-fast: the first bad line aborts with its line number.

use crate::error::{ParseError, ParseErrorKind};
use crate::generator::Waveform;
use crate::pipeline::{duration, pitch};

/// Ticks per beat (a tick is a 64th note)
pub const TICKS_PER_BEAT: u32 = 16;

/// A single note, one line of the score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub start_tick: u32,
    pub duration_ticks: u32,
    pub frequency: f64,
    pub amplitude: f64,
    pub waveform: Waveform,
}

impl NoteEvent {
    /// Tick at which the note stops sounding
    pub fn end_tick(&self) -> u64 {
        self.start_tick as u64 + self.duration_ticks as u64
    }
}

/// A parsed score: a tempo and notes in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub bpm: f64,
    pub events: Vec<NoteEvent>,
}

impl Score {
    /// Length of one tick in seconds
    pub fn seconds_per_tick(&self) -> f64 {
        60.0 / (self.bpm * TICKS_PER_BEAT as f64)
    }

    /// Latest end tick over all notes (0 for an empty score)
    pub fn end_tick(&self) -> u64 {
        self.events.iter().map(NoteEvent::end_tick).max().unwrap_or(0)
    }

    /// Length of the score in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.end_tick() as f64 * self.seconds_per_tick()
    }
}

/// Parse the tempo line
pub fn parse_tempo(line: &str) -> Result<f64, ParseErrorKind> {
    let token = line.trim();
    match token.parse::<f64>() {
        Ok(bpm) if bpm.is_finite() && bpm > 0.0 => Ok(bpm),
        _ => Err(ParseErrorKind::InvalidTempo(token.to_string())),
    }
}

/// Parse a single note line
///
/// Format: `<start> <duration> <pitch> <amplitude> <waveform>`
pub fn parse_note(line: &str) -> Result<NoteEvent, ParseErrorKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [start, dur, pitch_token, ampl, wave] = fields[..] else {
        return Err(ParseErrorKind::MalformedLine(line.to_string()));
    };

    let start_tick = start
        .parse::<u32>()
        .map_err(|_| ParseErrorKind::InvalidTick(start.to_string()))?;

    let duration_ticks = duration::ticks(dur)?;

    let frequency = pitch::resolve(pitch_token)?;

    let amplitude = match ampl.parse::<f64>() {
        Ok(a) if a.is_finite() && a >= 0.0 => a,
        _ => return Err(ParseErrorKind::InvalidAmplitude(ampl.to_string())),
    };

    let waveform = wave.parse::<Waveform>()?;

    Ok(NoteEvent {
        start_tick,
        duration_ticks,
        frequency,
        amplitude,
        waveform,
    })
}

/// Parse full score text
///
/// Line 1 is the tempo; every following line is a note. Blank lines are
/// errors. A single trailing newline does not count as a line.
///
/// # Example
/// ```
/// use wav_maker::pipeline::parser::parse_score;
///
/// let score = parse_score("120\n0 Q A4 1.0 S\n16 8 C#5 0.5 T\n").unwrap();
/// assert_eq!(score.bpm, 120.0);
/// assert_eq!(score.events.len(), 2);
/// assert_eq!(score.end_tick(), 24);
/// ```
pub fn parse_score(text: &str) -> Result<Score, ParseError> {
    let mut lines = text.lines();

    let bpm = parse_tempo(lines.next().unwrap_or("")).map_err(|e| e.at_line(1))?;

    let mut events = Vec::new();
    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let event = parse_note(line).map_err(|e| e.at_line(line_number))?;
        log::debug!(
            "line {}: tick {} +{} at {:.3} Hz x{} {:?}",
            line_number,
            event.start_tick,
            event.duration_ticks,
            event.frequency,
            event.amplitude,
            event.waveform
        );
        events.push(event);
    }

    Ok(Score { bpm, events })
}
