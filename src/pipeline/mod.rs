//! Score processing pipeline
//!
//! Turns score text into a mono sample buffer:
//! - Duration: duration tokens to tick counts
//! - Pitch: scientific pitch notation to frequencies
//! - Parser: score text to a tempo and note events
//! - Mixer: note events to one summed sample timeline

pub mod duration;
pub mod mixer;
pub mod parser;
pub mod pitch;

pub use mixer::{peak, TimelineMixer};
pub use parser::{parse_score, NoteEvent, Score};
pub use pitch::Pitch;
