//! Note durations
//!
//! Durations are counted in ticks: sixteenths of a beat, i.e. 64th notes.
//! A token is either one of the fixed abbreviations or a literal tick count.

use crate::error::ParseErrorKind;

/// Duration abbreviations and their tick counts
pub const DURATION_TABLE: [(&str, u32); 11] = [
    ("TS", 2),
    ("DTS", 3),
    ("S", 4),
    ("DS", 6),
    ("E", 8),
    ("DE", 12),
    ("Q", 16),
    ("DQ", 24),
    ("H", 32),
    ("DH", 48),
    ("W", 64),
];

/// Resolve a duration token to a tick count
///
/// # Example
/// ```
/// use wav_maker::pipeline::duration::ticks;
///
/// assert_eq!(ticks("DQ").unwrap(), 24);
/// assert_eq!(ticks("20").unwrap(), 20);
/// assert!(ticks("X").is_err());
/// ```
pub fn ticks(token: &str) -> Result<u32, ParseErrorKind> {
    if let Some(&(_, n)) = DURATION_TABLE.iter().find(|(abbrev, _)| *abbrev == token) {
        return Ok(n);
    }

    // Zero-length notes are rejected; every note lasts at least one tick
    match token.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseErrorKind::InvalidDuration(token.to_string())),
    }
}
