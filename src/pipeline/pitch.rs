//! Pitch resolution
//!
//! Pitches use scientific pitch notation: `<letter>[#|b]<octave>`, e.g. `A4`,
//! `C#5`, `Bb-1`. Accidentals name black keys only, so each black key has
//! exactly two spellings (`D#`/`Eb`) and each white key exactly one.
//! Frequencies are twelve-tone equal tempered with A4 = 440 Hz and
//! C4 = MIDI note 60.

use crate::error::ParseErrorKind;
use std::str::FromStr;

/// Reference pitch (A4) in Hz
pub const A4_FREQUENCY: f64 = 440.0;
/// MIDI note number of A4
pub const A4_MIDI: i64 = 69;

/// Natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitones above C within the octave
    pub fn semitone(&self) -> i64 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

/// A single optional accidental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn offset(&self) -> i64 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// A parsed pitch (letter, accidental, octave)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i32,
}

impl Pitch {
    /// MIDI-style semitone number (C4 = 60, A4 = 69)
    pub fn midi_number(&self) -> i64 {
        12 * (self.octave as i64 + 1) + self.letter.semitone() + self.accidental.offset()
    }

    /// Equal-tempered frequency in Hz
    ///
    /// The distance from A4 is split into whole octaves and a remainder so
    /// that moving up an octave multiplies the result by exactly 2.
    pub fn frequency(&self) -> f64 {
        let distance = self.midi_number() - A4_MIDI;
        let octaves = distance.div_euclid(12);
        let semitones = distance.rem_euclid(12);
        // Octave counts beyond i32 are far outside f64 range anyway
        let octaves = octaves.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        A4_FREQUENCY * 2f64.powi(octaves) * 2f64.powf(semitones as f64 / 12.0)
    }
}

impl FromStr for Pitch {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseErrorKind::InvalidPitch(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().and_then(Letter::from_char).ok_or_else(invalid)?;

        let rest = chars.as_str();
        let (accidental, octave_str) = if let Some(r) = rest.strip_prefix('#') {
            (Accidental::Sharp, r)
        } else if let Some(r) = rest.strip_prefix('b') {
            (Accidental::Flat, r)
        } else {
            (Accidental::Natural, rest)
        };

        // Only black keys take an accidental: no Cb, Fb, E# or B#
        let white_key_spelling = matches!(
            (letter, accidental),
            (Letter::C | Letter::F, Accidental::Flat) | (Letter::E | Letter::B, Accidental::Sharp)
        );
        if white_key_spelling {
            return Err(invalid());
        }

        let octave = octave_str.parse::<i32>().map_err(|_| invalid())?;

        Ok(Pitch {
            letter,
            accidental,
            octave,
        })
    }
}

/// Resolve a pitch token to its frequency in Hz
///
/// # Example
/// ```
/// use wav_maker::pipeline::pitch::resolve;
///
/// assert_eq!(resolve("A4").unwrap(), 440.0);
/// assert_eq!(resolve("D#4").unwrap(), resolve("Eb4").unwrap());
/// ```
pub fn resolve(token: &str) -> Result<f64, ParseErrorKind> {
    let frequency = token.parse::<Pitch>()?.frequency();
    // Absurd octaves overflow or underflow f64
    if frequency.is_finite() && frequency > 0.0 {
        Ok(frequency)
    } else {
        Err(ParseErrorKind::InvalidPitch(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTERS: [&str; 7] = ["C", "D", "E", "F", "G", "A", "B"];

    #[test]
    fn test_parse_pitch() {
        let pitch: Pitch = "C#5".parse().unwrap();
        assert_eq!(pitch.letter, Letter::C);
        assert_eq!(pitch.accidental, Accidental::Sharp);
        assert_eq!(pitch.octave, 5);

        let pitch: Pitch = "Bb-1".parse().unwrap();
        assert_eq!(pitch.letter, Letter::B);
        assert_eq!(pitch.accidental, Accidental::Flat);
        assert_eq!(pitch.octave, -1);

        let pitch: Pitch = "G10".parse().unwrap();
        assert_eq!(pitch.accidental, Accidental::Natural);
        assert_eq!(pitch.octave, 10);
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!("C4".parse::<Pitch>().unwrap().midi_number(), 60);
        assert_eq!("A4".parse::<Pitch>().unwrap().midi_number(), 69);
        assert_eq!("C-1".parse::<Pitch>().unwrap().midi_number(), 0);
        assert_eq!("B3".parse::<Pitch>().unwrap().midi_number(), 59);
    }

    #[test]
    fn test_reference_frequencies() {
        assert_eq!(resolve("A4").unwrap(), 440.0);
        assert_eq!(resolve("A3").unwrap(), 220.0);
        assert_eq!(resolve("A0").unwrap(), 27.5);
        assert!((resolve("C4").unwrap() - 261.6256).abs() < 1e-3);
        assert!((resolve("E2").unwrap() - 82.4069).abs() < 1e-3);
    }

    #[test]
    fn test_enharmonic_equivalence() {
        let pairs = [
            ("C#4", "Db4"),
            ("D#4", "Eb4"),
            ("F#3", "Gb3"),
            ("G#6", "Ab6"),
            ("A#2", "Bb2"),
        ];
        for (sharp, flat) in pairs {
            assert_eq!(resolve(sharp).unwrap(), resolve(flat).unwrap());
        }
    }

    #[test]
    fn test_octave_doubling_is_exact() {
        let spellings = LETTERS
            .iter()
            .map(|l| l.to_string())
            .chain(["C#", "Db", "D#", "Eb", "F#", "Gb", "G#", "Ab", "A#", "Bb"].map(String::from));
        for name in spellings {
            for octave in -1..9 {
                let low = resolve(&format!("{}{}", name, octave)).unwrap();
                let high = resolve(&format!("{}{}", name, octave + 1)).unwrap();
                assert_eq!(high, 2.0 * low, "{}{}", name, octave);
            }
        }
    }

    #[test]
    fn test_white_key_accidentals_rejected() {
        for token in ["Cb3", "Fb4", "E#4", "B#2"] {
            assert_eq!(
                resolve(token),
                Err(ParseErrorKind::InvalidPitch(token.to_string()))
            );
        }
    }

    #[test]
    fn test_out_of_range_octave() {
        assert!(resolve("A2000").is_err());
        assert!(resolve("A-2000").is_err());
        assert!(resolve("A99999999999").is_err());
    }

    #[test]
    fn test_invalid_pitches() {
        for token in ["", "H4", "a4", "A", "A#", "F##2", "Ebb3", "Cx4", "A4.5", "#4", "A 4"] {
            assert_eq!(
                resolve(token),
                Err(ParseErrorKind::InvalidPitch(token.to_string())),
                "token {:?}",
                token
            );
        }
    }
}
