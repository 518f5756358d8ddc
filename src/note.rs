//! # Note Model
//!
//! The atomic musical event and the song that holds a sequence of them.
//!
//! ## Pitch
//! `pitch` counts half-steps from middle C (`C` = 0, `c` = 12 in the
//! notation's letters, see `classify`). Two values are reserved:
//! - [`PITCH_REST`] - a rest, no pitch sounds
//! - [`PITCH_END`] - the end marker that terminates every sequence
//!
//! ## Length
//! `length` is a code 0..=9 understood by the `duration` codec:
//! code 5 is one reference unit, each step halves or doubles it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Pitch value of a rest.
pub const PITCH_REST: i8 = 127;

/// Pitch value of the end-of-sequence marker.
pub const PITCH_END: i8 = -127;

/// Length code carried by the end marker.
pub const END_LENGTH: u8 = 0;

/// The note that terminates every sequence.
pub const END_NOTE: Note = Note {
    pitch: PITCH_END,
    length: END_LENGTH,
};

/// Tempo used when the tune does not declare one.
pub const DEFAULT_TEMPO: u16 = 360;

/// A single note: pitch in half-steps plus a length code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub pitch: i8,
    pub length: u8,
}

impl Note {
    pub const fn new(pitch: i8, length: u8) -> Self {
        Self { pitch, length }
    }

    pub const fn rest(length: u8) -> Self {
        Self {
            pitch: PITCH_REST,
            length,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.pitch == PITCH_REST
    }

    pub fn is_end(&self) -> bool {
        self.pitch == PITCH_END
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pitch {
            PITCH_END => write!(f, "end"),
            PITCH_REST => write!(f, "rest l{}", self.length),
            pitch => write!(f, "{:+} l{}", pitch, self.length),
        }
    }
}

/// Information fields found before the body (`T:` title, `Q:` tempo, ...).
pub type Headers = BTreeMap<char, Vec<String>>;

/// An ordered note sequence ending with [`END_NOTE`], plus its tempo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub notes: Vec<Note>,
    /// Beats per reference unit per minute.
    pub tempo: u16,
    #[serde(default)]
    pub headers: Headers,
}

impl Default for Song {
    fn default() -> Self {
        Self {
            notes: vec![END_NOTE],
            tempo: DEFAULT_TEMPO,
            headers: Headers::new(),
        }
    }
}

impl Song {
    /// Title from the first `T:` header, if any.
    pub fn title(&self) -> Option<&str> {
        self.headers
            .get(&'T')
            .and_then(|titles| titles.first())
            .map(String::as_str)
    }

    /// Notes before the end marker.
    pub fn body(&self) -> &[Note] {
        match self.notes.iter().position(Note::is_end) {
            Some(end) => &self.notes[..end],
            None => &self.notes,
        }
    }

    /// True if the sequence ends with exactly one end marker.
    pub fn is_terminated(&self) -> bool {
        self.notes.last().is_some_and(Note::is_end)
            && self.notes.iter().filter(|n| n.is_end()).count() == 1
    }
}
