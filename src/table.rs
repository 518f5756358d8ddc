//! # Dedup Table Builder
//!
//! Compresses a song into a table of distinct notes plus one index per note.
//!
//! ```text
//! notes:    E D C D E E E end          regular: [end, E, D, C]
//!                                      indices: [1, 2, 3, 2, 1, 1, 1, 0]
//! ```
//!
//! `regular[0]` is always the end marker, so index 0 terminates playback on
//! the target. `inverse` maps each note's packed `(length, pitch)` key to its
//! position in `regular`.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::note::{Note, Song, END_NOTE};

/// Distinct notes plus the index sequence that rebuilds the song from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupTable {
    /// Distinct notes in order of first appearance, end marker first.
    pub regular: Vec<Note>,
    /// Packed `(length, pitch)` key to position in `regular`.
    #[serde(skip)]
    pub inverse: HashMap<u16, usize>,
    /// One index into `regular` per note of the song.
    pub indices: Vec<usize>,
}

impl DedupTable {
    /// Pack a note into a key: pitch in the low byte, length above it.
    pub fn key(note: &Note) -> u16 {
        (u16::from(note.length) << 8) | u16::from(note.pitch as u8)
    }

    pub fn build(song: &Song) -> Self {
        let mut table = Self {
            regular: vec![END_NOTE],
            inverse: HashMap::from([(Self::key(&END_NOTE), 0)]),
            indices: Vec::with_capacity(song.notes.len()),
        };

        for note in &song.notes {
            let index = table.intern(*note);
            table.indices.push(index);
            if note.is_end() {
                break;
            }
        }

        debug!(
            "deduplicated {} notes into {} distinct entries",
            table.indices.len(),
            table.regular.len()
        );
        table
    }

    fn intern(&mut self, note: Note) -> usize {
        let next = self.regular.len();
        let index = *self.inverse.entry(Self::key(&note)).or_insert(next);
        if index == next {
            self.regular.push(note);
        }
        index
    }

    /// Position of `note` in `regular`, if it was seen.
    pub fn index_of(&self, note: &Note) -> Option<usize> {
        self.inverse.get(&Self::key(note)).copied()
    }

    /// Number of distinct notes, end marker included.
    pub fn distinct(&self) -> usize {
        self.regular.len()
    }

    /// Rebuild the note sequence from the index sequence.
    ///
    /// Returns `None` if any index points past the end of `regular`.
    pub fn replay(&self) -> Option<Vec<Note>> {
        self.indices
            .iter()
            .map(|&index| self.regular.get(index).copied())
            .collect()
    }
}

impl From<&Song> for DedupTable {
    fn from(song: &Song) -> Self {
        Self::build(song)
    }
}
