//! # Character Classifier
//!
//! Maps one input character to a [`Category`] and a signed payload.
//!
//! | Category        | Characters          | Payload                          |
//! |-----------------|---------------------|----------------------------------|
//! | `Accidental`    | `^` `=` `_`         | +1, 0, -1 half-steps             |
//! | `Pitch`         | `C`..`B`, `c`..`b`  | 0..11, 12..23 half-steps         |
//! | `Pitch`         | `z` `Z` `x`         | [`PITCH_REST`]                   |
//! | `Octave`        | `'` `,`             | +1, -1 octaves                   |
//! | `DurationDigit` | `0`..`9` `/`        | the character's own code         |
//!
//! The notation has no note separators. The only thing telling one note from
//! the next is the order of categories, so [`Category`] is totally ordered and
//! [`Category::begins_note`] is the one place that policy lives.

use crate::error::TuneError;
use crate::note::PITCH_REST;

/// Character category, in the order they may appear inside one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Accidental,
    Pitch,
    Octave,
    DurationDigit,
}

impl Category {
    /// Decide whether a character of this category starts a new note, given
    /// the category of the last accepted character on the line.
    ///
    /// A pitch starts a new note when anything at or above pitch rank was
    /// already seen (a note has one pitch letter). Every other category
    /// starts a new note only when it ranks below the last one, so repeated
    /// accidentals, octave marks and duration digits accumulate.
    pub fn begins_note(self, last: Option<Category>) -> bool {
        match last {
            None => false,
            Some(last) if self == Category::Pitch => self <= last,
            Some(last) => self < last,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Accidental => "accidental",
            Category::Pitch => "pitch",
            Category::Octave => "octave",
            Category::DurationDigit => "duration",
        }
    }
}

/// A classified character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub category: Category,
    pub value: i32,
}

impl Classified {
    const fn new(category: Category, value: i32) -> Self {
        Self { category, value }
    }
}

/// Classify a single character.
pub fn classify(c: char) -> Result<Classified, TuneError> {
    let classified = match c {
        '^' => Classified::new(Category::Accidental, 1),
        '=' => Classified::new(Category::Accidental, 0),
        '_' => Classified::new(Category::Accidental, -1),

        'C' => Classified::new(Category::Pitch, 0),
        'D' => Classified::new(Category::Pitch, 2),
        'E' => Classified::new(Category::Pitch, 4),
        'F' => Classified::new(Category::Pitch, 5),
        'G' => Classified::new(Category::Pitch, 7),
        'A' => Classified::new(Category::Pitch, 9),
        'B' => Classified::new(Category::Pitch, 11),
        'c' => Classified::new(Category::Pitch, 12),
        'd' => Classified::new(Category::Pitch, 14),
        'e' => Classified::new(Category::Pitch, 16),
        'f' => Classified::new(Category::Pitch, 17),
        'g' => Classified::new(Category::Pitch, 19),
        'a' => Classified::new(Category::Pitch, 21),
        'b' => Classified::new(Category::Pitch, 23),
        'z' | 'Z' | 'x' => Classified::new(Category::Pitch, PITCH_REST as i32),

        '\'' => Classified::new(Category::Octave, 1),
        ',' => Classified::new(Category::Octave, -1),

        '0'..='9' | '/' => Classified::new(Category::DurationDigit, c as i32),

        _ => return Err(TuneError::UnrecognizedCharacter { ch: c }),
    };
    Ok(classified)
}
