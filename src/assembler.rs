//! # Note Assembler
//!
//! Accumulates classified characters into notes and detects where one note
//! ends and the next begins.
//!
//! The assembler holds two builders: `current`, which collects the note being
//! read, and `next`, which receives the character that proved `current` was
//! complete. When [`Assembler::push`] reports [`Step::Completed`] the caller
//! takes the finished builder with [`Assembler::rotate`]; `next` becomes
//! `current` and a fresh builder takes its place.
//!
//! ```text
//!   ^ c ' 4   _ B , /
//!   A P O D   A P O D        A = accidental, P = pitch, O = octave, D = duration
//!             ^ rank drops below D: new note
//! ```

use std::mem;

use log::trace;

use crate::classify::{classify, Category};
use crate::duration;
use crate::error::TuneError;
use crate::note::{Note, PITCH_END, PITCH_REST};

/// Everything gathered for one note so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBuilder {
    /// Half-steps from accidentals.
    pub accidentals: i32,
    /// Pitch from the letter, `None` until a pitch character arrives.
    pub base_pitch: Option<i32>,
    /// Octaves up (positive) or down (negative).
    pub octaves: i32,
    /// Duration characters, unparsed.
    pub duration: String,
    /// Every character routed to this builder.
    pub text: String,
    pub empty: bool,
}

impl Default for NoteBuilder {
    fn default() -> Self {
        Self {
            accidentals: 0,
            base_pitch: None,
            octaves: 0,
            duration: String::new(),
            text: String::new(),
            empty: true,
        }
    }
}

impl NoteBuilder {
    fn accept(&mut self, c: char, category: Category, value: i32) {
        match category {
            Category::Accidental => self.accidentals += value,
            Category::Pitch => self.base_pitch = Some(value),
            Category::Octave => self.octaves += value,
            Category::DurationDigit => self.duration.push(c),
        }
        self.text.push(c);
        self.empty = false;
    }

    /// Turn the builder into a note.
    ///
    /// Returns `Ok(None)` for a builder that never received a character. The
    /// errors returned here carry line 0; the driver fills in the real line.
    pub fn build(&self) -> Result<Option<Note>, TuneError> {
        if self.empty {
            return Ok(None);
        }

        let base = self.base_pitch.ok_or_else(|| TuneError::MissingPitch {
            line: 0,
            token: self.text.clone(),
        })?;

        let length = duration::encode(&self.duration).map_err(|source| {
            TuneError::InvalidDurationString {
                line: 0,
                token: self.text.clone(),
                duration: self.duration.clone(),
                source,
            }
        })?;

        // accidentals and octave marks have nothing to shift on a rest
        if base == PITCH_REST as i32 {
            return Ok(Some(Note::rest(length)));
        }

        let pitch = base + self.accidentals + 12 * self.octaves;
        if pitch <= PITCH_END as i32 || pitch >= PITCH_REST as i32 {
            return Err(TuneError::PitchOutOfRange {
                line: 0,
                token: self.text.clone(),
                pitch,
            });
        }

        Ok(Some(Note::new(pitch as i8, length)))
    }
}

/// Outcome of feeding one character to the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The character extended the current note.
    Extended,
    /// The character started a new note; the current one is complete.
    Completed,
    /// The character is not part of the notation.
    Ignored,
}

/// Boundary-detecting note accumulator for one line.
#[derive(Debug, Default)]
pub struct Assembler {
    current: NoteBuilder,
    next: NoteBuilder,
    last: Option<Category>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one character to the current or next builder.
    pub fn push(&mut self, c: char) -> Step {
        let classified = match classify(c) {
            Ok(classified) => classified,
            Err(_) => {
                trace!("ignoring unrecognized character {:?}", c);
                return Step::Ignored;
            }
        };

        let category = classified.category;
        let step = if category.begins_note(self.last) {
            self.next.accept(c, category, classified.value);
            Step::Completed
        } else {
            self.current.accept(c, category, classified.value);
            Step::Extended
        };

        trace!("{} char {:?} value {} -> {:?}", category.name(), c, classified.value, step);
        self.last = Some(category);
        step
    }

    /// Take the completed builder and promote `next` to `current`.
    pub fn rotate(&mut self) -> NoteBuilder {
        mem::replace(&mut self.current, mem::take(&mut self.next))
    }

    /// Take whatever is in progress and reset for a new line.
    pub fn finish_line(&mut self) -> NoteBuilder {
        let done = self.rotate();
        self.last = None;
        done
    }

    /// The builder currently collecting characters.
    pub fn current(&self) -> &NoteBuilder {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a whole line, collecting every note and error in order.
    fn assemble(line: &str) -> Vec<Result<Option<Note>, TuneError>> {
        let mut assembler = Assembler::new();
        let mut out = Vec::new();
        for c in line.chars() {
            if assembler.push(c) == Step::Completed {
                out.push(assembler.rotate().build());
            }
        }
        out.push(assembler.finish_line().build());
        out
    }

    fn notes(line: &str) -> Vec<Note> {
        assemble(line)
            .into_iter()
            .filter_map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_single_note_all_categories() {
        assert_eq!(notes("^c'4"), vec![Note::new(25, 7)]);
    }

    #[test]
    fn test_rest_with_duration() {
        assert_eq!(notes("z/2"), vec![Note::rest(4)]);
    }

    #[test]
    fn test_adjacent_pitches_split() {
        assert_eq!(
            notes("CDE"),
            vec![Note::new(0, 5), Note::new(2, 5), Note::new(4, 5)]
        );
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(notes("C2 C2"), vec![Note::new(0, 6), Note::new(0, 6)]);
        assert_eq!(notes("C 2"), vec![Note::new(0, 6)]);
    }

    #[test]
    fn test_accidental_after_duration_starts_new_note() {
        assert_eq!(notes("c2_B,/"), vec![Note::new(12, 6), Note::new(-2, 4)]);
    }

    #[test]
    fn test_repeated_marks_accumulate() {
        assert_eq!(notes("^^c"), vec![Note::new(14, 5)]);
        assert_eq!(notes("C,,"), vec![Note::new(-24, 5)]);
        assert_eq!(notes("c''"), vec![Note::new(36, 5)]);
        assert_eq!(notes("__E"), vec![Note::new(2, 5)]);
    }

    #[test]
    fn test_natural_is_zero() {
        assert_eq!(notes("=F"), vec![Note::new(5, 5)]);
    }

    #[test]
    fn test_rest_ignores_modifiers() {
        assert_eq!(notes("^z'"), vec![Note::rest(5)]);
    }

    #[test]
    fn test_empty_line_yields_nothing() {
        assert!(notes("").is_empty());
        assert!(notes("   | ").is_empty());
    }

    #[test]
    fn test_accidentals_without_pitch_are_an_error() {
        let results = assemble("^^");
        assert_eq!(
            results,
            vec![Err(TuneError::MissingPitch {
                line: 0,
                token: "^^".to_string()
            })]
        );
    }

    #[test]
    fn test_digits_across_whitespace_join() {
        let results = assemble("c2 3");
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(TuneError::InvalidDurationString { .. })
        ));
    }

    #[test]
    fn test_bad_duration_does_not_swallow_next_note() {
        let results = assemble("c/99 d");
        assert_eq!(results.len(), 2);
        match &results[0] {
            Err(TuneError::InvalidDurationString { token, duration, .. }) => {
                assert_eq!(token, "c/99");
                assert_eq!(duration, "/99");
            }
            other => panic!("Expected InvalidDurationString, got {:?}", other),
        }
        assert_eq!(results[1], Ok(Some(Note::new(14, 5))));
    }

    #[test]
    fn test_pitch_out_of_range() {
        assert_eq!(assemble("b''''''''"), vec![Ok(Some(Note::new(119, 5)))]);
        let results = assemble("b'''''''''");
        assert!(matches!(
            results[0],
            Err(TuneError::PitchOutOfRange { pitch: 131, .. })
        ));
    }

    #[test]
    fn test_rotate_moves_next_into_current() {
        let mut assembler = Assembler::new();
        assert_eq!(assembler.push('C'), Step::Extended);
        assert_eq!(assembler.push('^'), Step::Completed);
        let done = assembler.rotate();
        assert_eq!(done.text, "C");
        assert_eq!(assembler.current().text, "^");
        assert_eq!(assembler.current().accidentals, 1);
    }

    #[test]
    fn test_ignored_char_keeps_last_category() {
        let mut assembler = Assembler::new();
        assembler.push('C');
        assert_eq!(assembler.push('|'), Step::Ignored);
        // still after a pitch, so a duration digit extends
        assert_eq!(assembler.push('2'), Step::Extended);
    }

    #[test]
    fn test_finish_line_resets_category_state() {
        let mut assembler = Assembler::new();
        assembler.push('c');
        assembler.push('4');
        let done = assembler.finish_line();
        assert_eq!(done.build(), Ok(Some(Note::new(12, 7))));
        // new line: an accidental is the start of the first note, not a boundary
        assert_eq!(assembler.push('^'), Step::Extended);
    }
}
