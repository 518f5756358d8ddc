//! # Error Types
//!
//! This module defines all error types for the translator.
//!
//! Token-level errors carry the line they were found on and the text of the
//! offending token so a diagnostic can point at the exact spot in the tune.
//!
//! ## Error Types
//! - `UnrecognizedCharacter` - a character outside the notation (ignored while scanning)
//! - `InvalidDurationString` - a token whose duration the codec rejects
//! - `MissingPitch` - accidental/octave/duration marks with no pitch letter
//! - `PitchOutOfRange` - a pitch that does not fit the on-target representation
//! - `MissingHeaderMarker` - no `K:` line was found
//! - `InvalidTempo` - a `Q:` header that is not a number
//! - `SequenceOverflow` - the note sequence outgrew its capacity
//! - `ConfigError` / `EmitError` - YAML configuration or output failures
//!
//! ## Usage
//! ```rust
//! use abcpack::{translate, TuneError};
//!
//! match translate("K:C\nC D E") {
//!     Ok(translation) => println!("{} notes", translation.song.notes.len()),
//!     Err(TuneError::SequenceOverflow { capacity, .. }) => {
//!         eprintln!("more than {} notes", capacity);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Errors produced by the duration codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("divisor /{0} is not one of /1, /2, /4, /8, /16, /32")]
    InvalidDivisor(u32),

    #[error("multiplier {0} is not one of 1, 2, 4, 8, 16")]
    InvalidMultiplier(u32),

    #[error("malformed duration '{0}'")]
    Malformed(String),

    #[error("length code {0} is outside 0..=9")]
    InvalidCode(u8),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TuneError {
    /// A character that belongs to no category.
    ///
    /// The scanner skips these; whitespace and bar lines land here.
    ///
    /// # Example
    /// ```
    /// # use abcpack::TuneError;
    /// let err = TuneError::UnrecognizedCharacter { ch: '|' };
    /// assert_eq!(err.to_string(), "Unrecognized character '|'");
    /// ```
    #[error("Unrecognized character '{ch}'")]
    UnrecognizedCharacter { ch: char },

    /// A token whose duration string is rejected by the codec.
    ///
    /// # Example
    /// ```
    /// # use abcpack::{DurationError, TuneError};
    /// let err = TuneError::InvalidDurationString {
    ///     line: 3,
    ///     token: "c/99".to_string(),
    ///     duration: "/99".to_string(),
    ///     source: DurationError::InvalidDivisor(99),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid duration '/99' in token 'c/99' at line 3: divisor /99 is not one of /1, /2, /4, /8, /16, /32"
    /// );
    /// ```
    #[error("Invalid duration '{duration}' in token '{token}' at line {line}: {source}")]
    InvalidDurationString {
        line: usize,
        token: String,
        duration: String,
        source: DurationError,
    },

    /// A token made only of accidentals, octave marks or durations.
    #[error("Token '{token}' at line {line} has no pitch")]
    MissingPitch { line: usize, token: String },

    /// A token whose computed pitch collides with a sentinel or overflows.
    #[error("Pitch {pitch} of token '{token}' at line {line} is out of range")]
    PitchOutOfRange {
        line: usize,
        token: String,
        pitch: i32,
    },

    #[error("No header marker line found; the tune has no body")]
    MissingHeaderMarker,

    #[error("Invalid tempo '{value}'")]
    InvalidTempo { value: String },

    /// The sequence would exceed its preallocated capacity.
    ///
    /// This is the only error that aborts a translation midway.
    #[error("Note sequence exceeds capacity of {capacity} at line {line}")]
    SequenceOverflow { line: usize, capacity: usize },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Emit error: {0}")]
    EmitError(String),
}

impl TuneError {
    /// Attach a line number to a token error raised before the line was known.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            TuneError::InvalidDurationString {
                token,
                duration,
                source,
                ..
            } => TuneError::InvalidDurationString {
                line,
                token,
                duration,
                source,
            },
            TuneError::MissingPitch { token, .. } => TuneError::MissingPitch { line, token },
            TuneError::PitchOutOfRange { token, pitch, .. } => {
                TuneError::PitchOutOfRange { line, token, pitch }
            }
            other => other,
        }
    }

    /// Whether this error aborts the whole translation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TuneError::SequenceOverflow { .. }
                | TuneError::ConfigError(_)
                | TuneError::EmitError(_)
        )
    }
}
