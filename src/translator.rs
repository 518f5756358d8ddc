//! # Line/Score Driver
//!
//! Walks a tune line by line and turns its body into a [`Song`].
//!
//! ## Regions
//! - **Header**: every line before the header marker (`K:` by default) is
//!   inert. Information fields such as `T:Title` or `Q:1/4=120` are recorded
//!   in the song's headers but never parsed as notes.
//! - **Body**: every line after the marker is fed character by character to
//!   the [`Assembler`]. A line ends at a newline or the comment character
//!   (`%`), whichever comes first.
//!
//! ## Recovery
//! A bad token (unparsable duration, missing pitch, pitch out of range) is
//! recorded as a diagnostic and dropped; the rest of the tune still parses.
//! Only running out of capacity aborts the translation.
//!
//! ## Example
//! ```rust
//! use abcpack::{translate, Note};
//!
//! let source = "X:1\nT:Scale\nK:C\nC D E F | G A B c |\n";
//! let translation = translate(source).unwrap();
//! assert_eq!(translation.song.title(), Some("Scale"));
//! assert_eq!(translation.song.notes.len(), 9);
//! assert_eq!(translation.song.notes[7], Note::new(12, 5));
//! assert!(translation.song.notes[8].is_end());
//! ```

use log::{debug, info, warn};

use crate::assembler::{Assembler, NoteBuilder, Step};
use crate::config::TranslatorConfig;
use crate::error::TuneError;
use crate::note::{Headers, Note, Song, END_NOTE};

/// A finished song plus every recoverable problem met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub song: Song,
    pub diagnostics: Vec<TuneError>,
}

/// Incremental tune translator. Feed it lines, then call [`Translator::finish`].
#[derive(Debug)]
pub struct Translator {
    config: TranslatorConfig,
    assembler: Assembler,
    notes: Vec<Note>,
    headers: Headers,
    diagnostics: Vec<TuneError>,
    started: bool,
    saw_content: bool,
    line: usize,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            config,
            assembler: Assembler::new(),
            notes: Vec::new(),
            headers: Headers::new(),
            diagnostics: Vec::new(),
            started: false,
            saw_content: false,
            line: 0,
        }
    }

    /// Process one line of input. The line may or may not include its `\n`.
    pub fn feed_line(&mut self, line: &str) -> Result<(), TuneError> {
        self.line += 1;

        if !self.started {
            self.scan_header_line(line);
            return Ok(());
        }

        for c in line.chars() {
            if c == '\n' || c == self.config.comment_char {
                break;
            }
            if self.assembler.push(c) == Step::Completed {
                let done = self.assembler.rotate();
                self.flush(done)?;
            }
        }

        let done = self.assembler.finish_line();
        self.flush(done)
    }

    fn scan_header_line(&mut self, line: &str) {
        let trimmed = line.trim_end_matches(['\r', '\n']);

        // information fields are header content; anything else is a stray body
        match information_field(trimmed) {
            Some((key, value)) => self.headers.entry(key).or_default().push(value.to_string()),
            None if !trimmed.trim().is_empty() => self.saw_content = true,
            None => {}
        }

        let marker = self.config.header_marker.as_str();
        if trimmed.len() > marker.len() && trimmed.starts_with(marker) {
            info!("found header marker at line {}", self.line);
            self.started = true;
        } else {
            debug!("skipping header line {}: {:?}", self.line, trimmed);
        }
    }

    fn flush(&mut self, builder: NoteBuilder) -> Result<(), TuneError> {
        match builder.build() {
            Ok(Some(note)) => {
                debug!("built note from {:?}: {}", builder.text, note);
                self.push_note(note)
            }
            Ok(None) => Ok(()),
            Err(e) => {
                let e = e.at_line(self.line);
                warn!("dropping token: {}", e);
                self.diagnostics.push(e);
                Ok(())
            }
        }
    }

    fn push_note(&mut self, note: Note) -> Result<(), TuneError> {
        // one slot is always kept for the end marker
        if self.notes.len() + 1 >= self.config.capacity {
            return Err(TuneError::SequenceOverflow {
                line: self.line,
                capacity: self.config.capacity,
            });
        }
        self.notes.push(note);
        Ok(())
    }

    /// Terminate the sequence and hand over the song.
    pub fn finish(mut self) -> Result<Translation, TuneError> {
        if !self.started {
            if self.saw_content {
                return Err(TuneError::MissingHeaderMarker);
            }
            warn!("no tune body found; producing an empty song");
            self.diagnostics.push(TuneError::MissingHeaderMarker);
        }

        let tempo = match self.headers.get(&'Q').and_then(|values| values.last()) {
            Some(value) => match parse_tempo(value) {
                Some(tempo) => tempo,
                None => {
                    let e = TuneError::InvalidTempo {
                        value: value.clone(),
                    };
                    warn!("{}", e);
                    self.diagnostics.push(e);
                    self.config.tempo
                }
            },
            None => self.config.tempo,
        };

        self.notes.push(END_NOTE);

        info!(
            "translated {} notes ({} diagnostics) at tempo {}",
            self.notes.len() - 1,
            self.diagnostics.len(),
            tempo
        );

        Ok(Translation {
            song: Song {
                notes: self.notes,
                tempo,
                headers: self.headers,
            },
            diagnostics: self.diagnostics,
        })
    }
}

/// Split an `X:value` information field into its key and trimmed value.
fn information_field(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(key), Some(':')) if key.is_ascii_alphabetic() => Some((key, line[2..].trim())),
        _ => None,
    }
}

/// Parse a `Q:` value: `120`, `1/4=120` or `1/4=120 "Allegro"`.
///
/// Only the number after the last `=` is kept. The beat fraction in front of
/// it is not used to rescale, so `Q:1/8=120` and `Q:1/4=120` both give 120
/// units per minute.
fn parse_tempo(value: &str) -> Option<u16> {
    let bpm = value.rsplit('=').next().unwrap_or(value).trim();
    let digits: String = bpm.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u16>() {
        Ok(tempo) if tempo > 0 => Some(tempo),
        _ => None,
    }
}

/// Translate a whole tune with the default configuration.
pub fn translate(source: &str) -> Result<Translation, TuneError> {
    translate_with_config(source, &TranslatorConfig::default())
}

/// Translate a whole tune.
pub fn translate_with_config(
    source: &str,
    config: &TranslatorConfig,
) -> Result<Translation, TuneError> {
    let mut translator = Translator::new(config.clone());
    for line in source.lines() {
        translator.feed_line(line)?;
    }
    translator.finish()
}
