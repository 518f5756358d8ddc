//! # Playback Timing
//!
//! What an audio renderer needs to know about a song, without rendering it:
//! the frequency of each pitch and when each note starts and stops.
//!
//! ## Tempo
//! A song's tempo counts reference units (length code 5) per minute, so one
//! unit lasts `60 / tempo` seconds and a note lasts
//! `decode(length) * 60 / tempo` seconds.
//!
//! ## Example
//! ```rust
//! use abcpack::{playback, translate};
//!
//! let song = translate("Q:120\nK:C\nC2 z\n").unwrap().song;
//! let events = playback::schedule(&song).unwrap();
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[0].seconds, 1.0);
//! assert_eq!(events[1].start, 1.0);
//! assert_eq!(events[1].frequency, None);
//! ```

use serde::Serialize;

use crate::duration;
use crate::error::DurationError;
use crate::note::{Note, Song, PITCH_END, PITCH_REST};

/// Frequency of pitch 0 (middle C) in hertz.
pub const MIDDLE_C_HZ: f64 = 261.625_565_300_598_6;

/// Equal-tempered frequency of a pitch; `None` for rests and the end marker.
pub fn frequency(pitch: i8) -> Option<f64> {
    match pitch {
        PITCH_REST | PITCH_END => None,
        p => Some(MIDDLE_C_HZ * 2f64.powf(f64::from(p) / 12.0)),
    }
}

/// Seconds a note lasts at `tempo` units per minute.
pub fn note_seconds(note: &Note, tempo: u16) -> Result<f64, DurationError> {
    Ok(duration::decode(note.length)? * 60.0 / f64::from(tempo))
}

/// One sounding (or silent) note on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackEvent {
    pub note: Note,
    pub frequency: Option<f64>,
    pub start: f64,
    pub seconds: f64,
}

/// Lay the song out on a timeline, stopping at the end marker.
pub fn schedule(song: &Song) -> Result<Vec<PlaybackEvent>, DurationError> {
    let mut events = Vec::with_capacity(song.notes.len());
    let mut start = 0.0;
    for note in song.notes.iter().take_while(|n| !n.is_end()) {
        let seconds = note_seconds(note, song.tempo)?;
        events.push(PlaybackEvent {
            note: *note,
            frequency: frequency(note.pitch),
            start,
            seconds,
        });
        start += seconds;
    }
    Ok(events)
}

/// Total playing time of the song.
pub fn total_seconds(song: &Song) -> Result<f64, DurationError> {
    song.body()
        .iter()
        .map(|note| note_seconds(note, song.tempo))
        .sum()
}
