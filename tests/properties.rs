//! Property-based tests for the codec, the translator and the dedup table.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test properties
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use abcpack::duration::{decode, encode, notation, MAX_CODE};
use abcpack::{translate, DedupTable, Note, Song, END_NOTE, PITCH_REST};

/// Any note the translator can produce (no end markers).
fn body_note() -> impl Strategy<Value = Note> {
    prop_oneof![
        (-126i8..=126, 0u8..=MAX_CODE).prop_map(|(pitch, length)| Note::new(pitch, length)),
        (0u8..=MAX_CODE).prop_map(|length| Note::new(PITCH_REST, length)),
    ]
}

/// A song with a small pitch range so repeats are common.
fn repetitive_song() -> impl Strategy<Value = Song> {
    prop::collection::vec((0i8..6, 3u8..6), 0..64).prop_map(|pairs| {
        let mut notes: Vec<Note> = pairs.into_iter().map(|(p, l)| Note::new(p, l)).collect();
        notes.push(END_NOTE);
        Song {
            notes,
            ..Song::default()
        }
    })
}

fn any_song() -> impl Strategy<Value = Song> {
    prop::collection::vec(body_note(), 0..128).prop_map(|mut notes| {
        notes.push(END_NOTE);
        Song {
            notes,
            ..Song::default()
        }
    })
}

proptest! {
    /// Replaying the index sequence rebuilds the song.
    #[test]
    fn table_round_trips(song in any_song()) {
        let table = DedupTable::build(&song);
        prop_assert_eq!(table.indices.len(), song.notes.len());
        prop_assert_eq!(table.replay(), Some(song.notes));
    }

    /// The table holds each distinct note exactly once.
    #[test]
    fn table_is_minimal(song in repetitive_song()) {
        let table = DedupTable::build(&song);
        let distinct: HashSet<Note> = song.notes.iter().copied().collect();
        prop_assert_eq!(table.regular.len(), distinct.len());
        let unique: HashSet<Note> = table.regular.iter().copied().collect();
        prop_assert_eq!(unique.len(), table.regular.len());
        prop_assert_eq!(table.regular[0], END_NOTE);
        prop_assert_eq!(table.indices.last(), Some(&0));
    }

    /// Packed keys never collide for distinct notes.
    #[test]
    fn keys_are_injective(a in body_note(), b in body_note()) {
        prop_assert_eq!(a == b, DedupTable::key(&a) == DedupTable::key(&b));
    }

    /// Every accepted duration string decodes to the fraction of its canonical spelling.
    #[test]
    fn codec_decode_matches_canonical(s in "(/(1|2|4|8|16|32)?|1|2|4|8|16)?") {
        let code = encode(&s).unwrap();
        let canonical = encode(notation(code).unwrap()).unwrap();
        prop_assert_eq!(decode(code).unwrap(), decode(canonical).unwrap());
    }

    /// The codec never panics on arbitrary duration-like strings.
    #[test]
    fn codec_total(s in "[/0-9]{0,8}") {
        if let Ok(code) = encode(&s) {
            prop_assert!(code <= MAX_CODE);
        }
    }

    /// Translation is a pure function of its input.
    #[test]
    fn translation_is_deterministic(body in "[A-Ga-gzx^=_',/0-9 |]{0,80}") {
        let source = format!("X:1\nK:C\n{}\n", body);
        let first = translate(&source);
        let second = translate(&source);
        prop_assert_eq!(first, second);
    }

    /// Any body line yields a terminated song that survives the table.
    #[test]
    fn translated_songs_are_terminated(body in "[A-Ga-gz^_',/248 ]{0,80}") {
        let source = format!("K:C\n{}\n", body);
        let song = translate(&source).unwrap().song;
        prop_assert!(song.is_terminated());
        let table = DedupTable::build(&song);
        prop_assert_eq!(table.replay(), Some(song.notes));
    }
}

#[test]
fn codec_inverse_law_for_every_code() {
    for code in 0..=MAX_CODE {
        assert_eq!(encode(notation(code).unwrap()), Ok(code));
    }
}
