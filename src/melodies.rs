//! Fixed demonstration melodies, in quarter notes (length code 3).

use crate::note::{Note, END_NOTE};

const QUARTER: u8 = 3;

pub const NOTE_C: Note = Note::new(0, QUARTER);
pub const NOTE_D: Note = Note::new(2, QUARTER);
pub const NOTE_E: Note = Note::new(4, QUARTER);
pub const NOTE_F: Note = Note::new(5, QUARTER);
pub const NOTE_G: Note = Note::new(7, QUARTER);
pub const NOTE_A: Note = Note::new(9, QUARTER);
pub const NOTE_B: Note = Note::new(11, QUARTER);
pub const NOTE_C_HIGH: Note = Note::new(12, QUARTER);
pub const REST_QUARTER: Note = Note::rest(QUARTER);
pub const REST_HALF: Note = Note::rest(4);

/// C major scale, one octave up from middle C.
pub static SCALE: &[Note] = &[
    NOTE_C,
    NOTE_D,
    NOTE_E,
    NOTE_F,
    NOTE_G,
    NOTE_A,
    NOTE_B,
    NOTE_C_HIGH,
    END_NOTE,
];

/// "Mary Had a Little Lamb".
pub static MARY: &[Note] = &[
    NOTE_E, NOTE_D, NOTE_C, NOTE_D, NOTE_E, NOTE_E, NOTE_E, REST_QUARTER,
    NOTE_D, NOTE_D, NOTE_D, REST_QUARTER, NOTE_E, NOTE_G, NOTE_G, REST_QUARTER,
    NOTE_E, NOTE_D, NOTE_C, NOTE_D, NOTE_E, NOTE_E, NOTE_E, NOTE_E,
    NOTE_D, NOTE_D, NOTE_E, NOTE_D, NOTE_C, END_NOTE,
];

/// The same tune as [`MARY`], written in the notation.
pub const MARY_ABC: &str = "\
X:1
T:Mary Had a Little Lamb
M:4/4
L:1/4
K:C
E/4D/4C/4D/4 | E/4E/4E/4z/4 | D/4D/4D/4z/4 | E/4G/4G/4z/4 |
E/4D/4C/4D/4 | E/4E/4E/4E/4 | D/4D/4E/4D/4 | C/4 |
";
