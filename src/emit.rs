//! # Output Emitters
//!
//! Serialize a [`DedupTable`] for the playback target.
//!
//! - [`c_header`] - a C header with a `note_lookup` table and a `song` index array
//! - [`yaml`] - a YAML document with tempo, headers, table and indices

use serde::Serialize;

use crate::error::TuneError;
use crate::note::{Headers, Note, Song};
use crate::table::DedupTable;

/// Render the table as a C header.
///
/// ```
/// use abcpack::{emit, translate, DedupTable};
///
/// let song = translate("K:C\nC C\n").unwrap().song;
/// let header = emit::c_header(&DedupTable::build(&song));
/// assert!(header.contains("{ .pitch = -127, .length =  0 },"));
/// assert!(header.contains("{ .pitch =    0, .length =  5 }\n"));
/// assert!(header.contains("\t1,\n\t1,\n\t0\n"));
/// ```
pub fn c_header(table: &DedupTable) -> String {
    let mut out = String::new();

    out.push_str("#ifndef ABCPACK_SONG\n");
    out.push_str("#define ABCPACK_SONG\n\n");
    out.push_str("// generated by abcpack\n\n");
    out.push_str("#include <note.h>\n\n");

    out.push_str("struct Note note_lookup[] = {");
    for (i, note) in table.regular.iter().enumerate() {
        let separator = if i + 1 < table.regular.len() { "," } else { "" };
        out.push_str(&format!(
            "\n\t{{ .pitch = {:>4}, .length = {:>2} }}{}",
            note.pitch, note.length, separator
        ));
    }
    out.push_str("\n};\n\n");

    out.push_str("short song[] = {\n");
    let entries: Vec<String> = table.indices.iter().map(|i| format!("\t{}", i)).collect();
    out.push_str(&entries.join(",\n"));
    out.push_str("\n};\n\n");

    out.push_str("#endif\n");
    out
}

#[derive(Serialize)]
struct YamlDocument<'a> {
    tempo: u16,
    headers: &'a Headers,
    regular: &'a [Note],
    indices: &'a [usize],
}

/// Render the song's tempo and headers along with the table as YAML.
pub fn yaml(song: &Song, table: &DedupTable) -> Result<String, TuneError> {
    let document = YamlDocument {
        tempo: song.tempo,
        headers: &song.headers,
        regular: &table.regular,
        indices: &table.indices,
    };
    serde_yaml::to_string(&document).map_err(|e| TuneError::EmitError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::END_NOTE;

    fn table_for(notes: &[Note]) -> (Song, DedupTable) {
        let song = Song {
            notes: notes.to_vec(),
            ..Song::default()
        };
        let table = DedupTable::build(&song);
        (song, table)
    }

    #[test]
    fn test_c_header_layout() {
        let (_, table) = table_for(&[Note::new(25, 7), Note::rest(4), END_NOTE]);
        let header = c_header(&table);
        let expected = "\
#ifndef ABCPACK_SONG
#define ABCPACK_SONG

// generated by abcpack

#include <note.h>

struct Note note_lookup[] = {
\t{ .pitch = -127, .length =  0 },
\t{ .pitch =   25, .length =  7 },
\t{ .pitch =  127, .length =  4 }
};

short song[] = {
\t1,
\t2,
\t0
};

#endif
";
        assert_eq!(header, expected);
    }

    #[test]
    fn test_yaml_round_trips_table() {
        let (mut song, table) = table_for(&[Note::new(0, 6), Note::new(0, 6), END_NOTE]);
        song.tempo = 120;
        song.headers.insert('T', vec!["Two Cs".to_string()]);

        let text = yaml(&song, &table).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();

        assert_eq!(value["tempo"].as_u64(), Some(120));
        assert_eq!(value["headers"]["T"][0].as_str(), Some("Two Cs"));
        assert_eq!(value["indices"].as_sequence().map(Vec::len), Some(3));
        let regular: Vec<Note> = serde_yaml::from_value(value["regular"].clone()).unwrap();
        assert_eq!(regular, table.regular);
    }
}
