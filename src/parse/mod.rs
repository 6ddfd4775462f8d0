pub mod anchors;
pub mod chord_grammar;
pub mod chordpro;
pub mod sheet_parser;
pub mod sheet_serializer;

pub use chord_grammar::{is_chord, is_notation_symbol};
pub use chordpro::{ParsedChordPro, parse_chord_pro};
pub use sheet_parser::{
    header_type, is_annotation, is_chord_line, is_header_line, parse_chord_line_with_spaces, parse_song_text,
    parse_song_text_with,
};
pub use sheet_serializer::{render_chord_line, serialize_lines};
