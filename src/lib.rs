//! Plain-text chord sheets: classify lines, transpose chords and fill
//! missing chord lines from an annotated verse or chorus.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
pub mod util;

pub use model::{ChordToken, Key, KeyNotFound, Line, SectionType, SheetConfig};
pub use ops::{TransposeError, fill_missing_chords, original_key, transpose_chord_token};
pub use parse::{parse_song_text, render_chord_line};
