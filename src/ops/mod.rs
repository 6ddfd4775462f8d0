pub mod fill;
pub mod key_detect;
pub mod transpose;

pub use fill::{capture_templates, fill_missing_chords, fill_missing_chords_with};
pub use key_detect::original_key;
pub use transpose::{
    TransposeError, Transposition, get_new_key, transpose_chord, transpose_chord_token,
    transpose_lines, transpose_sheet,
};
