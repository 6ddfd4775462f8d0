use crate::model::Line;
use crate::model::key::chord_root;
use crate::parse::sheet_parser::is_annotation;

/// Guess the key a sheet is written in: the root of the first chord on the
/// first chord line that has one. Bar lines and other notation are skipped,
/// and `(Am)` counts as `Am`.
pub fn original_key(lines: &[Line]) -> Option<&str> {
    lines
        .iter()
        .filter_map(|line| match line {
            Line::Chords { tokens } => Some(tokens),
            _ => None,
        })
        .flatten()
        .map(|token| token.chord.as_str())
        .find(|chord| !is_annotation(chord))
        .map(|chord| chord_root(chord.trim_start_matches('(')))
}
