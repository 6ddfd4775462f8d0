use crate::model::key::{
    AccidentalType, ENHARMONIC_VALUES, KEYS, Key, KeyNotFound, chord_root, get_delta, key_by_name,
};
use crate::model::{ChordToken, ClassifyConfig, Line, RenderConfig, TransposeConfig};
use crate::parse::chord_grammar::split_slash_parts;
use crate::parse::sheet_parser::{is_annotation, parse_song_text_with};
use crate::parse::sheet_serializer::serialize_lines;
use crate::util::unicode::char_len;

/// Error type for transposition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransposeError {
    #[error("key not found: {root} (in chord {chord})")]
    UnknownRoot { root: String, chord: String },
    #[error("key not found for pitch class {0}")]
    UnresolvedPitch(u8),
    #[error(transparent)]
    UnknownKey(#[from] KeyNotFound),
}

/// A shift by `delta` semitones into `target`, whose accidental style breaks
/// enharmonic ties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transposition {
    pub delta: i32,
    pub target: &'static Key,
}

impl Transposition {
    pub fn new(delta: i32, target: &'static Key) -> Self {
        Transposition { delta, target }
    }

    /// Shift from key `from` to key `to`, both given by name
    pub fn between(from: &str, to: &str) -> Result<Self, KeyNotFound> {
        let from = key_by_name(from)?;
        let target = key_by_name(to)?;
        Ok(Transposition {
            delta: get_delta(from, target),
            target,
        })
    }
}

/// Pick the spelling of pitch class `value`. For an enharmonic pitch class the
/// chord's own accidental wins, then the target key's, then natural, sharp, flat.
fn resolve_spelling(
    value: u8,
    own: AccidentalType,
    target: AccidentalType,
) -> Option<&'static Key> {
    if !ENHARMONIC_VALUES.contains(&value) {
        return KEYS.iter().find(|k| k.value == value);
    }
    let spelled = |accidental: AccidentalType| {
        KEYS.iter()
            .find(|k| k.value == value && k.accidental == accidental)
    };
    spelled(own)
        .or_else(|| spelled(target))
        .or_else(|| spelled(AccidentalType::Natural))
        .or_else(|| spelled(AccidentalType::Sharp))
        .or_else(|| spelled(AccidentalType::Flat))
}

/// The key a root lands on after shifting by `delta` semitones
pub fn get_new_key(old_root: &str, delta: i32, target: &Key) -> Result<&'static Key, TransposeError> {
    let old = key_by_name(old_root)?;
    let value = (i32::from(old.value) + delta).rem_euclid(12) as u8;
    let own = AccidentalType::of_root(old_root);
    resolve_spelling(value, own, target.accidental).ok_or(TransposeError::UnresolvedPitch(value))
}

/// Transpose one chord symbol, slash basses included
pub fn transpose_chord(chord: &str, delta: i32, target: &Key) -> Result<String, TransposeError> {
    transpose_chord_with(chord, delta, target, &TransposeConfig::default())
}

pub fn transpose_chord_with(
    chord: &str,
    delta: i32,
    target: &Key,
    config: &TransposeConfig,
) -> Result<String, TransposeError> {
    if delta == 0 || is_annotation(chord) {
        return Ok(chord.to_string());
    }
    let (open, inner, close) = split_parens(chord);

    let mut parts = Vec::new();
    for part in split_slash_parts(inner) {
        let root = chord_root(part);
        let new_key = get_new_key(root, delta, target).map_err(|e| match e {
            TransposeError::UnknownKey(_) => TransposeError::UnknownRoot {
                root: root.to_string(),
                chord: chord.to_string(),
            },
            other => other,
        })?;
        let spelled = if new_key.name == "H" {
            config.b_natural.spelling(root)
        } else {
            new_key.name
        };
        parts.push(format!("{spelled}{}", &part[root.len()..]));
    }

    Ok(format!("{open}{}{close}", parts.join("/")))
}

/// `(Am)` is transposed inside its parentheses; `C(add9)` keeps its suffix
fn split_parens(chord: &str) -> (&str, &str, &str) {
    if !chord.starts_with('(') {
        return ("", chord, "");
    }
    let start = chord.len() - chord.trim_start_matches('(').len();
    let inner = chord[start..].trim_end_matches(')');
    let end = start + inner.len();
    (&chord[..start], inner, &chord[end..])
}

/// Transpose a token, giving back or taking spaces after it so the following
/// chords keep their columns. At least one space always remains.
pub fn transpose_chord_token(
    token: &ChordToken,
    delta: i32,
    target: &Key,
) -> Result<ChordToken, TransposeError> {
    transpose_chord_token_with(token, delta, target, &TransposeConfig::default())
}

pub fn transpose_chord_token_with(
    token: &ChordToken,
    delta: i32,
    target: &Key,
    config: &TransposeConfig,
) -> Result<ChordToken, TransposeError> {
    // Bar lines, `NC`, `(2x)` and the like keep their spacing too
    if delta == 0 || is_annotation(&token.chord) {
        return Ok(token.clone());
    }
    let chord = transpose_chord_with(&token.chord, delta, target, config)?;
    let diff = char_len(&token.chord) as isize - char_len(&chord) as isize;
    let trailing = (token.trailing as isize + diff).max(1) as usize;
    Ok(ChordToken {
        chord,
        leading: token.leading,
        trailing,
    })
}

/// Transpose every chord line of a parsed sheet
pub fn transpose_lines(
    lines: &[Line],
    transposition: Transposition,
    config: &TransposeConfig,
) -> Result<Vec<Line>, TransposeError> {
    let Transposition { delta, target } = transposition;
    lines
        .iter()
        .map(|line| match line {
            Line::Chords { tokens } => {
                let tokens = tokens
                    .iter()
                    .map(|t| transpose_chord_token_with(t, delta, target, config))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Line::Chords { tokens })
            }
            other => Ok(other.clone()),
        })
        .collect()
}

/// Transpose a whole sheet. Headers come back trimmed, lyrics verbatim and
/// blank lines empty.
pub fn transpose_sheet(
    raw: &str,
    transposition: Transposition,
    classify: &ClassifyConfig,
    config: &TransposeConfig,
) -> Result<String, TransposeError> {
    log::debug!(
        "transposing sheet by {} semitones into {}",
        transposition.delta,
        transposition.target
    );
    let lines = parse_song_text_with(raw, classify);
    let transposed = transpose_lines(&lines, transposition, config)?;
    Ok(serialize_lines(&transposed, &RenderConfig::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BNatural;
    use crate::parse::sheet_parser::{parse_chord_line_with_spaces, parse_song_text};

    fn key(name: &str) -> &'static Key {
        key_by_name(name).unwrap()
    }

    fn pitch_classes(chord: &str) -> Vec<u8> {
        split_slash_parts(chord)
            .into_iter()
            .map(|part| key(chord_root(part)).value)
            .collect()
    }

    #[test]
    fn test_zero_delta_is_identity() {
        for chord in ["F#", "Bb", "A#m7", "Cb", "H7", "(2x)"] {
            let token = ChordToken::new(chord, 3, 2);
            for target in ["C", "Gb", "F#"] {
                assert_eq!(transpose_chord_token(&token, 0, key(target)).unwrap(), token);
            }
        }
    }

    #[test]
    fn test_enharmonic_tie_break_uses_target_style() {
        assert_eq!(transpose_chord("C", 6, key("Eb")).unwrap(), "Gb");
        assert_eq!(transpose_chord("C", 6, key("D#")).unwrap(), "F#");
        // natural target key falls through to the sharp spelling
        assert_eq!(transpose_chord("C", 6, key("C")).unwrap(), "F#");
    }

    #[test]
    fn test_own_accidental_beats_target_style() {
        // Bb up a fourth lands on Eb even in a sharp key
        assert_eq!(transpose_chord("Bb", 5, key("E")).unwrap(), "Eb");
        assert_eq!(transpose_chord("F#", 2, key("Ab")).unwrap(), "G#");
    }

    #[test]
    fn test_unambiguous_pitch_ignores_preference() {
        assert_eq!(transpose_chord("Bb", 2, key("Gb")).unwrap(), "C");
        assert_eq!(transpose_chord("F#m", -2, key("Gb")).unwrap(), "Em");
    }

    #[test]
    fn test_negative_delta_wraps() {
        assert_eq!(transpose_chord("C", -4, key("Ab")).unwrap(), "Ab");
        assert_eq!(transpose_chord("A", -13, key("Ab")).unwrap(), "Ab");
    }

    #[test]
    fn test_suffix_and_slash_bass_preserved() {
        assert_eq!(transpose_chord("Am7/G", 2, key("D")).unwrap(), "Bm7/A");
        assert_eq!(transpose_chord("D/F#", 2, key("E")).unwrap(), "E/G#");
        assert_eq!(transpose_chord("C6/9", 2, key("D")).unwrap(), "D6/9");
        assert_eq!(transpose_chord("Cm/maj7/Eb", 2, key("D")).unwrap(), "Dm/maj7/F");
    }

    #[test]
    fn test_b_natural_spelling() {
        assert_eq!(transpose_chord("A", 2, key("D")).unwrap(), "B");
        assert_eq!(transpose_chord("G", 2, key("A")).unwrap(), "A");
        assert_eq!(transpose_chord("H7", 2, key("C#")).unwrap(), "C#7");
        assert_eq!(transpose_chord("Hm", 12, key("H")).unwrap(), "Hm");
        let config = TransposeConfig {
            b_natural: BNatural::H,
        };
        assert_eq!(transpose_chord_with("A", 2, key("D"), &config).unwrap(), "H");
        let config = TransposeConfig {
            b_natural: BNatural::B,
        };
        assert_eq!(transpose_chord_with("Hm", 12, key("H"), &config).unwrap(), "Bm");
    }

    #[test]
    fn test_notation_passes_through() {
        for symbol in ["|", "(2x)", "NC", "x", "•", "||:"] {
            assert_eq!(transpose_chord(symbol, 3, key("C")).unwrap(), symbol);
        }
        assert_eq!(transpose_chord("(Am)", 3, key("C")).unwrap(), "(Cm)");
    }

    #[test]
    fn test_notation_token_keeps_spacing() {
        let token = ChordToken::new("(2x)", 1, 0);
        assert_eq!(transpose_chord_token(&token, 5, key("F")).unwrap(), token);
        let token = ChordToken::new("(Am)", 0, 0);
        assert_eq!(
            transpose_chord_token(&token, 2, key("D")).unwrap(),
            ChordToken::new("(Bm)", 0, 1)
        );
    }

    #[test]
    fn test_parenthesised_quality_is_transposed() {
        assert_eq!(transpose_chord("C(add9)", 2, key("D")).unwrap(), "D(add9)");
        assert_eq!(transpose_chord("Am7(b5)/G", 2, key("D")).unwrap(), "Bm7(b5)/A");
        assert_eq!(
            transpose_sheet(
                "C(add9)   G",
                Transposition::new(2, key("D")),
                &ClassifyConfig::default(),
                &TransposeConfig::default(),
            )
            .unwrap(),
            "D(add9)   A "
        );
    }

    #[test]
    fn test_tab_separated_line_is_transposed() {
        let out = transpose_sheet(
            "C\tG\tAm",
            Transposition::new(2, key("D")),
            &ClassifyConfig::default(),
            &TransposeConfig::default(),
        )
        .unwrap();
        assert_eq!(out, "D A Bm ");
    }

    #[test]
    fn test_unknown_root_is_an_error() {
        assert_eq!(
            transpose_chord("Cb7", 2, key("C")),
            Err(TransposeError::UnknownRoot {
                root: "Cb".to_string(),
                chord: "Cb7".to_string()
            })
        );
        assert!(
            transpose_chord("Cb7", 2, key("C"))
                .unwrap_err()
                .to_string()
                .starts_with("key not found")
        );
    }

    #[test]
    fn test_spacing_follows_length_change() {
        let token = ChordToken::new("C", 0, 4);
        let up = transpose_chord_token(&token, 1, key("C#")).unwrap();
        assert_eq!(up, ChordToken::new("C#", 0, 3));

        let token = ChordToken::new("F#m", 2, 1);
        let down = transpose_chord_token(&token, -1, key("F")).unwrap();
        assert_eq!(down, ChordToken::new("Fm", 2, 2));

        let token = ChordToken::new("G", 0, 0);
        let longer = transpose_chord_token(&token, 1, key("Ab")).unwrap();
        assert_eq!(longer, ChordToken::new("Ab", 0, 1));
    }

    #[test]
    fn test_amazing_grace_up_a_tone() {
        let tokens = parse_chord_line_with_spaces("C       G        Am       F");
        let target = key("D");
        let transposed: Vec<ChordToken> = tokens
            .iter()
            .map(|t| transpose_chord_token(t, 2, target).unwrap())
            .collect();
        let chords: Vec<&str> = transposed.iter().map(|t| t.chord.as_str()).collect();
        assert_eq!(chords, vec!["D", "A", "Bm", "G"]);
        let trailing: Vec<usize> = transposed.iter().map(|t| t.trailing).collect();
        assert_eq!(trailing, vec![7, 8, 7, 1]);
    }

    #[test]
    fn test_transpose_then_back_keeps_pitch_classes() {
        let chords = ["C", "G/B", "Am7", "F#m", "Bb", "Ebmaj7", "D/F#", "Hm", "G#dim"];
        for (k1, k2) in [("C", "E"), ("G", "Eb"), ("A", "F#"), ("H", "Db")] {
            let there = Transposition::between(k1, k2).unwrap();
            let back = Transposition::between(k2, k1).unwrap();
            for chord in chords {
                let shifted = transpose_chord(chord, there.delta, there.target).unwrap();
                let returned = transpose_chord(&shifted, back.delta, back.target).unwrap();
                assert_eq!(pitch_classes(&returned), pitch_classes(chord), "{chord} via {k2}");
            }
        }
    }

    #[test]
    fn test_transpose_sheet() {
        let source = "\
  Verse 1:
C        G/B
Amazing grace
(2x)";
        let transposition = Transposition::between("C", "Eb").unwrap();
        let out = transpose_sheet(
            source,
            transposition,
            &ClassifyConfig::default(),
            &TransposeConfig::default(),
        )
        .unwrap();
        // the last chord keeps the one-space minimum after it
        assert_eq!(out, "Verse 1:\nEb       Bb/D \nAmazing grace\n(2x)");
    }

    #[test]
    fn test_transpose_lines_reports_first_failure() {
        let lines = parse_song_text("C  Fb  G");
        let err = transpose_lines(
            &lines,
            Transposition::new(2, key("D")),
            &TransposeConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TransposeError::UnknownRoot { .. }));
    }
}
