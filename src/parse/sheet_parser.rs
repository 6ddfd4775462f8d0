use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ChordToken, ClassifyConfig, Line, SectionType};
use crate::parse::anchors::{is_section_letter, matching_anchors, section_type};
use crate::parse::chord_grammar::{is_chord, is_notation_symbol};
use crate::util::unicode::{char_len, normalize_text};

static PARENTHETICAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)").expect("failed to compile PARENTHETICAL_REGEX"));

/// Parse a song sheet into classified lines, one per `\n`-separated segment.
pub fn parse_song_text(raw: &str) -> Vec<Line> {
    parse_song_text_with(raw, &ClassifyConfig::default())
}

/// Parse with an explicit classifier configuration
pub fn parse_song_text_with(raw: &str, config: &ClassifyConfig) -> Vec<Line> {
    normalize_text(raw)
        .split('\n')
        .map(|line| classify_line(line, config))
        .collect()
}

/// Classify a single, already normalized line. Header detection runs before
/// chord detection, so `A:` is a header.
pub fn classify_line(line: &str, config: &ClassifyConfig) -> Line {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Line::Empty
    } else if is_header_line_with(line, config.max_header_len) {
        Line::Header {
            content: trimmed.to_string(),
        }
    } else if is_chord_line(line) {
        Line::Chords {
            tokens: parse_chord_line_with_spaces(line),
        }
    } else {
        Line::Text {
            content: line.to_string(),
        }
    }
}

/// Checks if a line is a section header
pub fn is_header_line(line: &str) -> bool {
    is_header_line_with(line, ClassifyConfig::default().max_header_len)
}

pub fn is_header_line_with(line: &str, max_len: usize) -> bool {
    let text = line.trim().to_lowercase();
    if char_len(&text) > max_len {
        return false;
    }
    is_section_letter(&text) || matching_anchors(&text).next().is_some()
}

/// The section type a header names
pub fn header_type(header: &str) -> SectionType {
    section_type(&header.trim().to_lowercase())
}

/// Blank out `(...)` groups, keeping every column where it was
pub fn strip_parentheticals(line: &str) -> String {
    let mut text = line.to_string();
    // Innermost groups first, so nested parentheses disappear too
    while PARENTHETICAL_REGEX.is_match(&text) {
        text = PARENTHETICAL_REGEX
            .replace_all(&text, |caps: &regex::Captures| " ".repeat(char_len(&caps[0])))
            .into_owned();
    }
    text
}

/// Checks if a line holds only chords and notation symbols
pub fn is_chord_line(line: &str) -> bool {
    let stripped = strip_parentheticals(line);
    let mut tokens = stripped.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|t| is_chord(t) || is_notation_symbol(t))
}

/// Tokens that carry no pitch: bar lines, `NC` and the like, and whole
/// parentheticals such as `(2x)`. A parenthesised chord like `(Am)` is not one.
pub fn is_annotation(token: &str) -> bool {
    let inner = token.trim_start_matches('(').trim_end_matches(')');
    is_notation_symbol(inner)
        || (strip_parentheticals(token).trim().is_empty() && !is_chord(inner))
}

/// Split a chord line into tokens, keeping the spaces before and after each one.
/// Tokens break on the same whitespace `is_chord_line` splits on; a tab counts
/// as one column.
pub fn parse_chord_line_with_spaces(line: &str) -> Vec<ChordToken> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        let mut leading = 0;
        while chars.next_if(|c| c.is_whitespace()).is_some() {
            leading += 1;
        }
        if chars.peek().is_none() {
            break;
        }

        let mut chord = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            chord.push(c);
        }

        let mut trailing = 0;
        while chars.next_if(|c| c.is_whitespace()).is_some() {
            trailing += 1;
        }

        tokens.push(ChordToken::new(chord, leading, trailing));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chords(tokens: &[(&str, usize, usize)]) -> Line {
        Line::Chords {
            tokens: tokens
                .iter()
                .map(|(c, l, t)| ChordToken::new(*c, *l, *t))
                .collect(),
        }
    }

    #[test]
    fn test_parse_song_structure() {
        let source = "\
Verse 1:
C       G        Am       F
Amazing grace, how sweet the sound

Chorus:
  F   C
  Oh, grace";

        let lines = parse_song_text(source);
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            Line::Header {
                content: "Verse 1:".to_string()
            }
        );
        assert_eq!(
            lines[1],
            chords(&[("C", 0, 7), ("G", 0, 8), ("Am", 0, 7), ("F", 0, 0)])
        );
        assert_eq!(
            lines[2],
            Line::Text {
                content: "Amazing grace, how sweet the sound".to_string()
            }
        );
        assert_eq!(lines[3], Line::Empty);
        assert_eq!(lines[5], chords(&[("F", 2, 3), ("C", 0, 0)]));
        assert_eq!(
            lines[6],
            Line::Text {
                content: "  Oh, grace".to_string()
            }
        );
    }

    #[test]
    fn test_one_line_per_segment() {
        for (source, count) in [
            ("", 1),
            ("\n", 2),
            ("   ", 1),
            ("a\nb\n", 3),
            ("a\r\nb\rc", 3),
            ("((((\n))))\n|||", 3),
        ] {
            assert_eq!(parse_song_text(source).len(), count, "{source:?}");
        }
        assert_eq!(parse_song_text("   \t "), vec![Line::Empty]);
    }

    #[test]
    fn test_header_takes_precedence_over_chords() {
        assert_eq!(
            parse_song_text("A:"),
            vec![Line::Header {
                content: "A:".to_string()
            }]
        );
        assert!(is_chord_line("A"));
    }

    #[test]
    fn test_header_detection() {
        assert!(is_header_line("  Chorus:  "));
        assert!(is_header_line("ПРИПЕВ:"));
        assert!(is_header_line("2| second verse"));
        assert!(!is_header_line("Chorus"));
        assert!(!is_header_line(
            "Verse: this line is far too long to be a header of any song section"
        ));
    }

    #[test]
    fn test_header_length_is_configurable() {
        let config = ClassifyConfig { max_header_len: 5 };
        let lines = parse_song_text_with("Chorus:", &config);
        assert!(matches!(lines[0], Line::Text { .. }));
    }

    #[test]
    fn test_chord_line_detection() {
        assert!(is_chord_line("C7 G/B Am7 (2x) F"));
        assert!(is_chord_line("| Am  F | C  G |"));
        assert!(is_chord_line("  D/F#   NC   x  •"));
        assert!(!is_chord_line("Hello world"));
        assert!(!is_chord_line("C G Am and then F"));
        assert!(!is_chord_line("(2x)"));
    }

    #[test]
    fn test_chord_line_tokens_keep_annotations() {
        let lines = parse_song_text("C7 G/B Am7 (2x) F");
        assert_eq!(
            lines[0],
            chords(&[
                ("C7", 0, 1),
                ("G/B", 0, 1),
                ("Am7", 0, 1),
                ("(2x)", 0, 1),
                ("F", 0, 0)
            ])
        );
    }

    #[test]
    fn test_tab_separated_chord_line() {
        let lines = parse_song_text("C\tG\t\tAm");
        assert_eq!(lines[0], chords(&[("C", 0, 1), ("G", 0, 2), ("Am", 0, 0)]));
    }

    #[test]
    fn test_annotations() {
        for token in ["|", "||:", "NC", "x", "(2x)", "(x2)", "((x) 2)"] {
            assert!(is_annotation(token), "{token}");
        }
        for token in ["C", "(Am)", "((Am))", "C(add9)", "D/F#"] {
            assert!(!is_annotation(token), "{token}");
        }
    }

    #[test]
    fn test_strip_parentheticals_keeps_columns() {
        assert_eq!(strip_parentheticals("C (2x) G"), "C      G");
        assert_eq!(strip_parentheticals("Am ((x) 2) F"), "Am         F");
        assert_eq!(strip_parentheticals("C (open"), "C (open");
    }

    #[test]
    fn test_unicode_spaces_normalized() {
        let lines = parse_song_text("C\u{00A0}\u{00A0}G\r\nla la");
        assert_eq!(lines[0], chords(&[("C", 0, 2), ("G", 0, 0)]));
        assert_eq!(
            lines[1],
            Line::Text {
                content: "la la".to_string()
            }
        );
    }

    #[test]
    fn test_header_type() {
        assert_eq!(header_type("Verse 1:"), SectionType::Verse);
        assert_eq!(header_type("CHORUS:"), SectionType::Chorus);
        assert_eq!(header_type("Bridge:"), SectionType::Other);
    }
}
