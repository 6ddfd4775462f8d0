use crate::model::{ChordToken, Line, RenderConfig};

/// Render chord tokens back into a chord line
pub fn render_chord_line(tokens: &[ChordToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.extend(std::iter::repeat_n(' ', token.leading));
        out.push_str(&token.chord);
        out.extend(std::iter::repeat_n(' ', token.trailing));
    }
    out
}

/// Render a single line. Returns `None` for chord lines when chords are hidden.
pub fn serialize_line(line: &Line, config: &RenderConfig) -> Option<String> {
    match line {
        Line::Header { content } | Line::Text { content } => Some(content.clone()),
        Line::Chords { .. } if config.hide_chords => None,
        Line::Chords { tokens } => Some(render_chord_line(tokens)),
        Line::Empty => Some(String::new()),
    }
}

/// Serialize a parsed sheet back to text.
/// Unless blank lines carried whitespace or headers were indented, this
/// reproduces the parsed text exactly.
pub fn serialize_lines(lines: &[Line], config: &RenderConfig) -> String {
    lines
        .iter()
        .filter_map(|line| serialize_line(line, config))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::sheet_parser::{parse_chord_line_with_spaces, parse_song_text};

    #[test]
    fn test_render_chord_line() {
        let tokens = vec![
            ChordToken::new("Am", 2, 3),
            ChordToken::new("G/B", 0, 1),
            ChordToken::new("C", 0, 0),
        ];
        assert_eq!(render_chord_line(&tokens), "  Am   G/B C");
        assert_eq!(render_chord_line(&[]), "");
    }

    #[test]
    fn test_render_inverts_token_parse() {
        for line in ["C       G        Am       F", "   D  A/C#  ", "|: Em  C :|"] {
            assert_eq!(render_chord_line(&parse_chord_line_with_spaces(line)), line);
        }
    }

    #[test]
    fn test_round_trip_sheet() {
        let source = "\
Intro:
G  D  Em  C

Verse 1:
G           D
Here I am to worship";

        let lines = parse_song_text(source);
        assert_eq!(serialize_lines(&lines, &RenderConfig::default()), source);
    }

    #[test]
    fn test_hide_chords() {
        let source = "Chorus:\nC   G\nLa la la\n\nF\nLa";
        let lines = parse_song_text(source);
        let config = RenderConfig { hide_chords: true };
        assert_eq!(serialize_lines(&lines, &config), "Chorus:\nLa la la\n\nLa");
    }

    #[test]
    fn test_headers_are_trimmed_and_blank_lines_emptied() {
        let lines = parse_song_text("  Chorus:  \n   \nla");
        assert_eq!(
            serialize_lines(&lines, &RenderConfig::default()),
            "Chorus:\n\nla"
        );
    }
}
