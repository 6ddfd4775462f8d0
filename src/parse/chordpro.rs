//! ChordPro import.
//!
//! Converts a ChordPro document (`{title: ...}` directives, inline `[C]` chords)
//! into the plain two-line layout the sheet parser understands: a chord line
//! aligned above its lyric line, with verse and chorus blocks turned into
//! `N Verse:` and `Chorus:` headers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::util::unicode::char_len;

static DIRECTIVE_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\{.*\}\s*$").expect("failed to compile DIRECTIVE_LINE_REGEX"));

static DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{\s*([^:}]+)\s*:?\s*([^}]*)\}$").expect("failed to compile DIRECTIVE_REGEX")
});

static EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[^.]+$").expect("failed to compile EXTENSION_REGEX"));

const VERSE_START: &[&str] = &["start_of_verse", "sov", "verse"];
const VERSE_END: &[&str] = &["end_of_verse", "eov"];
const CHORUS_START: &[&str] = &["start_of_chorus", "soc", "chorus", "refrain"];
const CHORUS_END: &[&str] = &["end_of_chorus", "eoc"];

/// Result of a ChordPro import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedChordPro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_note: Option<String>,
    /// Sheet text in the plain chord-over-lyric format
    pub content: String,
}

#[derive(Debug)]
struct Directive {
    name: String,
    value: String,
}

fn parse_directive(line: &str) -> Option<Directive> {
    let caps = DIRECTIVE_REGEX.captures(line.trim())?;
    Some(Directive {
        name: caps[1].trim().to_lowercase(),
        value: caps[2].trim().to_string(),
    })
}

#[derive(Debug)]
enum InlineToken {
    Chord(String),
    Lyric(String),
}

/// Split `[C]Amazing [G]grace` into a chord line and a lyric line.
/// Two chords with no lyric between them are kept at least one column apart.
pub fn render_chord_aligned_line(inline: &str) -> (String, String) {
    let chars: Vec<char> = inline.chars().collect();
    let mut tokens: Vec<InlineToken> = Vec::new();
    let mut prev_was_chord = false;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '[' {
            let Some(end) = chars[i + 1..].iter().position(|&c| c == ']').map(|p| p + i + 1) else {
                // Unmatched `[` is lyric text
                tokens.push(InlineToken::Lyric("[".to_string()));
                prev_was_chord = false;
                i += 1;
                continue;
            };
            let chord: String = chars[i + 1..end].iter().collect();
            let chord = chord.trim();
            if prev_was_chord {
                tokens.push(InlineToken::Lyric("  ".to_string()));
            }
            if chord.is_empty() {
                prev_was_chord = false;
            } else {
                tokens.push(InlineToken::Chord(chord.to_string()));
                prev_was_chord = true;
            }
            i = end + 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i] != '[' {
            i += 1;
        }
        tokens.push(InlineToken::Lyric(chars[start..i].iter().collect()));
        prev_was_chord = false;
    }

    let mut lyric = String::new();
    let mut chord_line = String::new();
    for token in tokens {
        match token {
            InlineToken::Lyric(text) => lyric.push_str(&text),
            InlineToken::Chord(chord) => {
                let chord_len = char_len(&chord_line);
                let lyric_len = char_len(&lyric);
                // A chord must start after the previous chord ends
                if chord_len > 0 && chord_len >= lyric_len {
                    lyric.push_str(&" ".repeat(chord_len - lyric_len + 1));
                }
                let lyric_len = char_len(&lyric);
                if chord_len < lyric_len {
                    chord_line.push_str(&" ".repeat(lyric_len - chord_len));
                }
                chord_line.push_str(&chord);
            }
        }
    }

    (chord_line, lyric.trim_end().to_string())
}

/// Convert a ChordPro document. `filename` supplies the song name when the
/// document has no `{title}`.
pub fn parse_chord_pro(raw: &str, filename: Option<&str>) -> ParsedChordPro {
    let mut sanitized = raw.replace('|', " ");
    while sanitized.contains(" / ") {
        sanitized = sanitized.replace(" / ", " ");
    }
    let sanitized = sanitized.replace("\r\n", "\n");

    let mut name: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut root_note: Option<String> = None;
    let mut out: Vec<String> = Vec::new();
    let mut verse_count = 0;

    for line in sanitized.split('\n') {
        if DIRECTIVE_LINE_REGEX.is_match(line) {
            let Some(Directive { name: key, value }) = parse_directive(line) else {
                continue;
            };
            match key.as_str() {
                "title" | "t" => {
                    name.get_or_insert(value);
                }
                "subtitle" | "artist" | "composer" => {
                    artist.get_or_insert(value);
                }
                "key" => root_note = Some(value).filter(|v| !v.is_empty()),
                k if VERSE_START.contains(&k) => {
                    verse_count += 1;
                    out.push(format!("{verse_count} Verse:"));
                }
                k if CHORUS_START.contains(&k) => out.push("Chorus:".to_string()),
                k if VERSE_END.contains(&k) || CHORUS_END.contains(&k) => {}
                other => log::trace!("ignoring ChordPro directive {other:?}"),
            }
            continue;
        }

        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }

        if line.contains('[') && line.contains(']') {
            let (chords, lyric) = render_chord_aligned_line(line);
            if !chords.trim().is_empty() {
                out.push(chords);
            }
            out.push(lyric);
        } else {
            out.push(line.to_string());
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| filename.and_then(name_from_filename));

    ParsedChordPro {
        name,
        artist,
        root_note,
        content: out.join("\n"),
    }
}

fn name_from_filename(filename: &str) -> Option<String> {
    let only = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let base = EXTENSION_REGEX.replace(only, "");
    (!base.is_empty()).then(|| base.into_owned())
}
