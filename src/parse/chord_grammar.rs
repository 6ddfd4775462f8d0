use once_cell::sync::Lazy;
use regex::Regex;

/// Chord-quality suffixes accepted after a root, in any order and any number
pub const CHORD_MODIFIERS: &[&str] = &[
    "2", "4", "5", "6", "7", "9", "11", "13", "+", "+2", "+4", "+5", "+6", "+7", "+9", "+11",
    "+13", "6/9", "7-5", "7-9", "7#5", "#5", "7#9", "#9", "7+3", "7+5", "7+9", "7b5", "7b9",
    "7sus2", "7sus4", "sus", "sus2", "sus4", "add2", "add4", "add6", "add9", "add11", "aug",
    "dim", "dim7", "m", "m/maj7", "m6", "m7", "m7b5", "m7add11", "m9", "m11", "m13", "maj",
    "maj7", "maj9", "maj11", "maj13", "mb5", "b5", "-5",
];

/// Bare symbols that may share a chord line with chords
pub const NOTATION_SYMBOLS: &[&str] = &["|", "/", "-", "x", "NC", "•", "*"];

const ROOT_PATTERN: &str = "[A-H][b#]?";

fn modifiers_pattern() -> String {
    let mut mods: Vec<&str> = CHORD_MODIFIERS.to_vec();
    mods.sort_by_key(|m| std::cmp::Reverse(m.len()));
    let alternation: Vec<String> = mods.iter().map(|m| regex::escape(m)).collect();
    format!("(?:{})*", alternation.join("|"))
}

static CHORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    let mods = modifiers_pattern();
    Regex::new(&format!(
        "^{ROOT_PATTERN}{mods}(?:/{ROOT_PATTERN}{mods})*$"
    ))
    .expect("failed to compile CHORD_REGEX")
});

static CHORD_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    let mods = modifiers_pattern();
    Regex::new(&format!("^{mods}(?:/{ROOT_PATTERN}{mods})*$"))
        .expect("failed to compile CHORD_SUFFIX_REGEX")
});

/// Whether `token` is a chord symbol: root, modifiers, then any `/bass` groups
pub fn is_chord(token: &str) -> bool {
    CHORD_REGEX.is_match(token)
}

/// Whether `suffix` could follow a root (`m7`, `sus4/F#`, or nothing)
pub fn is_chord_suffix(suffix: &str) -> bool {
    CHORD_SUFFIX_REGEX.is_match(suffix)
}

/// Bar lines (`|`, `||`, `|:`, `:|`) and the fixed notation symbols
pub fn is_notation_symbol(token: &str) -> bool {
    if NOTATION_SYMBOLS.contains(&token) {
        return true;
    }
    token.contains('|') && token.chars().all(|c| c == '|' || c == ':')
}

/// Split a chord at the slashes that introduce a bass note. A slash inside a
/// quality such as `6/9` or `m/maj7` is not a split point.
pub fn split_slash_parts(chord: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in chord.char_indices() {
        if c == '/' && chord[i + 1..].starts_with(|n: char| ('A'..='H').contains(&n)) {
            parts.push(&chord[start..i]);
            start = i + 1;
        }
    }
    parts.push(&chord[start..]);
    parts
}
