use serde::{Deserialize, Serialize};

use crate::parse::chord_grammar::is_chord_suffix;

/// How a root is spelled: plain letter, `#` or `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalType {
    Natural,
    Sharp,
    Flat,
}

impl AccidentalType {
    /// Infer the accidental style from a root's spelling (`F#` → Sharp, `Bb` → Flat)
    pub fn of_root(root: &str) -> AccidentalType {
        if root.ends_with('#') {
            AccidentalType::Sharp
        } else if root.ends_with('b') {
            AccidentalType::Flat
        } else {
            AccidentalType::Natural
        }
    }
}

impl std::fmt::Display for AccidentalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccidentalType::Natural => write!(f, "natural"),
            AccidentalType::Sharp => write!(f, "sharp"),
            AccidentalType::Flat => write!(f, "flat"),
        }
    }
}

/// A spelled pitch class. Enharmonic spellings share a `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    pub name: &'static str,
    /// Pitch class 0..=11, counted from Ab/G# = 0
    pub value: u8,
    pub accidental: AccidentalType,
}

const fn key(name: &'static str, value: u8, accidental: AccidentalType) -> Key {
    Key {
        name,
        value,
        accidental,
    }
}

/// Every spelling the transposer can produce. B natural uses the European `H`.
pub static KEYS: [Key; 17] = [
    key("Ab", 0, AccidentalType::Flat),
    key("A", 1, AccidentalType::Natural),
    key("A#", 2, AccidentalType::Sharp),
    key("Bb", 2, AccidentalType::Flat),
    key("H", 3, AccidentalType::Natural),
    key("C", 4, AccidentalType::Natural),
    key("C#", 5, AccidentalType::Sharp),
    key("Db", 5, AccidentalType::Flat),
    key("D", 6, AccidentalType::Natural),
    key("D#", 7, AccidentalType::Sharp),
    key("Eb", 7, AccidentalType::Flat),
    key("E", 8, AccidentalType::Natural),
    key("F", 9, AccidentalType::Natural),
    key("F#", 10, AccidentalType::Sharp),
    key("Gb", 10, AccidentalType::Flat),
    key("G", 11, AccidentalType::Natural),
    key("G#", 0, AccidentalType::Sharp),
];

/// Pitch classes that have both a sharp and a flat spelling
pub const ENHARMONIC_VALUES: [u8; 5] = [0, 2, 5, 7, 10];

/// Key names offered for selection, in chromatic order from C
pub const SELECTABLE_KEYS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "H",
];

/// One conventional spelling per pitch class, used when stepping up or down
pub const ACTUAL_KEYS: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "H",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("key not found: {0}")]
pub struct KeyNotFound(pub String);

impl Key {
    pub fn is_enharmonic(&self) -> bool {
        ENHARMONIC_VALUES.contains(&self.value)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// The root of a chord: first character, plus the second one when it is `b` or `#`.
/// Multi-character natural note names are not recognised.
pub fn chord_root(chord: &str) -> &str {
    let mut chars = chord.char_indices();
    if chars.next().is_none() {
        return "";
    }
    match chars.next() {
        Some((i, 'b' | '#')) => &chord[..i + 1],
        Some((i, _)) => &chord[..i],
        None => chord,
    }
}

/// Look up a key by name. Accepts `B` for `H` and tolerates a trailing chord
/// quality (`Am`, `F#m7`), so a chord symbol can name its own key.
pub fn key_by_name(name: &str) -> Result<&'static Key, KeyNotFound> {
    let name = name.trim();
    let root = chord_root(name);
    let rest = &name[root.len()..];
    if !rest.is_empty() && !is_chord_suffix(rest) {
        return Err(KeyNotFound(name.to_string()));
    }
    let root = if root == "B" { "H" } else { root };
    KEYS.iter()
        .find(|k| k.name == root)
        .ok_or_else(|| KeyNotFound(name.to_string()))
}

/// Signed semitone distance between two keys, not normalized
pub fn get_delta(from: &Key, to: &Key) -> i32 {
    i32::from(to.value) - i32::from(from.value)
}

/// The conventional key `steps` semitones away from `current`, wrapping around the octave
pub fn step_key(current: &'static Key, steps: i32) -> &'static Key {
    let value = (i32::from(current.value) + steps).rem_euclid(12) as u8;
    KEYS.iter()
        .find(|k| k.value == value && ACTUAL_KEYS.contains(&k.name))
        .unwrap_or(current)
}
