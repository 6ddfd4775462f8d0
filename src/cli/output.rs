use serde::Serialize;

use crate::model::{AccidentalType, Key, Line, SectionType};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct LineJson<'a> {
    /// 1-based line number in the source
    pub number: usize,
    #[serde(flatten)]
    pub line: &'a Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionType>,
}

#[derive(Serialize)]
pub struct KeyJson {
    pub name: &'static str,
    pub value: u8,
    pub accidental: AccidentalType,
    /// Whether this is the spelling used when stepping up or down
    pub conventional: bool,
}

#[derive(Serialize)]
pub struct DetectedKeyJson {
    /// Root of the first chord, as written
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyJson>,
}

#[derive(Serialize)]
pub struct TransposeJson {
    pub from: String,
    pub to: String,
    pub delta: i32,
    pub content: String,
}

#[derive(Serialize)]
pub struct RenderJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub hide_chords: bool,
    pub content: String,
}

#[derive(Serialize)]
pub struct ContentJson {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<&Key> for KeyJson {
    fn from(key: &Key) -> Self {
        KeyJson {
            name: key.name,
            value: key.value,
            accidental: key.accidental,
            conventional: crate::model::ACTUAL_KEYS.contains(&key.name),
        }
    }
}
