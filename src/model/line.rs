use serde::{Deserialize, Serialize};

/// One chord (or notation symbol) on a chord line, with the spacing around it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordToken {
    /// Chord symbol as written, e.g. `Bm7` or `G/B`
    pub chord: String,
    /// Spaces before the chord
    pub leading: usize,
    /// Spaces after the chord, up to the next one
    pub trailing: usize,
}

impl ChordToken {
    pub fn new(chord: impl Into<String>, leading: usize, trailing: usize) -> Self {
        ChordToken {
            chord: chord.into(),
            leading,
            trailing,
        }
    }
}

/// A classified line of a song sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Line {
    /// Section header, stored trimmed (`Verse 1:`, `Припев:`)
    Header { content: String },
    /// Chords laid out above a lyric line
    Chords { tokens: Vec<ChordToken> },
    /// Anything else, stored untrimmed
    Text { content: String },
    /// Whitespace-only line
    Empty,
}

impl Line {
    pub fn is_chords(&self) -> bool {
        matches!(self, Line::Chords { .. })
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Empty)
    }

    /// Short label used in listings
    pub fn kind(&self) -> &'static str {
        match self {
            Line::Header { .. } => "header",
            Line::Chords { .. } => "chords",
            Line::Text { .. } => "text",
            Line::Empty => "empty",
        }
    }
}
