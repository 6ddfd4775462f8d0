use serde::{Deserialize, Serialize};

/// Configuration from chordsheet.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub transpose: TransposeConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// Longest line (in characters, trimmed) that may still be a header
    #[serde(default = "default_max_header_len")]
    pub max_header_len: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            max_header_len: default_max_header_len(),
        }
    }
}

fn default_max_header_len() -> usize {
    50
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposeConfig {
    #[serde(default)]
    pub b_natural: BNatural,
}

/// Output spelling for the pitch class between Bb and C
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BNatural {
    /// `H` when the chord being transposed was written with `H`, else `B`
    #[default]
    Auto,
    B,
    H,
}

impl BNatural {
    /// Spelling to use given the root the chord had before transposition
    pub fn spelling(self, source_root: &str) -> &'static str {
        match self {
            BNatural::B => "B",
            BNatural::H => "H",
            BNatural::Auto if source_root.starts_with('H') => "H",
            BNatural::Auto => "B",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Drop chord lines, leaving lyrics only
    #[serde(default)]
    pub hide_chords: bool,
}
