use serde::{Deserialize, Serialize};

/// The role of a section as named by its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Verse,
    Chorus,
    Other,
}

impl SectionType {
    /// Only verses and choruses repeat their progression
    pub fn takes_template(self) -> bool {
        matches!(self, SectionType::Verse | SectionType::Chorus)
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Verse => write!(f, "Verse"),
            SectionType::Chorus => write!(f, "Chorus"),
            SectionType::Other => write!(f, "Other"),
        }
    }
}
