//! Topic classification

use serde::{Deserialize, Serialize};

/// Closed set of subjects a turn can be about.
///
/// Declaration order is the scan order of the topic detector, so it also
/// decides ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Chords,
    Scales,
    Rhythm,
    Melody,
    Harmony,
    Songwriting,
    EarTraining,
    Technique,
    Practice,
    #[default]
    General,
}

impl Topic {
    /// All topics in scan order
    pub const ALL: [Topic; 10] = [
        Topic::Chords,
        Topic::Scales,
        Topic::Rhythm,
        Topic::Melody,
        Topic::Harmony,
        Topic::Songwriting,
        Topic::EarTraining,
        Topic::Technique,
        Topic::Practice,
        Topic::General,
    ];

    /// Wire / display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Chords => "chords",
            Topic::Scales => "scales",
            Topic::Rhythm => "rhythm",
            Topic::Melody => "melody",
            Topic::Harmony => "harmony",
            Topic::Songwriting => "songwriting",
            Topic::EarTraining => "ear_training",
            Topic::Technique => "technique",
            Topic::Practice => "practice",
            Topic::General => "general",
        }
    }

    /// Parse a wire name; `None` for anything outside the set
    pub fn from_name(name: &str) -> Option<Topic> {
        let name = name.trim();
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    pub fn is_general(&self) -> bool {
        *self == Topic::General
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
