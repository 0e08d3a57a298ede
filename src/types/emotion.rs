//! Emotion classification and tone guidance

use serde::{Deserialize, Serialize};

/// Closed set of emotional tones detected in a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    Neutral,
    Frustrated,
    Motivated,
    Confused,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Frustrated => "frustrated",
            Emotion::Motivated => "motivated",
            Emotion::Confused => "confused",
        }
    }

    /// Frustrated or confused
    pub fn needs_support(&self) -> bool {
        matches!(self, Emotion::Frustrated | Emotion::Confused)
    }

    /// How to phrase the next reply for this emotion
    pub fn tone_guidance(&self) -> ToneGuidance {
        match self {
            Emotion::Frustrated => ToneGuidance {
                validation_line: "I hear you. This part can feel hard, and that's normal.",
                encouragement_line: "We will target one small win first, then build from there.",
                simplification_factor: 0.8,
            },
            Emotion::Confused => ToneGuidance {
                validation_line: "Good call asking now. We can simplify this quickly.",
                encouragement_line: "A clear next step will remove most of the confusion.",
                simplification_factor: 0.85,
            },
            Emotion::Motivated => ToneGuidance {
                validation_line: "Great momentum. Let us use it efficiently.",
                encouragement_line: "I will raise the challenge slightly.",
                simplification_factor: 1.1,
            },
            Emotion::Neutral => ToneGuidance {
                validation_line: "",
                encouragement_line: "",
                simplification_factor: 1.0,
            },
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of the emotion analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSignal {
    pub emotion: Emotion,
    /// Set for upbeat messages; earns the challenge boost on advice
    pub positive_signal: bool,
}

/// Empathy framing and difficulty scaling for one emotion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneGuidance {
    /// Opening empathy line, empty for neutral
    pub validation_line: &'static str,
    /// Closing line, empty for neutral
    pub encouragement_line: &'static str,
    /// Multiplier for drill difficulty (1.0 = unchanged)
    pub simplification_factor: f64,
}
