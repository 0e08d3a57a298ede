//! Intent classification and scoring result

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of purposes a message can have
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Explain,
    HowTo,
    PracticePlan,
    Motivation,
    Analysis,
    Songwriting,
    EarTraining,
    #[default]
    Fallback,
}

impl Intent {
    /// All intents in scoring order (ties go to the earlier one)
    pub const ALL: [Intent; 9] = [
        Intent::Greeting,
        Intent::Explain,
        Intent::HowTo,
        Intent::PracticePlan,
        Intent::Motivation,
        Intent::Analysis,
        Intent::Songwriting,
        Intent::EarTraining,
        Intent::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Explain => "explain",
            Intent::HowTo => "how_to",
            Intent::PracticePlan => "practice_plan",
            Intent::Motivation => "motivation",
            Intent::Analysis => "analysis",
            Intent::Songwriting => "songwriting",
            Intent::EarTraining => "ear_training",
            Intent::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of intent scoring, kept whole for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentScore {
    /// Resolved intent (after the fallback override)
    pub intent: Intent,
    /// Top score / sum of scores, in [0, 1]
    pub confidence: f64,
    /// Raw score of every intent
    pub scores: BTreeMap<Intent, f64>,
}

impl IntentScore {
    /// Raw score of one intent
    pub fn score(&self, intent: Intent) -> f64 {
        self.scores.get(&intent).copied().unwrap_or(0.0)
    }

    /// Highest raw score (before the fallback override)
    pub fn top_score(&self) -> f64 {
        self.scores.values().copied().fold(0.0, f64::max)
    }

    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}
