//! Emotion Analyzer: keyword-scores free text into one emotion
//!
//! Priority: frustration → confusion → motivation → neutral.

use crate::types::{Emotion, EmotionSignal};

/// Frustration markers. "confused" sits here too, so it reads as frustration.
const FRUSTRATION_KEYWORDS: &[&str] = &[
    "stuck",
    "frustrated",
    "can't",
    "can\u{2019}t",
    "bad",
    "struggling",
    "confused",
];

const CONFUSION_KEYWORDS: &[&str] = &["confused", "don't understand", "not sure", "idk"];

const POSITIVE_KEYWORDS: &[&str] = &[
    "great",
    "good",
    "better",
    "improved",
    "awesome",
    "nice",
    "confident",
    "motivated",
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Emotion analyzer
#[derive(Debug, Default)]
pub struct EmotionAnalyzer;

impl EmotionAnalyzer {
    /// Create new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Classify a message
    pub fn analyze(&self, text: &str) -> EmotionSignal {
        let text = text.to_lowercase();
        let emotion = if contains_any(&text, FRUSTRATION_KEYWORDS) {
            Emotion::Frustrated
        } else if contains_any(&text, CONFUSION_KEYWORDS) {
            Emotion::Confused
        } else if contains_any(&text, POSITIVE_KEYWORDS) {
            Emotion::Motivated
        } else {
            Emotion::Neutral
        };
        EmotionSignal {
            emotion,
            positive_signal: emotion == Emotion::Motivated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frustrated() {
        let analyzer = EmotionAnalyzer::new();
        let signal = analyzer.analyze("I'm stuck and frustrated with this rhythm pattern");
        assert_eq!(signal.emotion, Emotion::Frustrated);
        assert!(!signal.positive_signal);
    }

    #[test]
    fn test_curly_apostrophe() {
        let analyzer = EmotionAnalyzer::new();
        assert_eq!(analyzer.analyze("I can\u{2019}t do it").emotion, Emotion::Frustrated);
    }

    #[test]
    fn test_confused_phrases() {
        let analyzer = EmotionAnalyzer::new();
        assert_eq!(analyzer.analyze("I don't understand modes").emotion, Emotion::Confused);
        assert_eq!(analyzer.analyze("idk what to play").emotion, Emotion::Confused);
    }

    #[test]
    fn test_frustration_outranks_confusion() {
        let analyzer = EmotionAnalyzer::new();
        assert_eq!(analyzer.analyze("so confused").emotion, Emotion::Frustrated);
    }

    #[test]
    fn test_motivated_sets_positive_signal() {
        let analyzer = EmotionAnalyzer::new();
        let signal = analyzer.analyze("That felt GREAT today");
        assert_eq!(signal.emotion, Emotion::Motivated);
        assert!(signal.positive_signal);
    }

    #[test]
    fn test_neutral() {
        let analyzer = EmotionAnalyzer::new();
        assert_eq!(analyzer.analyze("show me a scale").emotion, Emotion::Neutral);
        assert_eq!(analyzer.analyze("").emotion, Emotion::Neutral);
    }
}
