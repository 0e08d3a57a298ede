//! Topic Detector: keyword-scores free text into one topic
//!
//! Score = number of a topic's keywords contained in the lower-cased text.
//! Highest non-zero score wins; ties keep the topic scanned first.

use std::collections::VecDeque;

use crate::types::Topic;
use crate::{RAPID_SWITCH_CHANGES, RAPID_SWITCH_WINDOW};

/// Keywords per topic. `General` has none and only wins by default.
fn topic_keywords(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Chords => &["chord", "progression", "voicing", "triad", "seventh"],
        Topic::Scales => &["scale", "mode", "pentatonic", "major scale", "minor scale"],
        Topic::Rhythm => &["rhythm", "timing", "tempo", "groove", "beat", "metronome"],
        Topic::Melody => &["melody", "hook", "motif", "phrase", "tune"],
        Topic::Harmony => &["harmony", "voice leading", "cadence", "modulation", "resolve"],
        Topic::Songwriting => &["song", "lyrics", "chorus", "verse", "compose", "arrangement"],
        Topic::EarTraining => &["ear", "interval", "transcribe", "dictation"],
        Topic::Technique => &["technique", "posture", "fingering", "articulation", "control"],
        Topic::Practice => &["practice", "routine", "schedule", "drill", "session"],
        Topic::General => &[],
    }
}

/// Number of keywords that appear in `text` (each counted once)
pub(crate) fn count_keywords(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| !k.is_empty() && text.contains(*k)).count()
}

/// Topic detector
#[derive(Debug, Default)]
pub struct TopicDetector;

impl TopicDetector {
    /// Create new detector
    pub fn new() -> Self {
        Self
    }

    /// Score of every topic, in scan order
    pub fn scores(&self, text: &str) -> Vec<(Topic, usize)> {
        let text = text.to_lowercase();
        Topic::ALL
            .iter()
            .map(|&topic| (topic, count_keywords(&text, topic_keywords(topic))))
            .collect()
    }

    /// Best-scoring topic, `General` when nothing matches
    pub fn detect(&self, text: &str) -> Topic {
        let mut best = Topic::General;
        let mut best_score = 0;
        for (topic, score) in self.scores(text) {
            if score > best_score {
                best = topic;
                best_score = score;
            }
        }
        best
    }
}

/// At least `RAPID_SWITCH_CHANGES` changes among the last `RAPID_SWITCH_WINDOW` topics
pub fn is_rapid_switch(history: &VecDeque<Topic>) -> bool {
    if history.len() < RAPID_SWITCH_WINDOW {
        return false;
    }
    let recent: Vec<Topic> = history
        .iter()
        .skip(history.len() - RAPID_SWITCH_WINDOW)
        .copied()
        .collect();
    let changes = recent.windows(2).filter(|w| w[0] != w[1]).count();
    changes >= RAPID_SWITCH_CHANGES
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_general() {
        let detector = TopicDetector::new();
        assert_eq!(detector.detect(""), Topic::General);
        assert_eq!(detector.detect("what should I do today"), Topic::General);
    }

    #[test]
    fn test_detects_single_topic() {
        let detector = TopicDetector::new();
        assert_eq!(detector.detect("Help with my chord progression"), Topic::Chords);
        assert_eq!(detector.detect("my TIMING drifts off the metronome"), Topic::Rhythm);
        assert_eq!(detector.detect("how do I transcribe an interval"), Topic::EarTraining);
    }

    #[test]
    fn test_highest_score_wins() {
        let detector = TopicDetector::new();
        // rhythm: tempo + groove (2), chords: chord (1)
        assert_eq!(detector.detect("chord changes break my tempo and groove"), Topic::Rhythm);
    }

    #[test]
    fn test_tie_keeps_first_scanned() {
        let detector = TopicDetector::new();
        // chords: chord (1), scales: scale (1) → chords is scanned first
        assert_eq!(detector.detect("chord or scale first"), Topic::Chords);
    }

    #[test]
    fn test_determinism() {
        let detector = TopicDetector::new();
        let text = "I want a routine for songwriting lyrics";
        assert_eq!(detector.detect(text), detector.detect(text));
    }

    #[test]
    fn test_scores_cover_all_topics() {
        let detector = TopicDetector::new();
        let scores = detector.scores("pentatonic scale");
        assert_eq!(scores.len(), Topic::ALL.len());
        assert_eq!(scores[1], (Topic::Scales, 2));
    }

    #[test]
    fn test_rapid_switch_needs_four_entries() {
        let history: VecDeque<Topic> = [Topic::Chords, Topic::Rhythm, Topic::Scales].into();
        assert!(!is_rapid_switch(&history));
    }

    #[test]
    fn test_rapid_switch_detected() {
        let history: VecDeque<Topic> =
            [Topic::Chords, Topic::Chords, Topic::Rhythm, Topic::Scales, Topic::Melody].into();
        assert!(is_rapid_switch(&history));
    }

    #[test]
    fn test_two_changes_is_not_rapid() {
        let history: VecDeque<Topic> =
            [Topic::Chords, Topic::Rhythm, Topic::Rhythm, Topic::Scales].into();
        assert!(!is_rapid_switch(&history));
    }
}
