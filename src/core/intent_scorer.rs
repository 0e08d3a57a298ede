//! Intent Scorer: keyword + continuity + affinity scoring over the intent set
//!
//! score(i) = matches(i) × weight(i)
//!          + continuity bonus if i was the previous (non-fallback) intent
//!          + affinity bonus if i is associated with the previous topic
//!          + question boost for how_to / explain
//! Too-low top score or confidence resolves to `fallback`.

use std::collections::BTreeMap;

use crate::core::topic_detector::count_keywords;
use crate::types::{Intent, IntentScore, Topic};
use crate::{
    INTENT_AFFINITY_BONUS, INTENT_CONFIDENCE_FLOOR, INTENT_CONTINUITY_BONUS,
    INTENT_FALLBACK_SEED, INTENT_MIN_CONFIDENCE, INTENT_MIN_SCORE, QUESTION_BOOST_EXPLAIN,
    QUESTION_BOOST_HOW_TO,
};

/// Keywords and per-match weight of one intent
struct IntentRule {
    keywords: &'static [&'static str],
    weight: f64,
}

/// Weights follow keyword specificity: plan phrases are rarely accidental,
/// greetings are short substrings that hit often.
fn intent_rule(intent: Intent) -> IntentRule {
    match intent {
        Intent::Greeting => IntentRule {
            keywords: &["hi", "hello", "hey", "yo", "sup", "good morning", "good evening", "good afternoon"],
            weight: 1.1,
        },
        Intent::Explain => IntentRule {
            keywords: &["what is", "explain", "why", "theory", "difference", "meaning"],
            weight: 1.2,
        },
        Intent::HowTo => IntentRule {
            keywords: &["how to", "how do i", "steps", "guide me", "teach me", "show me"],
            weight: 1.25,
        },
        Intent::PracticePlan => IntentRule {
            keywords: &["practice plan", "routine", "schedule", "daily plan", "weekly plan", "25 minute plan"],
            weight: 1.35,
        },
        Intent::Motivation => IntentRule {
            keywords: &["stuck", "frustrated", "can\u{2019}t", "can't", "bad", "struggling", "discouraged", "confused"],
            weight: 1.3,
        },
        Intent::Analysis => IntentRule {
            keywords: &["analyze", "analysis", "feedback", "what is wrong", "diagnose", "review this"],
            weight: 1.3,
        },
        Intent::Songwriting => IntentRule {
            keywords: &["songwriting", "write a song", "lyrics", "verse", "chorus", "hook", "compose"],
            weight: 1.3,
        },
        Intent::EarTraining => IntentRule {
            keywords: &["ear training", "interval", "transcribe", "dictation", "hear"],
            weight: 1.25,
        },
        Intent::Fallback => IntentRule {
            keywords: &[],
            weight: 0.5,
        },
    }
}

/// Intents that tend to follow a topic
fn topic_affinity(topic: Topic) -> &'static [Intent] {
    match topic {
        Topic::Songwriting => &[Intent::Songwriting, Intent::HowTo, Intent::PracticePlan],
        Topic::EarTraining => &[Intent::EarTraining, Intent::PracticePlan, Intent::HowTo],
        Topic::Practice => &[Intent::PracticePlan, Intent::HowTo],
        Topic::Harmony => &[Intent::Explain, Intent::Analysis],
        Topic::Chords => &[Intent::Explain, Intent::HowTo],
        Topic::Rhythm => &[Intent::HowTo, Intent::PracticePlan, Intent::Analysis],
        _ => &[],
    }
}

/// Intent scorer
#[derive(Debug, Default)]
pub struct IntentScorer;

impl IntentScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }

    /// Score `text` given the previous turn's intent and topic
    pub fn score(&self, text: &str, last_intent: Intent, last_topic: Topic) -> IntentScore {
        let text = text.to_lowercase();

        let mut scores: BTreeMap<Intent, f64> = Intent::ALL.iter().map(|&i| (i, 0.0)).collect();
        *scores.entry(Intent::Fallback).or_default() += INTENT_FALLBACK_SEED;

        for intent in Intent::ALL {
            let rule = intent_rule(intent);
            let matches = count_keywords(&text, rule.keywords) as f64;
            *scores.entry(intent).or_default() += matches * rule.weight;
        }

        if last_intent != Intent::Fallback {
            *scores.entry(last_intent).or_default() += INTENT_CONTINUITY_BONUS;
        }

        for &intent in topic_affinity(last_topic) {
            *scores.entry(intent).or_default() += INTENT_AFFINITY_BONUS;
        }

        if text.contains('?') {
            *scores.entry(Intent::HowTo).or_default() += QUESTION_BOOST_HOW_TO;
            *scores.entry(Intent::Explain).or_default() += QUESTION_BOOST_EXPLAIN;
        }

        // Strict `>` over declaration order keeps ties deterministic
        let mut best = Intent::Fallback;
        let mut best_score = f64::MIN;
        for intent in Intent::ALL {
            let s = scores[&intent];
            if s > best_score {
                best = intent;
                best_score = s;
            }
        }

        let total: f64 = scores.values().sum();
        let confidence = if total > 0.0 { best_score / total } else { 0.0 };

        if best_score < INTENT_MIN_SCORE || confidence < INTENT_MIN_CONFIDENCE {
            return IntentScore {
                intent: Intent::Fallback,
                confidence: confidence.max(INTENT_CONFIDENCE_FLOOR),
                scores,
            };
        }

        IntentScore {
            intent: best,
            confidence,
            scores,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(text: &str) -> IntentScore {
        IntentScorer::new().score(text, Intent::Fallback, Topic::General)
    }

    #[test]
    fn test_greeting() {
        let result = fresh("hi");
        assert_eq!(result.intent, Intent::Greeting);
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn test_empty_input_is_fallback() {
        let result = fresh("");
        assert_eq!(result.intent, Intent::Fallback);
        assert!((result.score(Intent::Fallback) - INTENT_FALLBACK_SEED).abs() < 1e-9);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_practice_plan() {
        let result = fresh("Can you make me a practice plan?");
        assert_eq!(result.intent, Intent::PracticePlan);
    }

    #[test]
    fn test_low_score_overrides_to_fallback() {
        // Affinity alone (0.25) never reaches the minimum score
        let result = IntentScorer::new().score("chord progression", Intent::Fallback, Topic::Chords);
        assert_eq!(result.intent, Intent::Fallback);
        assert!((result.score(Intent::Explain) - 0.25).abs() < 1e-9);
        assert!(result.confidence >= INTENT_CONFIDENCE_FLOOR);
    }

    #[test]
    fn test_continuity_bonus_skips_fallback() {
        let scorer = IntentScorer::new();
        let result = scorer.score("", Intent::Analysis, Topic::General);
        assert!((result.score(Intent::Analysis) - INTENT_CONTINUITY_BONUS).abs() < 1e-9);

        let result = scorer.score("", Intent::Fallback, Topic::General);
        assert!((result.score(Intent::Fallback) - INTENT_FALLBACK_SEED).abs() < 1e-9);
    }

    #[test]
    fn test_question_mark_boost() {
        let result = fresh("?");
        assert!((result.score(Intent::HowTo) - QUESTION_BOOST_HOW_TO).abs() < 1e-9);
        assert!((result.score(Intent::Explain) - QUESTION_BOOST_EXPLAIN).abs() < 1e-9);
    }

    #[test]
    fn test_how_to_question() {
        let result = fresh("how do i build a triad?");
        assert_eq!(result.intent, Intent::HowTo);
    }

    #[test]
    fn test_confidence_in_unit_range() {
        let scorer = IntentScorer::new();
        for text in ["", "hi", "explain why theory matters?", "stuck bad frustrated", "songwriting lyrics hook"] {
            for last in Intent::ALL {
                let result = scorer.score(text, last, Topic::Songwriting);
                assert!((0.0..=1.0).contains(&result.confidence), "{} → {}", text, result.confidence);
            }
        }
    }

    #[test]
    fn test_score_map_has_every_intent() {
        let result = fresh("explain");
        assert_eq!(result.scores.len(), Intent::ALL.len());
    }

    #[test]
    fn test_fallback_rule_holds() {
        let scorer = IntentScorer::new();
        for text in ["ok", "explain", "how to", "routine?", "what is wrong with my feedback"] {
            let result = scorer.score(text, Intent::HowTo, Topic::Rhythm);
            if result.top_score() < INTENT_MIN_SCORE {
                assert_eq!(result.intent, Intent::Fallback, "{}", text);
            }
        }
    }
}
