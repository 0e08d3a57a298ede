//! Response generators: interchangeable strategies behind one trait
//!
//! - `TutorEngine`: the rule-based coach, stateful per conversation
//! - `KnowledgeBaseGenerator`: static music FAQ with topic templates, stateless

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::engine::TutorEngine;
use crate::error::TutorError;
use crate::types::{Context, SessionMemory, Topic, TurnOutput};

/// Text of one reply, plus turn diagnostics when the strategy has them
#[derive(Debug, Clone)]
pub struct GeneratedReply {
    pub text: String,
    pub turn: Option<TurnOutput>,
}

/// Anything that can answer a learner message
pub trait ResponseGenerator: Send + Sync {
    /// Strategy name, as accepted by `GeneratorKind::from_str`
    fn name(&self) -> &'static str;

    /// Answer one message with diagnostics
    fn generate_turn(&mut self, input: &str, context: &Context) -> GeneratedReply;

    /// Answer one message
    fn generate(&mut self, input: &str, context: &Context) -> String {
        self.generate_turn(input, context).text
    }

    /// Session memory, for strategies that keep one
    fn memory(&self) -> Option<&SessionMemory> {
        None
    }

    /// Forget conversation state
    fn reset(&mut self) {}
}

impl ResponseGenerator for TutorEngine {
    fn name(&self) -> &'static str {
        GeneratorKind::Tutor.as_str()
    }

    fn generate_turn(&mut self, input: &str, context: &Context) -> GeneratedReply {
        let turn = self.process(input, context);
        GeneratedReply {
            text: turn.response.clone(),
            turn: Some(turn),
        }
    }

    fn memory(&self) -> Option<&SessionMemory> {
        Some(TutorEngine::memory(self))
    }

    fn reset(&mut self) {
        TutorEngine::reset(self);
    }
}

// =============================================================================
// STRATEGY SELECTION
// =============================================================================

/// Available strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    #[default]
    Tutor,
    #[serde(rename = "knowledge")]
    KnowledgeBase,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Tutor => "tutor",
            GeneratorKind::KnowledgeBase => "knowledge",
        }
    }

    /// Fresh generator of this kind
    pub fn build(&self) -> Box<dyn ResponseGenerator> {
        match self {
            GeneratorKind::Tutor => Box::new(TutorEngine::new()),
            GeneratorKind::KnowledgeBase => Box::new(KnowledgeBaseGenerator::new()),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tutor" => Ok(GeneratorKind::Tutor),
            "knowledge" => Ok(GeneratorKind::KnowledgeBase),
            other => Err(TutorError::UnknownGenerator(other.to_string())),
        }
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// KNOWLEDGE BASE
// =============================================================================

/// A prompt must share more than this fraction of its words with the message
const FAQ_MATCH_THRESHOLD: f64 = 0.5;

struct FaqEntry {
    prompt: &'static str,
    answer: &'static str,
}

const MUSIC_FAQ: &[FaqEntry] = &[
    FaqEntry {
        prompt: "What is a major chord?",
        answer: "A major chord consists of three notes: the root, major third, and perfect fifth. For example, C major = C, E, G. \u{1f3b5}",
    },
    FaqEntry {
        prompt: "What is a minor chord?",
        answer: "A minor chord includes the root, minor third, and perfect fifth. Example: A minor = A, C, E.",
    },
    FaqEntry {
        prompt: "What is a scale in music?",
        answer: "A scale is a sequence of notes ordered by pitch. The C major scale is C D E F G A B.",
    },
    FaqEntry {
        prompt: "Explain the 4/4 time signature.",
        answer: "4/4 time means 4 beats per measure, and each beat is a quarter note. It's the most common time signature. \u{1f941}",
    },
    FaqEntry {
        prompt: "How can I improve my rhythm?",
        answer: "Practice with a metronome daily, start slow, and increase speed gradually. Try clapping and tapping exercises. \u{1f552}",
    },
    FaqEntry {
        prompt: "What is a triad?",
        answer: "A triad is a chord made up of three notes: the root, third, and fifth.",
    },
    FaqEntry {
        prompt: "What are chord progressions?",
        answer: "Chord progressions are sequences of chords used to structure songs. A common one is I-IV-V-I.",
    },
    FaqEntry {
        prompt: "What is a seventh chord?",
        answer: "A seventh chord adds the seventh note to a triad. Example: G7 = G, B, D, F.",
    },
    FaqEntry {
        prompt: "What is an arpeggio?",
        answer: "An arpeggio is when you play the notes of a chord one after the other instead of together.",
    },
    FaqEntry {
        prompt: "What is a metronome used for?",
        answer: "A metronome is used to keep a steady tempo while practicing rhythm or timing. \u{1f9ed}",
    },
    FaqEntry {
        prompt: "How do I write a melody?",
        answer: "Start with a scale, use stepwise motion, and try to keep a singable and simple phrase structure.",
    },
    FaqEntry {
        prompt: "What is a key signature?",
        answer: "A key signature shows the sharps or flats in a scale. C major has no sharps or flats.",
    },
    FaqEntry {
        prompt: "What are dynamics in music?",
        answer: "Dynamics indicate volume changes in music, such as piano (soft) or forte (loud).",
    },
];

/// Template topics, scanned in order; the first with any keyword wins
const TEMPLATE_TOPICS: &[(Topic, &[&str])] = &[
    (Topic::Chords, &["chord", "progression", "harmony", "key"]),
    (Topic::Scales, &["scale", "mode", "notes", "key"]),
    (Topic::Practice, &["practice", "exercise", "routine", "drill"]),
    (Topic::Songwriting, &["write", "compose", "song", "melody"]),
    (Topic::Rhythm, &["rhythm", "beat", "tempo", "time"]),
];

/// Static FAQ responder
#[derive(Debug, Default)]
pub struct KnowledgeBaseGenerator;

impl KnowledgeBaseGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Best FAQ answer, if one matches well enough
    pub fn closest_answer(&self, message: &str) -> Option<&'static str> {
        let message = message.to_lowercase();
        let mut best: Option<(&FaqEntry, f64)> = None;

        for entry in MUSIC_FAQ {
            let prompt = entry.prompt.to_lowercase();
            let words: Vec<&str> = prompt.split(' ').collect();
            let hits = words.iter().filter(|w| message.contains(*w)).count();
            let score = hits as f64 / words.len() as f64;

            let best_score = best.map(|(_, s)| s).unwrap_or(0.0);
            if score > FAQ_MATCH_THRESHOLD && score > best_score {
                best = Some((entry, score));
            }
        }

        best.map(|(entry, _)| entry.answer)
    }

    /// Template topic of a message, `General` when none applies
    pub fn template_topic(&self, message: &str) -> Topic {
        let message = message.to_lowercase();
        TEMPLATE_TOPICS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::General)
    }
}

fn topic_template(topic: Topic, context: &Context) -> Option<String> {
    let (genre, level) = (&context.genre, &context.level);
    let text = match topic {
        Topic::Chords => format!(
            "\u{1f3b5} Let's explore this chord concept in {genre} music.\n\n\
             For {level} players, here's what to focus on:\n\n\
             1. Basic Structure:\n   - Root note\n   - Chord quality\n   - Common variations\n\n\
             2. Practice Tips:\n   - Start slow\n   - Focus on clean transitions\n   - Listen for proper voicing\n\n\
             Would you like specific examples or exercises? \u{1f4a1}"
        ),
        Topic::Scales => format!(
            "\u{1f3b5} Let's work on scales in {genre} music!\n\n\
             For {level} players:\n\n\
             1. Scale Structure:\n   - Notes and intervals\n   - Pattern recognition\n   - Key characteristics\n\n\
             2. Practice Method:\n   - Use a metronome\n   - Start slowly\n   - Practice in patterns\n\n\
             Need help with specific fingerings or exercises? \u{1f3b8}"
        ),
        Topic::Practice => format!(
            "\u{1f4aa} Here's a structured practice routine for {level} {genre} players:\n\n\
             1. Warm-up (10-15 mins):\n   - Finger exercises\n   - Basic scales\n   - Simple patterns\n\n\
             2. Technical Work (20-30 mins):\n   - Specific exercises\n   - Pattern practice\n   - Speed building\n\n\
             Would you like me to break down any of these sections? \u{2728}"
        ),
        _ => return None,
    };
    Some(text)
}

impl ResponseGenerator for KnowledgeBaseGenerator {
    fn name(&self) -> &'static str {
        GeneratorKind::KnowledgeBase.as_str()
    }

    fn generate_turn(&mut self, input: &str, context: &Context) -> GeneratedReply {
        let context = context.clone().normalized();
        let text = match self.closest_answer(input) {
            Some(answer) => answer.to_string(),
            None => {
                let topic = self.template_topic(input);
                topic_template(topic, &context).unwrap_or_else(|| {
                    format!(
                        "Let me help you with {} in {} music! What specific aspect would you like to explore? \u{1f3b5}",
                        topic, context.genre
                    )
                })
            }
        };
        tracing::debug!(generator = self.name(), "knowledge base reply");
        GeneratedReply { text, turn: None }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TurnBranch;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("tutor".parse::<GeneratorKind>().unwrap(), GeneratorKind::Tutor);
        assert_eq!(" Knowledge ".parse::<GeneratorKind>().unwrap(), GeneratorKind::KnowledgeBase);
        assert!(matches!(
            "gpt".parse::<GeneratorKind>(),
            Err(TutorError::UnknownGenerator(name)) if name == "gpt"
        ));
    }

    #[test]
    fn test_build_names() {
        assert_eq!(GeneratorKind::Tutor.build().name(), "tutor");
        assert_eq!(GeneratorKind::KnowledgeBase.build().name(), "knowledge");
        assert_eq!(GeneratorKind::default(), GeneratorKind::Tutor);
    }

    #[test]
    fn test_tutor_strategy_reports_turn() {
        let mut generator = GeneratorKind::Tutor.build();
        let reply = generator.generate_turn("hi", &Context::new("jazz", ""));
        assert_eq!(reply.text, "Hey! Ready to improve your jazz today?");
        let turn = reply.turn.unwrap();
        assert_eq!(turn.branch, TurnBranch::Greeting);
        assert_eq!(generator.memory().map(|m| m.turn), Some(1));

        generator.reset();
        assert_eq!(generator.memory().map(|m| m.turn), Some(0));
    }

    #[test]
    fn test_faq_match() {
        let kb = KnowledgeBaseGenerator::new();
        let answer = kb.closest_answer("what is a major chord?").unwrap();
        assert!(answer.starts_with("A major chord consists of three notes"));
        assert_eq!(kb.closest_answer("play louder"), None);
    }

    #[test]
    fn test_faq_prefers_higher_score() {
        let kb = KnowledgeBaseGenerator::new();
        // "what is a triad?" matches every word of its own prompt
        let answer = kb.closest_answer("What is a triad?").unwrap();
        assert!(answer.starts_with("A triad is"));
    }

    #[test]
    fn test_template_topics() {
        let kb = KnowledgeBaseGenerator::new();
        assert_eq!(kb.template_topic("my harmony sounds thin"), Topic::Chords);
        assert_eq!(kb.template_topic("pentatonic mode"), Topic::Scales);
        assert_eq!(kb.template_topic("write something"), Topic::Songwriting);
        assert_eq!(kb.template_topic("hello"), Topic::General);
    }

    #[test]
    fn test_knowledge_fallbacks_never_empty() {
        let mut kb = KnowledgeBaseGenerator::new();
        let ctx = Context::new("blues", "beginner");

        let text = kb.generate("give me a drill", &ctx);
        assert!(text.contains("practice routine for beginner blues players"));

        let text = kb.generate("help me compose", &ctx);
        assert!(text.starts_with("Let me help you with songwriting in blues music!"));

        let text = kb.generate("", &ctx);
        assert!(text.starts_with("Let me help you with general in blues music!"));
        assert!(kb.memory().is_none());
    }
}
