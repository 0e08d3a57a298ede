//! MELVA: rule-based music tutoring engine
//!
//! One `TutorEngine` per conversation: text + learner context in, coaching reply out.
//! Signals (topic, emotion, intent) → session memory → turn state machine → composer.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::{ConfigSource, TutorConfig};
pub use error::{Result, TutorError};

// =============================================================================
// MEMORY CAPS
// =============================================================================

/// Topics kept in the per-session topic history
pub const TOPIC_HISTORY_CAP: usize = 24;

/// `topic:tip` keys remembered before the oldest are dropped
pub const RECENT_ADVICE_CAP: usize = 20;

/// Messages an API session keeps in its transcript; older ones are dropped
pub const TRANSCRIPT_CAP: usize = 200;

/// Session frequency at which a topic becomes the struggling topic
pub const STRUGGLING_FREQUENCY: u32 = 3;

/// Stored goals are cut to this many characters (plus an ellipsis)
pub const GOAL_MAX_CHARS: usize = 90;

/// Rapid switch = at least this many changes among the last `RAPID_SWITCH_WINDOW` topics
pub const RAPID_SWITCH_CHANGES: usize = 3;
pub const RAPID_SWITCH_WINDOW: usize = 4;

/// A diagnostic is considered on every Nth turn while repeating a topic
pub const DIAGNOSTIC_TURN_INTERVAL: u64 = 3;

// =============================================================================
// INTENT SCORING
// =============================================================================

/// Score `fallback` starts with before keywords are counted
pub const INTENT_FALLBACK_SEED: f64 = 0.1;

/// Bonus for repeating the previous turn's intent
pub const INTENT_CONTINUITY_BONUS: f64 = 0.3;

/// Bonus for intents associated with the previous topic
pub const INTENT_AFFINITY_BONUS: f64 = 0.25;

/// Question-mark boosts
pub const QUESTION_BOOST_HOW_TO: f64 = 0.2;
pub const QUESTION_BOOST_EXPLAIN: f64 = 0.15;

/// Below either of these the result is overridden to `fallback`
pub const INTENT_MIN_SCORE: f64 = 0.55;
pub const INTENT_MIN_CONFIDENCE: f64 = 0.24;

/// Confidence reported for an overridden `fallback`, at least
pub const INTENT_CONFIDENCE_FLOOR: f64 = 0.2;

// =============================================================================
// TURN SHAPE
// =============================================================================

/// Inputs with at most this many words are low-signal
pub const LOW_SIGNAL_MAX_WORDS: usize = 2;

/// Greetings longer than this are treated as normal turns
pub const GREETING_MAX_WORDS: usize = 6;

/// Every practice plan lasts exactly this long
pub const PRACTICE_PLAN_MINUTES: u32 = 25;

// =============================================================================
// DEFAULTS
// =============================================================================

pub const DEFAULT_GENRE: &str = "pop";
pub const DEFAULT_LEVEL: &str = "intermediate";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
