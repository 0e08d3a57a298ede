//! Memory Manager: the only writer of `SessionMemory`
//!
//! One instance per conversation, updated once per turn. Caps on topic
//! history and shown advice are enforced on every mutation.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{advice_key, Emotion, Intent, SessionMemory, Topic};
use crate::{
    DIAGNOSTIC_TURN_INTERVAL, GOAL_MAX_CHARS, RECENT_ADVICE_CAP, STRUGGLING_FREQUENCY,
    TOPIC_HISTORY_CAP,
};

lazy_static! {
    static ref RE_GOAL: Regex = Regex::new(
        r"(?i)(goal|focus|want to|trying to|need to|improve)"
    ).unwrap();

    static ref RE_SPEED_ANSWER: Regex = Regex::new(
        r"(?i)(speed|fast|tempo)"
    ).unwrap();

    static ref RE_ACCURACY_ANSWER: Regex = Regex::new(
        r"(?i)(accuracy|clean|mistake|precision)"
    ).unwrap();
}

const SPEED_RESOLUTION: &str =
    "Good call. We will lower tempo by 10 BPM, lock clean reps, then rebuild speed.";

const ACCURACY_RESOLUTION: &str =
    "Great, accuracy first. We will isolate the weak transition and require 2 clean reps before tempo increase.";

/// Owner of one session's memory
#[derive(Debug, Default, Clone)]
pub struct MemoryManager {
    memory: SessionMemory,
}

impl MemoryManager {
    /// Fresh session
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a stored snapshot
    pub fn with_memory(memory: SessionMemory) -> Self {
        Self { memory }
    }

    /// Read-only view of the memory
    pub fn memory(&self) -> &SessionMemory {
        &self.memory
    }

    /// Forget everything
    pub fn reset(&mut self) {
        self.memory = SessionMemory::default();
    }

    /// Apply one turn's signals.
    ///
    /// With `count_as_topic_progress == false` only counters, intent, emotion
    /// and goal capture change; topic state is left alone.
    pub fn update_on_turn(
        &mut self,
        intent: Intent,
        topic: Topic,
        emotion: Emotion,
        raw_input: &str,
        count_as_topic_progress: bool,
    ) {
        let m = &mut self.memory;
        m.turn += 1;
        m.message_count += 1;
        m.last_intent = intent;
        m.emotional_state = emotion;

        if count_as_topic_progress {
            if topic == m.last_topic {
                m.topic_depth += 1;
                m.repetition_count += 1;
                m.switch_streak = 0;
            } else {
                m.topic_depth = 0;
                m.repetition_count = 0;
                m.switch_streak += 1;
                m.session_focus = Some(topic);
                m.last_topic = topic;
            }

            m.topic_history.push_back(topic);
            while m.topic_history.len() > TOPIC_HISTORY_CAP {
                m.topic_history.pop_front();
            }

            let count = m.topic_frequency.entry(topic).or_insert(0);
            *count += 1;
            if *count >= STRUGGLING_FREQUENCY {
                m.struggling_with = Some(topic);
            }
        }

        if let Some(goal) = capture_goal(raw_input) {
            m.current_goal = Some(goal);
        }
    }

    /// Candidate tips not shown recently.
    ///
    /// When fewer than two are unseen the seen-set is cleared and every
    /// candidate is returned, so advice cycles instead of running dry.
    pub fn select_unseen_advice(&mut self, topic: Topic, candidates: &[&str]) -> Vec<String> {
        let unseen: Vec<String> = candidates
            .iter()
            .filter(|tip| {
                let key = advice_key(topic, tip);
                !self.memory.recent_advice_keys.contains(&key)
            })
            .map(|tip| tip.to_string())
            .collect();

        if unseen.len() >= 2 {
            return unseen;
        }

        tracing::debug!(%topic, "advice cycle exhausted, clearing recent advice");
        self.memory.recent_advice_keys.clear();
        candidates.iter().map(|tip| tip.to_string()).collect()
    }

    /// Record tips as shown, keeping the newest `RECENT_ADVICE_CAP` keys
    pub fn remember_advice<S: AsRef<str>>(&mut self, topic: Topic, tips: &[S]) {
        for tip in tips {
            self.memory
                .recent_advice_keys
                .push_back(advice_key(topic, tip.as_ref()));
        }
        while self.memory.recent_advice_keys.len() > RECENT_ADVICE_CAP {
            self.memory.recent_advice_keys.pop_front();
        }
    }

    /// Whether to ask a diagnostic question before teaching `topic`
    pub fn should_ask_diagnostic(&self, topic: Topic) -> bool {
        let m = &self.memory;
        if m.has_pending_diagnostic() {
            return false;
        }
        if m.emotional_state.needs_support() {
            return true;
        }
        m.repetition_count > 0 && !topic.is_general() && m.turn % DIAGNOSTIC_TURN_INTERVAL == 0
    }

    /// Store the outstanding diagnostic question
    pub fn set_diagnostic_question(&mut self, topic: Topic, question: impl Into<String>) {
        self.memory.pending_diagnostic_question = Some(question.into());
        self.memory.diagnostic_topic = topic;
    }

    /// Drop a pending diagnostic without answering it
    pub fn clear_diagnostic(&mut self) {
        self.memory.pending_diagnostic_question = None;
        self.memory.diagnostic_topic = Topic::General;
    }

    /// Resolve the pending diagnostic if `input` answers it.
    ///
    /// Speed answers win over accuracy answers. Input that answers neither
    /// leaves the question pending and returns `None`.
    pub fn consume_diagnostic_if_answered(&mut self, input: &str) -> Option<&'static str> {
        if !self.memory.has_pending_diagnostic() {
            return None;
        }
        let is_speed = RE_SPEED_ANSWER.is_match(input);
        let is_accuracy = RE_ACCURACY_ANSWER.is_match(input);
        if !is_speed && !is_accuracy {
            return None;
        }

        self.clear_diagnostic();
        Some(if is_speed { SPEED_RESOLUTION } else { ACCURACY_RESOLUTION })
    }
}

/// Whitespace-collapsed goal text, cut to `GOAL_MAX_CHARS` characters
fn capture_goal(raw_input: &str) -> Option<String> {
    let collapsed = raw_input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || !RE_GOAL.is_match(&collapsed) {
        return None;
    }
    if collapsed.chars().count() > GOAL_MAX_CHARS {
        let cut: String = collapsed.chars().take(GOAL_MAX_CHARS).collect();
        Some(format!("{}...", cut))
    } else {
        Some(collapsed)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(manager: &mut MemoryManager, topic: Topic, progress: bool) {
        manager.update_on_turn(Intent::Fallback, topic, Emotion::Neutral, "", progress);
    }

    #[test]
    fn test_counters_always_advance() {
        let mut manager = MemoryManager::new();
        turn(&mut manager, Topic::Chords, false);
        let m = manager.memory();
        assert_eq!(m.turn, 1);
        assert_eq!(m.message_count, 1);
        assert_eq!(m.last_topic, Topic::General);
        assert!(m.topic_history.is_empty());
    }

    #[test]
    fn test_topic_change_resets_depth() {
        let mut manager = MemoryManager::new();
        turn(&mut manager, Topic::Chords, true);
        turn(&mut manager, Topic::Chords, true);
        turn(&mut manager, Topic::Chords, true);
        assert_eq!(manager.memory().topic_depth, 2);
        assert_eq!(manager.memory().repetition_count, 2);

        turn(&mut manager, Topic::Rhythm, true);
        let m = manager.memory();
        assert_eq!(m.topic_depth, 0);
        assert_eq!(m.repetition_count, 0);
        assert_eq!(m.switch_streak, 1);
        assert_eq!(m.last_topic, Topic::Rhythm);
        assert_eq!(m.session_focus, Some(Topic::Rhythm));
    }

    #[test]
    fn test_non_progress_turn_keeps_depth() {
        let mut manager = MemoryManager::new();
        turn(&mut manager, Topic::Chords, true);
        turn(&mut manager, Topic::Chords, true);
        turn(&mut manager, Topic::Rhythm, false);
        let m = manager.memory();
        assert_eq!(m.topic_depth, 1);
        assert_eq!(m.last_topic, Topic::Chords);
        assert_eq!(m.frequency(Topic::Rhythm), 0);
    }

    #[test]
    fn test_switch_streak_resets_on_repeat() {
        let mut manager = MemoryManager::new();
        turn(&mut manager, Topic::Chords, true);
        turn(&mut manager, Topic::Rhythm, true);
        assert_eq!(manager.memory().switch_streak, 2);
        turn(&mut manager, Topic::Rhythm, true);
        assert_eq!(manager.memory().switch_streak, 0);
    }

    #[test]
    fn test_history_is_capped() {
        let mut manager = MemoryManager::new();
        for i in 0..(TOPIC_HISTORY_CAP + 10) {
            let topic = if i % 2 == 0 { Topic::Chords } else { Topic::Scales };
            turn(&mut manager, topic, true);
        }
        assert_eq!(manager.memory().topic_history.len(), TOPIC_HISTORY_CAP);
    }

    #[test]
    fn test_struggling_after_three() {
        let mut manager = MemoryManager::new();
        turn(&mut manager, Topic::Melody, true);
        turn(&mut manager, Topic::Rhythm, true);
        turn(&mut manager, Topic::Melody, true);
        assert_eq!(manager.memory().struggling_with, None);
        turn(&mut manager, Topic::Melody, true);
        assert_eq!(manager.memory().frequency(Topic::Melody), 3);
        assert_eq!(manager.memory().struggling_with, Some(Topic::Melody));
    }

    #[test]
    fn test_goal_captured_even_without_progress() {
        let mut manager = MemoryManager::new();
        manager.update_on_turn(
            Intent::Fallback,
            Topic::General,
            Emotion::Neutral,
            "  I   want to   play faster  ",
            false,
        );
        assert_eq!(manager.memory().current_goal.as_deref(), Some("I want to play faster"));
    }

    #[test]
    fn test_goal_truncated() {
        let long = format!("My goal is {}", "x".repeat(200));
        let goal = capture_goal(&long).unwrap();
        assert_eq!(goal.chars().count(), GOAL_MAX_CHARS + 3);
        assert!(goal.ends_with("..."));
    }

    #[test]
    fn test_no_goal_without_trigger() {
        assert_eq!(capture_goal("play me a scale"), None);
        assert_eq!(capture_goal("   "), None);
    }

    #[test]
    fn test_select_unseen_filters_seen() {
        let mut manager = MemoryManager::new();
        let tips = ["a", "b", "c", "d"];
        manager.remember_advice(Topic::Chords, &["a"]);
        let unseen = manager.select_unseen_advice(Topic::Chords, &tips);
        assert_eq!(unseen, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_select_unseen_cycles_when_exhausted() {
        let mut manager = MemoryManager::new();
        let tips = ["a", "b"];
        manager.remember_advice(Topic::Chords, &["a"]);
        let unseen = manager.select_unseen_advice(Topic::Chords, &tips);
        assert_eq!(unseen, vec!["a", "b"]);
        assert!(manager.memory().recent_advice_keys.is_empty());
    }

    #[test]
    fn test_seen_keys_are_per_topic() {
        let mut manager = MemoryManager::new();
        manager.remember_advice(Topic::Chords, &["a", "b"]);
        let unseen = manager.select_unseen_advice(Topic::Scales, &["a", "b"]);
        assert_eq!(unseen, vec!["a", "b"]);
        assert_eq!(manager.memory().recent_advice_keys.len(), 2);
    }

    #[test]
    fn test_recent_advice_capped() {
        let mut manager = MemoryManager::new();
        let tips: Vec<String> = (0..50).map(|i| format!("tip {}", i)).collect();
        manager.remember_advice(Topic::Practice, &tips);
        let keys = &manager.memory().recent_advice_keys;
        assert_eq!(keys.len(), RECENT_ADVICE_CAP);
        assert_eq!(keys.back().map(String::as_str), Some("practice:tip 49"));
    }

    #[test]
    fn test_diagnostic_on_support_emotion() {
        let mut manager = MemoryManager::new();
        manager.update_on_turn(Intent::Motivation, Topic::Rhythm, Emotion::Frustrated, "", true);
        assert!(manager.should_ask_diagnostic(Topic::Rhythm));
    }

    #[test]
    fn test_diagnostic_every_third_turn_when_repeating() {
        let mut manager = MemoryManager::new();
        turn(&mut manager, Topic::Chords, true);
        turn(&mut manager, Topic::Chords, true);
        assert!(!manager.should_ask_diagnostic(Topic::Chords));
        turn(&mut manager, Topic::Chords, true);
        assert!(manager.should_ask_diagnostic(Topic::Chords));
        assert!(!manager.should_ask_diagnostic(Topic::General));
    }

    #[test]
    fn test_pending_diagnostic_blocks_another() {
        let mut manager = MemoryManager::new();
        manager.update_on_turn(Intent::Motivation, Topic::Rhythm, Emotion::Frustrated, "", true);
        manager.set_diagnostic_question(Topic::Rhythm, "speed or accuracy?");
        assert!(!manager.should_ask_diagnostic(Topic::Rhythm));
    }

    #[test]
    fn test_consume_requires_matching_answer() {
        let mut manager = MemoryManager::new();
        assert_eq!(manager.consume_diagnostic_if_answered("speed"), None);

        manager.set_diagnostic_question(Topic::Rhythm, "speed or accuracy?");
        assert_eq!(manager.consume_diagnostic_if_answered("not sure"), None);
        assert!(manager.memory().has_pending_diagnostic());

        let resolution = manager.consume_diagnostic_if_answered("Accuracy mostly").unwrap();
        assert!(resolution.starts_with("Great, accuracy first"));
        assert!(!manager.memory().has_pending_diagnostic());
        assert_eq!(manager.memory().diagnostic_topic, Topic::General);
    }

    #[test]
    fn test_speed_wins_over_accuracy() {
        let mut manager = MemoryManager::new();
        manager.set_diagnostic_question(Topic::Rhythm, "speed or accuracy?");
        let resolution = manager.consume_diagnostic_if_answered("clean but not fast").unwrap();
        assert!(resolution.contains("lower tempo by 10 BPM"));
    }
}
