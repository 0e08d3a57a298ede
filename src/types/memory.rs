//! Per-session conversational memory
//!
//! Plain data. All mutation goes through `core::MemoryManager`, once per turn.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::types::{Emotion, Intent, Topic};

/// Everything the tutor remembers about one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMemory {
    /// Turns processed so far
    pub turn: u64,
    /// Messages received so far
    pub message_count: u64,
    pub last_intent: Intent,
    /// Only moves on turns that count as topic progress
    pub last_topic: Topic,
    /// Consecutive progress turns on `last_topic`; selects the advice tier
    pub topic_depth: u32,
    /// Consecutive same-topic progress turns
    pub repetition_count: u32,
    /// Consecutive topic-changing progress turns
    pub switch_streak: u32,
    /// Most recent topics, oldest first, capped at `TOPIC_HISTORY_CAP`
    pub topic_history: VecDeque<Topic>,
    /// Progress turns per topic over the whole session
    pub topic_frequency: BTreeMap<Topic, u32>,
    /// `topic:tip` keys already shown, capped at `RECENT_ADVICE_CAP`
    pub recent_advice_keys: VecDeque<String>,
    /// Emotion of the latest message
    pub emotional_state: Emotion,
    /// Outstanding diagnostic question, at most one
    pub pending_diagnostic_question: Option<String>,
    pub diagnostic_topic: Topic,
    /// Latest goal-like message, truncated
    pub current_goal: Option<String>,
    /// Topic the session moved to most recently
    pub session_focus: Option<Topic>,
    /// Topic that reached the struggling frequency
    pub struggling_with: Option<Topic>,
}

impl SessionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session frequency of one topic
    pub fn frequency(&self, topic: Topic) -> u32 {
        self.topic_frequency.get(&topic).copied().unwrap_or(0)
    }

    pub fn has_pending_diagnostic(&self) -> bool {
        self.pending_diagnostic_question.is_some()
    }

    /// Pretty JSON snapshot, for `/memory` and for resuming a session later
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a snapshot written by [`SessionMemory::to_json`]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Key used to deduplicate shown advice
pub fn advice_key(topic: Topic, tip: &str) -> String {
    format!("{}:{}", topic, tip)
}
