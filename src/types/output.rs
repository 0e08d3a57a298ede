//! Per-turn output: the reply plus the signals behind it

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{DepthMode, Emotion, IntentScore, Topic, TurnBranch};

/// Output of one processed turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Text to show the learner
    pub response: String,
    /// Branch that produced the text
    pub branch: TurnBranch,
    /// Topic found in the raw text
    pub detected_topic: Topic,
    /// Topic the turn was treated as (after low-signal substitution)
    pub topic: Topic,
    pub emotion: Emotion,
    pub intent: IntentScore,
    /// Advice tier, teaching turns only
    pub depth_mode: Option<DepthMode>,
    /// Whether the turn moved topic memory
    pub counted_as_progress: bool,
    /// Turn number after this turn
    pub turn: u64,
}

impl TurnOutput {
    /// One-line summary for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let summary = self.to_parseable_string();
        match self.branch {
            TurnBranch::Teaching | TurnBranch::PracticePlan => summary.green().to_string(),
            TurnBranch::DiagnosticQuestion | TurnBranch::TopicSwitchClarifier => {
                summary.yellow().to_string()
            }
            _ => summary.bright_black().to_string(),
        }
    }

    /// One-line summary for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "turn={} | branch={} | topic={} | emotion={} | intent={} ({}%)",
            self.turn,
            self.branch.code(),
            self.topic,
            self.emotion,
            self.intent.intent,
            self.intent.confidence_percent()
        )
    }
}
