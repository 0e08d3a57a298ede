//! Which path of the turn state machine produced a reply

use serde::{Deserialize, Serialize};

/// Turn branches, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnBranch {
    /// Short greeting, canned reply
    Greeting,
    /// Acknowledgment right after a greeting, topic menu
    TopicMenu,
    /// Answer to the pending diagnostic question
    DiagnosticResolved,
    /// Rapid topic switching, asked which topic to keep
    TopicSwitchClarifier,
    /// Practice plan request
    PracticePlan,
    /// New diagnostic question asked
    DiagnosticQuestion,
    /// Normal teaching turn
    Teaching,
}

impl TurnBranch {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Greeting => "GREETING",
            Self::TopicMenu => "TOPIC_MENU",
            Self::DiagnosticResolved => "DIAGNOSTIC_RESOLVED",
            Self::TopicSwitchClarifier => "TOPIC_SWITCH_CLARIFIER",
            Self::PracticePlan => "PRACTICE_PLAN",
            Self::DiagnosticQuestion => "DIAGNOSTIC_QUESTION",
            Self::Teaching => "TEACHING",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Greeting => "Greeting shortcut",
            Self::TopicMenu => "Offered a topic menu",
            Self::DiagnosticResolved => "Diagnostic answered",
            Self::TopicSwitchClarifier => "Asked to confirm topic switch",
            Self::PracticePlan => "Built a practice plan",
            Self::DiagnosticQuestion => "Asked a diagnostic question",
            Self::Teaching => "Teaching response",
        }
    }
}

impl std::fmt::Display for TurnBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
