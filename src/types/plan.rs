//! Practice plan structures

use serde::{Deserialize, Serialize};

/// One timed block of a practice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBlock {
    pub title: String,
    pub minutes: u32,
    pub detail: String,
}

/// Ordered blocks plus the session length they add up to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticePlan {
    pub total_minutes: u32,
    pub blocks: Vec<PlanBlock>,
}

impl PracticePlan {
    /// Sum of block minutes; equals `total_minutes` for every built plan
    pub fn block_minutes(&self) -> u32 {
        self.blocks.iter().map(|b| b.minutes).sum()
    }
}

/// Advice tier picked from topic depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthMode {
    Depth1,
    Depth2,
    Application,
    /// Synthesized drill, not taken from the tips table
    Custom,
}

impl DepthMode {
    /// 0 → depth1, 1 → depth2, 2 → application, 3+ → custom
    pub fn from_depth(depth: u32) -> DepthMode {
        match depth {
            0 => DepthMode::Depth1,
            1 => DepthMode::Depth2,
            2 => DepthMode::Application,
            _ => DepthMode::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DepthMode::Depth1 => "depth1",
            DepthMode::Depth2 => "depth2",
            DepthMode::Application => "application",
            DepthMode::Custom => "custom",
        }
    }
}

impl std::fmt::Display for DepthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
