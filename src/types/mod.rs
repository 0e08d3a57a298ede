//! Core types for MELVA

mod topic;
mod intent;
mod emotion;
mod context;
mod memory;
mod plan;
mod branch;
mod output;
mod message;

pub use topic::Topic;
pub use intent::{Intent, IntentScore};
pub use emotion::{Emotion, EmotionSignal, ToneGuidance};
pub use context::{Context, SkillLevel};
pub use memory::{SessionMemory, advice_key};
pub use plan::{PracticePlan, PlanBlock, DepthMode};
pub use branch::TurnBranch;
pub use output::TurnOutput;
pub use message::{ChatMessage, last_user_message};
