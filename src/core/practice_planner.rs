//! Practice Plan Builder: four timed blocks, always `PRACTICE_PLAN_MINUTES` long
//!
//! Level picks the base split; frustration, confusion and motivation replace it
//! with a fixed alternative.

use crate::types::{Context, Emotion, PlanBlock, PracticePlan, SkillLevel, Topic};
use crate::PRACTICE_PLAN_MINUTES;

/// Minutes for (technique, core topic, creativity, performance run)
type Distribution = [u32; 4];

fn base_distribution(level: SkillLevel) -> Distribution {
    match level {
        SkillLevel::Beginner => [8, 9, 5, 3],
        SkillLevel::Advanced => [6, 10, 6, 3],
        SkillLevel::Intermediate => [7, 9, 6, 3],
    }
}

fn adjust_for_emotion(distribution: Distribution, emotion: Emotion) -> Distribution {
    match emotion {
        Emotion::Frustrated => [9, 8, 4, 4],
        Emotion::Confused => [10, 8, 4, 3],
        Emotion::Motivated => [6, 10, 6, 3],
        Emotion::Neutral => distribution,
    }
}

/// Practice plan builder
#[derive(Debug, Default)]
pub struct PracticePlanner;

impl PracticePlanner {
    /// Create new planner
    pub fn new() -> Self {
        Self
    }

    /// Build today's plan
    pub fn build(
        &self,
        context: &Context,
        last_topic: Topic,
        session_focus: Option<Topic>,
        emotion: Emotion,
    ) -> PracticePlan {
        let [technique, core, creativity, performance] =
            adjust_for_emotion(base_distribution(context.skill_level()), emotion);

        let focus = session_focus.unwrap_or(last_topic);
        let genre = if context.genre.is_empty() { "music" } else { context.genre.as_str() };

        let blocks = vec![
            PlanBlock {
                title: "Technique".to_string(),
                minutes: technique,
                detail: format!("Warm-up and precision prep focused on {}.", focus),
            },
            PlanBlock {
                title: "Core Topic".to_string(),
                minutes: core,
                detail: format!(
                    "Deep work on {} for {} with slow-to-clean progression.",
                    last_topic, genre
                ),
            },
            PlanBlock {
                title: "Creativity".to_string(),
                minutes: creativity,
                detail: format!("Create a short {} idea using today's focus.", genre),
            },
            PlanBlock {
                title: "Quick Performance Run".to_string(),
                minutes: performance,
                detail: "Single take, then one note: what improved and what is next.".to_string(),
            },
        ];

        PracticePlan {
            total_minutes: PRACTICE_PLAN_MINUTES,
            blocks,
        }
    }
}

/// Numbered plan text with a fixed header
pub fn format_plan(plan: &PracticePlan) -> String {
    let mut lines = vec![
        format!("\u{1f3af} Today's {}-Minute Plan", plan.total_minutes),
        String::new(),
    ];
    for (index, block) in plan.blocks.iter().enumerate() {
        lines.push(format!("{}. {} ({} min)", index + 1, block.title, block.minutes));
        lines.push(format!("   {}", block.detail));
    }
    lines.join("\n")
}
