//! Advice Selector: walks the tips table by topic, level and depth tier

use crate::core::tips::topic_tips;
use crate::core::MemoryManager;
use crate::types::{Context, DepthMode, Emotion, Topic};

const FALLBACK_TIP_B: &str = "Repeat with a small measurable improvement.";
const CUSTOM_TIP_B: &str = "Repeat once more and track one metric: clean reps or stable timing.";

/// Base tempo step of the synthesized drill, scaled by tone guidance
const CUSTOM_DRILL_BPM_STEP: f64 = 5.0;

/// Two tips for this turn and the tier they came from
#[derive(Debug, Clone, PartialEq)]
pub struct AdvicePick {
    pub tip_a: String,
    pub tip_b: String,
    pub mode: DepthMode,
}

/// Advice selector
#[derive(Debug, Default)]
pub struct AdviceSelector;

impl AdviceSelector {
    /// Create new selector
    pub fn new() -> Self {
        Self
    }

    /// Pick two tips for `topic` at the memory's current depth and record them as shown
    pub fn pick(&self, memory: &mut MemoryManager, topic: Topic, context: &Context) -> AdvicePick {
        let emotion = memory.memory().emotional_state;
        let mode = DepthMode::from_depth(memory.memory().topic_depth);
        let level_tips = topic_tips(topic).for_level(context.skill_level());

        let bucket = match mode {
            DepthMode::Depth1 => level_tips.depth1,
            DepthMode::Depth2 => level_tips.depth2,
            DepthMode::Application => level_tips.application,
            DepthMode::Custom => {
                let tip_a = custom_drill(topic, context, emotion);
                let tip_b = CUSTOM_TIP_B.to_string();
                memory.remember_advice(topic, &[tip_a.as_str(), tip_b.as_str()]);
                return AdvicePick { tip_a, tip_b, mode };
            }
        };

        let mut unseen = memory.select_unseen_advice(topic, bucket).into_iter();
        let tip_a = unseen
            .next()
            .unwrap_or_else(|| custom_drill(topic, context, emotion));
        let tip_b = unseen.next().unwrap_or_else(|| FALLBACK_TIP_B.to_string());
        memory.remember_advice(topic, &[tip_a.as_str(), tip_b.as_str()]);

        AdvicePick { tip_a, tip_b, mode }
    }
}

/// Synthesized drill for learners deep into one topic
pub fn custom_drill(topic: Topic, context: &Context, emotion: Emotion) -> String {
    let factor = emotion.tone_guidance().simplification_factor;
    let step = (CUSTOM_DRILL_BPM_STEP * factor).round() as u32;
    format!(
        "Custom {} drill for {}: 3 min isolate, 6 min slow clean reps, 4 min build tempo in +{} BPM steps, 2 min record-and-review.",
        topic, context.genre, step
    )
}

/// "Why It Matters" line
pub fn why_it_matters(topic: Topic, context: &Context) -> String {
    if topic.is_general() {
        format!(
            "Building a clear routine improves consistency and confidence in your {} practice.",
            context.genre
        )
    } else {
        format!(
            "Improving {} increases consistency and musical control in your {} playing.",
            topic, context.genre
        )
    }
}

/// "Immediate Application" line built on the second tip
pub fn immediate_application(tip_b: &str) -> String {
    format!("{} Then record 30 seconds and note one improvement point.", tip_b)
}
