//! Response Composer: pure rendering, no memory access

use crate::types::{Context, DepthMode, Emotion, Intent, Topic};

const CHALLENGE_BOOST_SUFFIX: &str = "(Challenge +: raise by one small level if clean.)";

/// Sections of a teaching reply
#[derive(Debug, Clone)]
pub struct TeachingPayload {
    pub core_advice: String,
    pub why_it_matters: String,
    pub immediate_application: String,
}

/// Structured teaching reply. Empty lines are left out.
pub fn compose_teaching_response(
    context: &Context,
    topic: Topic,
    payload: &TeachingPayload,
    emotion: Emotion,
    positive_signal: bool,
) -> String {
    let guidance = emotion.tone_guidance();
    let core_advice = if positive_signal {
        format!("{} {}", payload.core_advice, CHALLENGE_BOOST_SUFFIX)
    } else {
        payload.core_advice.clone()
    };
    let context_line = format!("Context: {} | {} | topic={}", context.genre, context.level, topic);

    let lines: [&str; 11] = [
        guidance.validation_line,
        "Core Advice",
        &core_advice,
        "",
        "Why It Matters",
        &payload.why_it_matters,
        "",
        "Immediate Application",
        &payload.immediate_application,
        guidance.encouragement_line,
        &context_line,
    ];

    // Every empty line is dropped, section spacers included
    let out: Vec<&str> = lines.into_iter().filter(|line| !line.is_empty()).collect();
    out.join("\n")
}

/// Plan text, plus a nudge and a multi-day offer when a topic keeps recurring
pub fn compose_practice_plan_response(plan_text: &str, struggling_with: Option<Topic>) -> String {
    let mut lines = vec![plan_text.to_string()];
    if let Some(topic) = struggling_with {
        lines.push(String::new());
        lines.push(topic_check_in(topic));
        lines.push("I can auto-build a 7-day structured improvement plan for it.".to_string());
    }
    lines.join("\n")
}

/// Ask whether to stay on the old topic or switch
pub fn compose_topic_switch_clarifier(previous: Topic, new: Topic) -> String {
    format!("Do you want to stay on {} or switch fully to {}?", previous, new)
}

/// Diagnostic question for an intent
pub fn compose_micro_coach_question(intent: Intent) -> &'static str {
    if intent == Intent::Analysis {
        "Are you struggling more with speed or accuracy?"
    } else {
        "What is the main blocker right now: speed, accuracy, or consistency?"
    }
}

/// Diagnostic reply: empathy line for the emotion, the question, and the
/// recurring-topic check-in when one applies
pub fn compose_diagnostic_prompt(question: &str, emotion: Emotion, check_in: Option<Topic>) -> String {
    let mut out = String::new();
    let validation = emotion.tone_guidance().validation_line;
    if !validation.is_empty() {
        out.push_str(validation);
        out.push('\n');
    }
    out.push_str(question);
    if let Some(topic) = check_in {
        out.push_str("\n\n");
        out.push_str(&topic_check_in(topic));
    }
    out
}

/// Proactive check-in for a recurring topic
pub fn topic_check_in(topic: Topic) -> String {
    format!("I notice {} keeps coming up. Want to focus on improving it this week?", topic)
}

/// Footer for ordinary teaching turns
pub fn compose_footer(mode: DepthMode, confidence_percent: u32) -> String {
    format!("Depth Mode: {} | Intent Confidence: {}%", mode, confidence_percent)
}

/// Canned greeting
pub fn compose_greeting(context: &Context) -> String {
    format!("Hey! Ready to improve your {} today?", context.genre)
}

/// Topic menu offered after greeting + acknowledgment
pub fn compose_topic_menu(context: &Context) -> String {
    format!(
        "Nice. Do you want to start with chords, rhythm, songwriting, or ear training for {}?",
        context.genre
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload() -> TeachingPayload {
        TeachingPayload {
            core_advice: "Play slowly.".to_string(),
            why_it_matters: "It builds control.".to_string(),
            immediate_application: "Record it.".to_string(),
        }
    }

    #[test]
    fn test_neutral_teaching_layout() {
        let ctx = Context::new("jazz", "beginner");
        let text = compose_teaching_response(&ctx, Topic::Chords, &payload(), Emotion::Neutral, false);
        assert_eq!(
            text,
            "Core Advice\nPlay slowly.\nWhy It Matters\nIt builds control.\nImmediate Application\nRecord it.\nContext: jazz | beginner | topic=chords"
        );
    }

    #[test]
    fn test_frustrated_teaching_has_tone_lines() {
        let ctx = Context::default();
        let text = compose_teaching_response(&ctx, Topic::Rhythm, &payload(), Emotion::Frustrated, false);
        assert!(text.starts_with("I hear you."));
        assert!(text.contains("We will target one small win first"));
    }

    #[test]
    fn test_challenge_boost() {
        let ctx = Context::default();
        let text = compose_teaching_response(&ctx, Topic::Rhythm, &payload(), Emotion::Motivated, true);
        assert!(text.contains("Play slowly. (Challenge +: raise by one small level if clean.)"));
    }

    #[test]
    fn test_plan_response_nudge_only_when_struggling() {
        assert_eq!(compose_practice_plan_response("PLAN", None), "PLAN");
        let text = compose_practice_plan_response("PLAN", Some(Topic::Scales));
        assert!(text.contains("I notice scales keeps coming up"));
        assert!(text.contains("7-day"));
    }

    #[test]
    fn test_micro_coach_questions() {
        assert!(compose_micro_coach_question(Intent::Analysis).contains("speed or accuracy"));
        assert!(compose_micro_coach_question(Intent::HowTo).contains("consistency"));
    }

    #[test]
    fn test_diagnostic_prompt() {
        let q = compose_micro_coach_question(Intent::Motivation);
        assert_eq!(compose_diagnostic_prompt(q, Emotion::Neutral, None), q);

        let text = compose_diagnostic_prompt(q, Emotion::Frustrated, Some(Topic::Chords));
        assert!(text.starts_with("I hear you."));
        assert!(text.ends_with("I notice chords keeps coming up. Want to focus on improving it this week?"));
    }

    #[test]
    fn test_clarifier_and_footer() {
        assert_eq!(
            compose_topic_switch_clarifier(Topic::Chords, Topic::EarTraining),
            "Do you want to stay on chords or switch fully to ear_training?"
        );
        assert_eq!(
            compose_footer(DepthMode::Depth2, 42),
            "Depth Mode: depth2 | Intent Confidence: 42%"
        );
    }
}
