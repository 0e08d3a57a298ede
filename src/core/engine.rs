//! Tutor Engine: the per-turn state machine
//!
//! Turn order:
//! 1. Topic, emotion and intent signals from the raw text
//! 2. Acknowledgment / low-signal classification
//! 3. Effective topic (low-signal turns inherit the session's topic)
//! 4. Memory update
//! 5. First matching branch answers:
//!    greeting → topic menu → diagnostic resolved → topic-switch clarifier
//!    → practice plan → diagnostic question → teaching

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::advice::{immediate_application, why_it_matters, AdviceSelector};
use crate::core::composer::{
    compose_diagnostic_prompt, compose_footer, compose_greeting, compose_micro_coach_question,
    compose_practice_plan_response, compose_teaching_response, compose_topic_menu,
    compose_topic_switch_clarifier, topic_check_in, TeachingPayload,
};
use crate::core::emotion_analyzer::EmotionAnalyzer;
use crate::core::intent_scorer::IntentScorer;
use crate::core::memory_manager::MemoryManager;
use crate::core::practice_planner::{format_plan, PracticePlanner};
use crate::core::topic_detector::{is_rapid_switch, TopicDetector};
use crate::types::{
    last_user_message, ChatMessage, Context, DepthMode, Intent, SessionMemory, Topic,
    TurnBranch, TurnOutput,
};
use crate::{GREETING_MAX_WORDS, LOW_SIGNAL_MAX_WORDS, STRUGGLING_FREQUENCY};

lazy_static! {
    /// Whole-message greeting, applied to trimmed lower-cased text
    static ref RE_GREETING: Regex = Regex::new(
        r"^(hi|hello|hey|yo|sup|good morning|good evening|good afternoon)[!. ]*$"
    ).unwrap();

    /// Whole-message acknowledgment
    static ref RE_ACK: Regex = Regex::new(
        r"(?i)^(yes|yeah|yep|ok|okay|sure|then|go on|continue|cool|nice)[!. ]*$"
    ).unwrap();
}

/// Signals shared by every branch of one turn
struct TurnSignals {
    detected_topic: Topic,
    topic: Topic,
    counted_as_progress: bool,
}

/// Rule-based tutor for one conversation
#[derive(Debug, Default)]
pub struct TutorEngine {
    memory: MemoryManager,
    topic_detector: TopicDetector,
    emotion_analyzer: EmotionAnalyzer,
    intent_scorer: IntentScorer,
    advice: AdviceSelector,
    planner: PracticePlanner,
}

impl TutorEngine {
    /// Fresh conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a conversation from stored memory
    pub fn with_memory(memory: SessionMemory) -> Self {
        Self {
            memory: MemoryManager::with_memory(memory),
            ..Self::default()
        }
    }

    /// Current session memory
    pub fn memory(&self) -> &SessionMemory {
        self.memory.memory()
    }

    /// Forget the conversation
    pub fn reset(&mut self) {
        self.memory.reset();
    }

    /// Answer one message
    pub fn respond(&mut self, input: &str, context: &Context) -> String {
        self.process(input, context).response
    }

    /// Answer the last user message of a transcript
    pub fn respond_to_transcript(&mut self, messages: &[ChatMessage], context: &Context) -> TurnOutput {
        let input = last_user_message(messages).unwrap_or("");
        self.process(input, context)
    }

    /// Process one turn and report how it was answered
    pub fn process(&mut self, input: &str, context: &Context) -> TurnOutput {
        let context = context.clone().normalized();
        let text = input.trim();

        // Signals read memory as it was before this turn
        let detected_topic = self.topic_detector.detect(input);
        let emotion_signal = self.emotion_analyzer.analyze(input);
        let previous = self.memory.memory();
        let intent = self
            .intent_scorer
            .score(input, previous.last_intent, previous.last_topic);
        let previous_intent = previous.last_intent;
        let previous_topic = previous.last_topic;

        let ack = RE_ACK.is_match(text);
        let word_count = text.split_whitespace().count();
        let low_signal = word_count <= LOW_SIGNAL_MAX_WORDS;

        let topic = if detected_topic.is_general() && (ack || low_signal) {
            self.fallback_topic(&context)
        } else {
            detected_topic
        };
        let signals = TurnSignals {
            detected_topic,
            topic,
            counted_as_progress: !(ack || (low_signal && detected_topic.is_general())),
        };

        self.memory.update_on_turn(
            intent.intent,
            topic,
            emotion_signal.emotion,
            input,
            signals.counted_as_progress,
        );

        let (branch, response, depth_mode) = if RE_GREETING.is_match(&text.to_lowercase())
            && word_count <= GREETING_MAX_WORDS
        {
            (TurnBranch::Greeting, compose_greeting(&context), None)
        } else if ack && previous_intent == Intent::Greeting {
            (TurnBranch::TopicMenu, compose_topic_menu(&context), None)
        } else if let Some(resolution) = self.memory.consume_diagnostic_if_answered(input) {
            (TurnBranch::DiagnosticResolved, resolution.to_string(), None)
        } else if previous_topic != topic && is_rapid_switch(&self.memory.memory().topic_history) {
            // A clarifier supersedes any open diagnostic
            self.memory.clear_diagnostic();
            (
                TurnBranch::TopicSwitchClarifier,
                compose_topic_switch_clarifier(previous_topic, topic),
                None,
            )
        } else if intent.intent == Intent::PracticePlan {
            (TurnBranch::PracticePlan, self.practice_plan(&context), None)
        } else if self.memory.should_ask_diagnostic(topic) {
            let question = compose_micro_coach_question(intent.intent);
            self.memory.set_diagnostic_question(topic, question);
            let check_in = self.is_recurring(topic).then_some(topic);
            (
                TurnBranch::DiagnosticQuestion,
                compose_diagnostic_prompt(question, emotion_signal.emotion, check_in),
                None,
            )
        } else {
            let (text, mode) = self.teach(
                topic,
                &context,
                emotion_signal.positive_signal,
                intent.confidence_percent(),
            );
            (TurnBranch::Teaching, text, Some(mode))
        };

        let memory = self.memory.memory();
        tracing::debug!(
            turn = memory.turn,
            detected = %signals.detected_topic,
            topic = %signals.topic,
            emotion = %emotion_signal.emotion,
            intent = %intent.intent,
            confidence = intent.confidence,
            branch = branch.code(),
            "turn processed"
        );

        TurnOutput {
            timestamp: chrono::Utc::now(),
            response,
            branch,
            detected_topic: signals.detected_topic,
            topic: signals.topic,
            emotion: emotion_signal.emotion,
            intent,
            depth_mode,
            counted_as_progress: signals.counted_as_progress,
            turn: memory.turn,
        }
    }

    /// Topic for a low-signal turn: focus, then last topic, then the caller's recent topics
    fn fallback_topic(&self, context: &Context) -> Topic {
        let memory = self.memory.memory();
        if let Some(focus) = memory.session_focus {
            return focus;
        }
        if !memory.last_topic.is_general() {
            return memory.last_topic;
        }
        infer_topic_from_context(context)
    }

    fn is_recurring(&self, topic: Topic) -> bool {
        self.memory.memory().frequency(topic) >= STRUGGLING_FREQUENCY
    }

    fn practice_plan(&self, context: &Context) -> String {
        let memory = self.memory.memory();
        let plan = self.planner.build(
            context,
            memory.last_topic,
            memory.session_focus,
            memory.emotional_state,
        );
        compose_practice_plan_response(&format_plan(&plan), memory.struggling_with)
    }

    fn teach(
        &mut self,
        topic: Topic,
        context: &Context,
        positive_signal: bool,
        confidence_percent: u32,
    ) -> (String, DepthMode) {
        let pick = self.advice.pick(&mut self.memory, topic, context);
        let payload = TeachingPayload {
            core_advice: pick.tip_a,
            why_it_matters: why_it_matters(topic, context),
            immediate_application: immediate_application(&pick.tip_b),
        };
        let body = compose_teaching_response(
            context,
            topic,
            &payload,
            self.memory.memory().emotional_state,
            positive_signal,
        );

        let tail = if self.is_recurring(topic) {
            topic_check_in(topic)
        } else {
            compose_footer(pick.mode, confidence_percent)
        };
        (format!("{}\n\n{}", body, tail), pick.mode)
    }
}

/// Guess a topic from the first of the caller's recent topics
fn infer_topic_from_context(context: &Context) -> Topic {
    let recent = context
        .recent_topics
        .first()
        .map(|t| t.to_lowercase())
        .unwrap_or_default();

    if recent.contains("chord") {
        Topic::Chords
    } else if recent.contains("rhythm") || recent.contains("tempo") {
        Topic::Rhythm
    } else if recent.contains("scale") {
        Topic::Scales
    } else if recent.contains("song") {
        Topic::Songwriting
    } else if recent.contains("ear") {
        Topic::EarTraining
    } else if recent.contains("technique") {
        Topic::Technique
    } else {
        Topic::Practice
    }
}

// =============================================================================
// TESTS
// =============================================================================
