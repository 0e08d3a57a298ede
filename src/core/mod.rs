//! Core modules for MELVA

pub mod topic_detector;
pub mod emotion_analyzer;
pub mod intent_scorer;
pub mod memory_manager;
pub mod tips;
pub mod advice;
pub mod practice_planner;
pub mod composer;
pub mod engine;
pub mod generator;
pub mod api;

pub use topic_detector::{is_rapid_switch, TopicDetector};
pub use emotion_analyzer::EmotionAnalyzer;
pub use intent_scorer::IntentScorer;
pub use memory_manager::MemoryManager;
pub use advice::{AdvicePick, AdviceSelector};
pub use practice_planner::{format_plan, PracticePlanner};
pub use engine::TutorEngine;
pub use generator::{GeneratedReply, GeneratorKind, KnowledgeBaseGenerator, ResponseGenerator};
pub use api::{create_router, run_server};
