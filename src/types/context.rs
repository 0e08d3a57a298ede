//! Learner context supplied by the caller on every turn

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_GENRE, DEFAULT_LEVEL};

/// Skill bucket derived from the free-text level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Contains "beginner" → beginner, contains "advanced" → advanced, else intermediate
    pub fn classify(level: &str) -> SkillLevel {
        let normalized = level.to_lowercase();
        if normalized.contains("beginner") {
            SkillLevel::Beginner
        } else if normalized.contains("advanced") {
            SkillLevel::Advanced
        } else {
            SkillLevel::Intermediate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

/// Learner profile for one call. Only genre and level drive behaviour;
/// the lists feed phrasing and the fallback topic guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Context {
    pub genre: String,
    pub level: String,
    pub recent_topics: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            genre: DEFAULT_GENRE.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            recent_topics: Vec::new(),
            strengths: Vec::new(),
            areas_to_improve: Vec::new(),
        }
    }
}

impl Context {
    /// Context with the given genre and level, nothing else
    pub fn new(genre: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            level: level.into(),
            ..Self::default()
        }
        .normalized()
    }

    /// Trim fields and fill blanks with defaults
    pub fn normalized(mut self) -> Self {
        self.genre = self.genre.trim().to_string();
        self.level = self.level.trim().to_string();
        if self.genre.is_empty() {
            self.genre = DEFAULT_GENRE.to_string();
        }
        if self.level.is_empty() {
            self.level = DEFAULT_LEVEL.to_string();
        }
        self
    }

    pub fn skill_level(&self) -> SkillLevel {
        SkillLevel::classify(&self.level)
    }
}
