use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::tokenizer::Tokenizer;

/// Soft-skill phrases detected in review text, in reporting order.
///
/// Hyphenated entries never match normalized text (hyphens become spaces) but are kept
/// so reports line up with existing keyword lists.
pub const SOFT_SKILL_CATALOG: &[&str] = &[
    "communication",
    "teamwork",
    "leadership",
    "problem solving",
    "problem-solving",
    "critical thinking",
    "time management",
    "adaptability",
    "flexibility",
    "creativity",
    "work ethic",
    "interpersonal",
    "collaboration",
    "decision making",
    "decision-making",
    "emotional intelligence",
    "conflict resolution",
    "negotiation",
    "persuasion",
    "public speaking",
    "customer service",
    "attention to detail",
    "organization",
    "planning",
    "strategic thinking",
    "analytical",
    "project management",
    "multitasking",
    "resourcefulness",
    "active listening",
    "empathy",
    "patience",
    "confidence",
    "self-motivation",
    "reliability",
    "professionalism",
    "integrity",
    "ethics",
    "cultural awareness",
    "mentoring",
    "coaching",
    "feedback",
    "delegation",
    "resilience",
    "positive attitude",
    "enthusiasm",
    "innovation",
];

static NON_WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[^\w\s]").ok());

/// Normalized review text together with its tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessedText {
    pub text: String,
    pub tokens: Vec<String>,
}

impl ProcessedText {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Lower-case and replace every non-word, non-space character with a space.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    match NON_WORD.as_ref() {
        Some(pattern) => pattern.replace_all(&lowered, " ").into_owned(),
        None => lowered
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect(),
    }
}

pub fn process_text(text: &str, tokenizer: &dyn Tokenizer) -> ProcessedText {
    if text.trim().is_empty() {
        return ProcessedText::default();
    }
    let normalized = normalize_text(text);
    let tokens = tokenizer.tokenize(&normalized);
    ProcessedText {
        text: normalized,
        tokens,
    }
}

/// Catalog phrases present as substrings of the normalized text, in catalog order.
pub fn extract_soft_skills(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let normalized = normalize_text(text);
    SOFT_SKILL_CATALOG
        .iter()
        .filter(|skill| normalized.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}
