//! Signals derived from free-text peer reviews: soft-skill keyword hits, sentiment
//! polarity and key phrases.

pub mod key_phrases;
pub mod sentiment;
pub mod soft_skills;
pub mod tokenizer;

use serde::Serialize;

use crate::config::TextConfig;

pub use key_phrases::{extract_key_phrases, DEFAULT_KEY_PHRASES};
pub use sentiment::{SentimentAnalyzer, SentimentScores};
pub use soft_skills::{
    extract_soft_skills, normalize_text, process_text, ProcessedText, SOFT_SKILL_CATALOG,
};
pub use tokenizer::{
    Tokenizer, TokenizerChoice, TokenizerResourceError, TreebankTokenizer, WhitespaceTokenizer,
};

/// Score a text with the default sentiment analyzer.
pub fn score_sentiment(text: &str) -> SentimentScores {
    SentimentAnalyzer.score(text)
}

/// The per-employee bundle memoized during a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSignals {
    pub soft_skills: Vec<String>,
    pub sentiment: SentimentScores,
    pub token_count: usize,
}

impl TextSignals {
    pub fn empty() -> Self {
        Self {
            soft_skills: Vec::new(),
            sentiment: SentimentScores::NEUTRAL,
            token_count: 0,
        }
    }
}

/// Full text breakdown returned by the signals endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    pub soft_skills: Vec<String>,
    pub sentiment: SentimentScores,
    pub key_phrases: Vec<String>,
    pub tokenizer: &'static str,
}

/// Text pipeline bound to the tokenizer chosen at startup.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    tokenizer: TokenizerChoice,
    sentiment: SentimentAnalyzer,
}

impl TextAnalyzer {
    pub fn new(tokenizer: TokenizerChoice) -> Self {
        Self {
            tokenizer,
            sentiment: SentimentAnalyzer,
        }
    }

    pub fn from_config(config: &TextConfig) -> Self {
        Self::new(TokenizerChoice::select(config))
    }

    pub fn tokenizer(&self) -> &TokenizerChoice {
        &self.tokenizer
    }

    pub fn process(&self, text: &str) -> ProcessedText {
        process_text(text, &self.tokenizer)
    }

    pub fn soft_skills(&self, text: &str) -> Vec<String> {
        extract_soft_skills(text)
    }

    pub fn sentiment(&self, text: &str) -> SentimentScores {
        self.sentiment.score(text)
    }

    pub fn key_phrases(&self, text: &str, limit: usize) -> Vec<String> {
        extract_key_phrases(text, limit, &self.tokenizer)
    }

    pub fn signals(&self, text: Option<&str>) -> TextSignals {
        let Some(text) = text.filter(|text| !text.trim().is_empty()) else {
            return TextSignals::empty();
        };
        TextSignals {
            soft_skills: self.soft_skills(text),
            sentiment: self.sentiment(text),
            token_count: self.process(text).tokens.len(),
        }
    }

    pub fn report(&self, text: &str, limit: usize) -> TextReport {
        TextReport {
            soft_skills: self.soft_skills(text),
            sentiment: self.sentiment(text),
            key_phrases: self.key_phrases(text, limit),
            tokenizer: self.tokenizer.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reviews_produce_empty_signals() {
        let analyzer = TextAnalyzer::default();
        assert_eq!(analyzer.signals(None), TextSignals::empty());
        assert_eq!(analyzer.signals(Some("   ")), TextSignals::empty());
    }

    #[test]
    fn signals_bundle_all_derived_values() {
        let analyzer = TextAnalyzer::new(TokenizerChoice::Whitespace(WhitespaceTokenizer));
        let signals = analyzer.signals(Some("Excellent leadership and clear communication."));
        assert_eq!(signals.soft_skills, vec!["communication", "leadership"]);
        assert!(signals.sentiment.compound > 0.5);
        assert_eq!(signals.token_count, 5);
    }
}
