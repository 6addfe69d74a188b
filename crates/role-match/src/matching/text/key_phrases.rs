use std::collections::HashMap;

use super::soft_skills::{process_text, ProcessedText};
use super::tokenizer::Tokenizer;

pub const DEFAULT_KEY_PHRASES: usize = 5;

/// Rank sentences by the corpus frequency of their tokens, favoring earlier sentences,
/// and return the normalized text of the best `limit` with whitespace runs collapsed.
/// Sentence boundaries come from the tokenizer.
pub fn extract_key_phrases(text: &str, limit: usize, tokenizer: &dyn Tokenizer) -> Vec<String> {
    if text.trim().is_empty() || limit == 0 {
        return Vec::new();
    }

    let sentences: Vec<ProcessedText> = tokenizer
        .sentences(text)
        .iter()
        .map(|sentence| process_text(sentence, tokenizer))
        .filter(|processed| !processed.is_empty())
        .collect();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for sentence in &sentences {
        for token in &sentence.tokens {
            if token.chars().count() > 1 {
                *frequency.entry(token.as_str()).or_default() += 1;
            }
        }
    }

    let total = sentences.len() as f64;
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let raw: usize = sentence
                .tokens
                .iter()
                .filter_map(|token| frequency.get(token.as_str()))
                .sum();
            let position_weight = 1.0 - 0.5 * idx as f64 / total;
            (idx, raw as f64 * position_weight)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .take(limit)
        .map(|(idx, _)| {
            sentences[idx]
                .text
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
