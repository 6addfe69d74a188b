use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

static VADER: LazyLock<SentimentIntensityAnalyzer<'static>> =
    LazyLock::new(SentimentIntensityAnalyzer::new);

/// Polarity proportions plus the normalized compound score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    /// Normalized aggregate in [-1, 1].
    pub compound: f64,
}

impl SentimentScores {
    pub const NEUTRAL: SentimentScores = SentimentScores {
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
        compound: 0.0,
    };

    fn from_polarity(scores: &HashMap<&str, f64>) -> Self {
        let read = |key: &str, fallback: f64| {
            scores
                .get(key)
                .copied()
                .filter(|value| value.is_finite())
                .unwrap_or(fallback)
        };
        Self {
            positive: read("pos", 0.0).clamp(0.0, 1.0),
            negative: read("neg", 0.0).clamp(0.0, 1.0),
            neutral: read("neu", 1.0).clamp(0.0, 1.0),
            compound: read("compound", 0.0).clamp(-1.0, 1.0),
        }
    }
}

impl Default for SentimentScores {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// VADER lexicon and rule based polarity scorer.
///
/// The full VADER lexicon ships with the analyzer, which is built once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn score(&self, text: &str) -> SentimentScores {
        if text.trim().is_empty() {
            return SentimentScores::NEUTRAL;
        }
        SentimentScores::from_polarity(&VADER.polarity_scores(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> SentimentScores {
        SentimentAnalyzer.score(text)
    }

    fn assert_compound(text: &str, expected: f64) {
        let actual = score(text).compound;
        assert!(
            (actual - expected).abs() < 1e-3,
            "{text:?}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn blank_text_is_neutral() {
        assert_eq!(score(""), SentimentScores::NEUTRAL);
        assert_eq!(score("   \n"), SentimentScores::NEUTRAL);
    }

    #[test]
    fn reference_sentences_keep_their_compound_scores() {
        assert_compound("The book was good.", 0.4404);
        assert_compound("VADER is smart, handsome, and funny.", 0.8316);
        assert_compound("VADER is not smart, handsome, nor funny.", -0.7424);
    }

    #[test]
    fn multi_sentence_reviews_sum_valence_before_normalizing() {
        // (1.9 + 1.7) / sqrt(3.6^2 + 15)
        assert_compound("The book was good. The plot was smart.", 0.6808);
        // (1.9 - 2.5) / sqrt(0.6^2 + 15)
        assert_compound("The book was good. The ending was horrible.", -0.1531);
    }

    #[test]
    fn words_outside_a_small_core_list_still_count() {
        assert!(score("A lovely, cheerful teammate.").compound > 0.5);
        assert!(score("Stupid, ugly handoffs.").compound < -0.5);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(score("she is good").compound > 0.0);
        assert!(score("she is not good").compound < 0.0);
    }

    #[test]
    fn boosters_and_emphasis_raise_intensity() {
        let plain = score("the review was good").compound;
        let boosted = score("the review was very good").compound;
        let shouted = score("the review was very good!!").compound;
        assert!(boosted > plain);
        assert!(shouted > boosted);
    }

    #[test]
    fn contrast_shifts_weight_to_the_clause_after_but() {
        let result = score("communication is good but deadlines are a problem");
        assert!(result.compound < 0.0);
    }

    #[test]
    fn proportions_sum_to_one() {
        let result = score("Great teamwork, a few mistakes, otherwise steady.");
        let total = result.positive + result.negative + result.neutral;
        assert!((total - 1.0).abs() <= 0.002);
        assert!((-1.0..=1.0).contains(&result.compound));
    }
}
