use super::super::text::TextSignals;

const NO_REVIEW_SCORE: f64 = 0.5;
const SENTIMENT_SHARE: f64 = 0.7;
const KEYWORD_SHARE: f64 = 0.3;
/// Keyword hits needed for full keyword credit.
const KEYWORD_SATURATION: f64 = 5.0;

/// Blend review sentiment with soft-skill keyword coverage. `None` means the employee
/// has no peer reviews.
pub fn soft_skill_score(signals: Option<&TextSignals>) -> f64 {
    let Some(signals) = signals else {
        return NO_REVIEW_SCORE;
    };
    let sentiment = (signals.sentiment.compound + 1.0) / 2.0;
    let keywords = (signals.soft_skills.len() as f64 / KEYWORD_SATURATION).min(1.0);
    (SENTIMENT_SHARE * sentiment + KEYWORD_SHARE * keywords).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::text::SentimentScores;

    fn signals(compound: f64, skills: usize) -> TextSignals {
        TextSignals {
            soft_skills: (0..skills).map(|idx| format!("skill-{idx}")).collect(),
            sentiment: SentimentScores {
                compound,
                ..SentimentScores::NEUTRAL
            },
            token_count: 10,
        }
    }

    #[test]
    fn missing_reviews_are_neutral() {
        assert_eq!(soft_skill_score(None), 0.5);
    }

    #[test]
    fn blends_sentiment_and_keywords() {
        let score = soft_skill_score(Some(&signals(0.5, 2)));
        assert!((score - (0.7 * 0.75 + 0.3 * 0.4)).abs() < 1e-12);
    }

    #[test]
    fn keyword_credit_saturates() {
        assert_eq!(soft_skill_score(Some(&signals(1.0, 9))), 1.0);
        assert_eq!(soft_skill_score(Some(&signals(-1.0, 0))), 0.0);
    }
}
