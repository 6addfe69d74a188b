use std::io::Write;
use std::path::PathBuf;

use crate::config::{TextConfig, TokenizerMode};
use crate::matching::text::{
    extract_soft_skills, score_sentiment, SentimentScores, TextAnalyzer, Tokenizer,
    TokenizerChoice,
};

fn temp_resource(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("role-match-{}-{name}", std::process::id()));
    let mut file = std::fs::File::create(&path).expect("create resource");
    file.write_all(contents.as_bytes()).expect("write resource");
    path
}

#[test]
fn resource_file_drives_treebank_tokenizer() {
    let path = temp_resource("contractions.txt", "# suffixes\n'll\n");
    let analyzer = TextAnalyzer::from_config(&TextConfig {
        tokenizer: TokenizerMode::Treebank,
        tokenizer_resources: Some(path.clone()),
    });
    assert!(analyzer.tokenizer().is_resource_backed());
    assert_eq!(
        analyzer.tokenizer().tokenize("we'll ship"),
        vec!["we", "'ll", "ship"]
    );
    std::fs::remove_file(path).ok();
}

#[test]
fn tokenizer_choice_changes_key_phrase_boundaries() {
    let review = "Works with Prof. Adams on audits. Prof. Adams trusts the audits.";
    let path = temp_resource("abbreviations.txt", "# titles\nprof.\n");
    let treebank = TextAnalyzer::from_config(&TextConfig {
        tokenizer: TokenizerMode::Treebank,
        tokenizer_resources: Some(path.clone()),
    });
    let whitespace = TextAnalyzer::from_config(&TextConfig {
        tokenizer: TokenizerMode::Whitespace,
        tokenizer_resources: None,
    });

    assert_eq!(
        treebank.key_phrases(review, 5),
        vec![
            "works with prof adams on audits",
            "prof adams trusts the audits"
        ]
    );
    let naive = whitespace.key_phrases(review, 5);
    assert_eq!(naive.len(), 4);
    assert_ne!(naive, treebank.key_phrases(review, 5));
    std::fs::remove_file(path).ok();
}

#[test]
fn missing_resource_degrades_without_error() {
    let analyzer = TextAnalyzer::from_config(&TextConfig {
        tokenizer: TokenizerMode::Auto,
        tokenizer_resources: Some(PathBuf::from("/no/such/dir/contractions.txt")),
    });
    assert_eq!(analyzer.tokenizer().name(), "whitespace");

    let processed = analyzer.process("Clear, calm and focused!");
    assert_eq!(processed.tokens, vec!["clear", "calm", "and", "focused"]);
}

#[test]
fn tokenizer_choice_does_not_change_keyword_hits() {
    let review = "Excellent collaboration; strong attention to detail.";
    let treebank = TextAnalyzer::new(TokenizerChoice::default());
    let whitespace = TextAnalyzer::from_config(&TextConfig {
        tokenizer: TokenizerMode::Whitespace,
        tokenizer_resources: None,
    });
    assert_eq!(treebank.soft_skills(review), whitespace.soft_skills(review));
    assert_eq!(
        extract_soft_skills(review),
        vec!["collaboration", "attention to detail"]
    );
}

#[test]
fn sentiment_defaults_and_polarity() {
    assert_eq!(score_sentiment(""), SentimentScores::NEUTRAL);
    assert!(score_sentiment("A great, smart and funny colleague.").compound > 0.5);
    assert!(score_sentiment("Horrible handoffs and bad estimates.").compound < -0.5);
}

#[test]
fn key_phrases_come_from_the_analyzer() {
    let analyzer = TextAnalyzer::default();
    let phrases = analyzer.key_phrases(
        "Leads design reviews. Design reviews improved quality! Arrives early.",
        2,
    );
    assert_eq!(phrases.len(), 2);
    assert!(phrases.iter().all(|phrase| phrase.contains("design reviews")));
}
