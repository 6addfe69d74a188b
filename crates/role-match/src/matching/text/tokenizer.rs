use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::{TextConfig, TokenizerMode};

/// Splits already-normalized text into word tokens and raw text into sentences.
pub trait Tokenizer: Send + Sync {
    fn name(&self) -> &'static str;
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Breaks on every `.`, `!` or `?`; blank pieces are dropped.
    fn sentences(&self, text: &str) -> Vec<String> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Naive splitting on Unicode whitespace. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

const DEFAULT_CONTRACTIONS: &[&str] = &["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "st", "jr", "sr", "vs", "etc", "inc", "e.g", "i.e",
];

/// Treebank-style tokenizer: peels punctuation off word edges, splits English
/// contraction suffixes into their own tokens and segments sentences without breaking
/// after known abbreviations or initials. Backed by a word-list resource.
#[derive(Debug, Clone)]
pub struct TreebankTokenizer {
    contractions: Vec<String>,
    abbreviations: HashSet<String>,
}

impl TreebankTokenizer {
    pub fn with_default_resources() -> Self {
        Self {
            contractions: owned(DEFAULT_CONTRACTIONS),
            abbreviations: owned(DEFAULT_ABBREVIATIONS).into_iter().collect(),
        }
    }

    /// Load a word list, one entry per line; `#` starts a comment. Entries ending in `.`
    /// are abbreviations, anything else is a contraction suffix. A list the file leaves
    /// empty keeps its built-in entries.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TokenizerResourceError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| TokenizerResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|err| match err {
            TokenizerResourceError::Io { source, .. } => TokenizerResourceError::Io {
                path: path.to_path_buf(),
                source,
            },
            TokenizerResourceError::Empty { .. } => TokenizerResourceError::Empty {
                path: path.to_path_buf(),
            },
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TokenizerResourceError> {
        let mut contractions = Vec::new();
        let mut abbreviations = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line.map_err(|source| TokenizerResourceError::Io {
                path: PathBuf::new(),
                source,
            })?;
            let entry = line.split('#').next().unwrap_or_default().trim();
            if entry.is_empty() {
                continue;
            }
            match entry.strip_suffix('.') {
                Some(abbreviation) if !abbreviation.is_empty() => {
                    abbreviations.insert(abbreviation.to_lowercase());
                }
                _ => contractions.push(entry.to_lowercase()),
            }
        }

        if contractions.is_empty() && abbreviations.is_empty() {
            return Err(TokenizerResourceError::Empty {
                path: PathBuf::new(),
            });
        }
        if contractions.is_empty() {
            contractions = owned(DEFAULT_CONTRACTIONS);
        }
        if abbreviations.is_empty() {
            abbreviations = owned(DEFAULT_ABBREVIATIONS).into_iter().collect();
        }

        // Longest suffix first so "n't" wins over "'t"-style entries.
        contractions.sort_by(|a, b| b.len().cmp(&a.len()));
        Ok(Self {
            contractions,
            abbreviations,
        })
    }

    /// True when the last word of `before` is a known abbreviation or a single-letter
    /// initial, so a following period does not end the sentence.
    fn ends_with_abbreviation(&self, before: &str) -> bool {
        let Some(word) = before.split_whitespace().last() else {
            return false;
        };
        let word = word.trim_start_matches(|c: char| !is_word_char(c));
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(initial), None) => initial.is_alphabetic(),
            (Some(_), Some(_)) => self.abbreviations.contains(&word.to_lowercase()),
            _ => false,
        }
    }

    fn split_contraction<'a>(&self, word: &'a str) -> (&'a str, Option<&'a str>) {
        let lower = word.to_lowercase();
        if lower.len() != word.len() {
            return (word, None);
        }
        for suffix in &self.contractions {
            if lower.len() > suffix.len() && lower.ends_with(suffix.as_str()) {
                let split_at = word.len() - suffix.len();
                if word.is_char_boundary(split_at) {
                    return (&word[..split_at], Some(&word[split_at..]));
                }
            }
        }
        (word, None)
    }
}

impl Tokenizer for TreebankTokenizer {
    fn name(&self) -> &'static str {
        "treebank"
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            let start = chunk
                .char_indices()
                .find(|(_, c)| is_word_char(*c))
                .map(|(idx, _)| idx);
            let Some(start) = start else {
                tokens.extend(chunk.chars().map(String::from));
                continue;
            };
            let end = chunk
                .char_indices()
                .rev()
                .find(|(_, c)| is_word_char(*c))
                .map(|(idx, c)| idx + c.len_utf8())
                .unwrap_or(chunk.len());

            tokens.extend(chunk[..start].chars().map(String::from));
            let (stem, suffix) = self.split_contraction(&chunk[start..end]);
            tokens.push(stem.to_string());
            if let Some(suffix) = suffix {
                tokens.push(suffix.to_string());
            }
            tokens.extend(chunk[end..].chars().map(String::from));
        }
        tokens
    }

    /// A run of `.`, `!` or `?` (plus closing quotes or brackets) ends a sentence when
    /// whitespace or the end of text follows. A lone period after an abbreviation does not.
    fn sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut idx = 0;
        while idx < chars.len() {
            let (offset, c) = chars[idx];
            if !is_terminator(c) {
                idx += 1;
                continue;
            }

            let mut next = idx;
            while next < chars.len() && is_terminator(chars[next].1) {
                next += 1;
            }
            let lone_period = c == '.' && next == idx + 1;
            while next < chars.len() && matches!(chars[next].1, '"' | '\'' | ')' | ']') {
                next += 1;
            }

            let end = chars.get(next).map_or(text.len(), |(offset, _)| *offset);
            let at_break = chars.get(next).map_or(true, |(_, c)| c.is_whitespace());
            if at_break && !(lone_period && self.ends_with_abbreviation(&text[start..offset])) {
                push_sentence(&mut sentences, &text[start..end]);
                start = end;
            }
            idx = next;
        }
        push_sentence(&mut sentences, &text[start..]);
        sentences
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

fn owned(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|entry| entry.to_string()).collect()
}

/// Reasons a tokenizer resource could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum TokenizerResourceError {
    #[error("failed to read tokenizer resource {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("tokenizer resource {path:?} contains no entries")]
    Empty { path: PathBuf },
}

/// Tokenizer picked once at startup after checking which resources are present.
#[derive(Debug, Clone)]
pub enum TokenizerChoice {
    Treebank(TreebankTokenizer),
    Whitespace(WhitespaceTokenizer),
}

impl TokenizerChoice {
    pub fn select(config: &TextConfig) -> Self {
        if config.tokenizer == TokenizerMode::Whitespace {
            return Self::Whitespace(WhitespaceTokenizer);
        }

        let choice = match &config.tokenizer_resources {
            Some(path) => match TreebankTokenizer::from_path(path) {
                Ok(tokenizer) => Self::Treebank(tokenizer),
                Err(err) if config.tokenizer == TokenizerMode::Treebank => {
                    error!(error = %err, "treebank tokenizer requested but its resources failed to load; using whitespace tokenizer");
                    Self::Whitespace(WhitespaceTokenizer)
                }
                Err(err) => {
                    warn!(error = %err, "tokenizer resources unavailable; using whitespace tokenizer");
                    Self::Whitespace(WhitespaceTokenizer)
                }
            },
            None => Self::Treebank(TreebankTokenizer::with_default_resources()),
        };

        info!(tokenizer = choice.name(), "text tokenizer selected");
        choice
    }

    pub fn is_resource_backed(&self) -> bool {
        matches!(self, Self::Treebank(_))
    }
}

impl Default for TokenizerChoice {
    fn default() -> Self {
        Self::Treebank(TreebankTokenizer::with_default_resources())
    }
}

impl Tokenizer for TokenizerChoice {
    fn name(&self) -> &'static str {
        match self {
            Self::Treebank(inner) => inner.name(),
            Self::Whitespace(inner) => inner.name(),
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            Self::Treebank(inner) => inner.tokenize(text),
            Self::Whitespace(inner) => inner.tokenize(text),
        }
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        match self {
            Self::Treebank(inner) => inner.sentences(text),
            Self::Whitespace(inner) => inner.sentences(text),
        }
    }
}
