//! Token normalization: lowercase, stopword removal, Porter-style stemming.
//!
//! Query and corpus go through the same [`Normalizer`] so their stems are
//! directly comparable.

use std::sync::{Arc, LazyLock};

use rust_stemmers::{Algorithm, Stemmer};

use super::stopwords::{english_stopwords, StopwordFilter};
use super::tokenizer::tokenize_words;
use crate::errors::{Error, Result};

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

static ENGLISH: LazyLock<Option<Normalizer>> =
    LazyLock::new(|| Normalizer::new(english_stopwords()).ok());

/// Lowercase and stem a single word with the English Snowball stemmer.
pub fn stem(word: &str) -> String {
    STEMMER.stem(&word.to_lowercase()).into_owned()
}

/// Turns raw word tokens into stems.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: Arc<StopwordFilter>,
}

impl Normalizer {
    /// Build a normalizer over the given stopword list.
    ///
    /// An empty list means the stopword resource failed to load.
    pub fn new(stopwords: Arc<StopwordFilter>) -> Result<Self> {
        if stopwords.is_empty() {
            return Err(Error::MissingResource {
                resource: "stopwords",
            });
        }
        Ok(Self { stopwords })
    }

    /// Process-wide English normalizer.
    pub fn english() -> Result<&'static Normalizer> {
        ENGLISH.as_ref().ok_or(Error::MissingResource {
            resource: "stopwords",
        })
    }

    /// Build a normalizer for a configured language name.
    pub fn for_language(language: &str) -> Result<Self> {
        Self::new(StopwordFilter::for_language(language)?)
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Normalize word tokens, keeping order and multiplicity.
    ///
    /// Each token is lowercased before the stopword check, then stemmed.
    /// Punctuation-only tokens are dropped.
    pub fn normalize<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|token| {
                let lower = token.as_ref().to_lowercase();
                if !lower.chars().any(char::is_alphanumeric) || self.stopwords.is_stopword(&lower)
                {
                    return None;
                }
                Some(STEMMER.stem(&lower).into_owned())
            })
            .collect()
    }

    /// Tokenize one sentence and normalize its words.
    pub fn normalize_text(&self, sentence: &str) -> Vec<String> {
        self.normalize(&tokenize_words(sentence))
    }
}
