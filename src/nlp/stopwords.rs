//! Stopword filtering
//!
//! English stopwords come from the NLTK list bundled with the `stop-words`
//! crate (its `nltk` feature). The list is loaded once per process and
//! shared read-only through [`english_stopwords`].

use std::sync::{Arc, LazyLock};

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::errors::{Error, Result};

static ENGLISH: LazyLock<Arc<StopwordFilter>> =
    LazyLock::new(|| Arc::new(StopwordFilter::english()));

/// Shared English stopword filter, initialized on first use.
pub fn english_stopwords() -> Arc<StopwordFilter> {
    Arc::clone(&ENGLISH)
}

/// A filter for removing stopwords from text
///
/// Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// The NLTK English list shipped with `stop-words`
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Resolve a language name to its stopword list.
    ///
    /// Only English is supported; anything else is a missing resource.
    pub fn for_language(language: &str) -> Result<Arc<Self>> {
        match language.to_lowercase().as_str() {
            "en" | "english" => Ok(english_stopwords()),
            _ => Err(Error::MissingResource {
                resource: "stopwords",
            }),
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
