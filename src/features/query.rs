//! Caption to query conversion.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::errors::Result;
use crate::nlp::normalizer::Normalizer;
use crate::nlp::tokenizer::{normalize_figure_abbreviations, tokenize_words};

/// Ordered stems of one caption. Duplicates are kept: they are the query
/// term frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Wrap already-normalized terms.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Frequency of each distinct term.
    pub fn term_frequencies(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for term in &self.terms {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Builds [`Query`] values from caption text.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    /// Normalize a caption into a query.
    pub fn build(&self, caption: &str) -> Query {
        let caption = normalize_figure_abbreviations(caption);
        Query {
            terms: self.normalizer.normalize(&tokenize_words(&caption)),
        }
    }
}

/// Build a query with the process-wide English normalizer.
pub fn build_query(caption: &str) -> Result<Query> {
    Ok(QueryBuilder::new(Normalizer::english()?).build(caption))
}
