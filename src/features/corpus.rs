//! Full text to sentence corpus.
//!
//! `sentences()[i]` and `token_lists()[i]` always describe the same
//! sentence; every feature extractor addresses sentences by that index.

use serde::Serialize;

use crate::errors::{Error, Result};
use crate::nlp::normalizer::Normalizer;
use crate::nlp::tokenizer::{normalize_figure_abbreviations, tokenize_sentences};

/// Corpus-wide statistics, computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentStats {
    pub sentence_count: usize,
    pub token_count: usize,
    pub avg_sentence_len: f64,
}

/// Ordered sentences of one document with their normalized tokens.
#[derive(Debug, Clone, Serialize)]
pub struct Corpus {
    sentences: Vec<String>,
    token_lists: Vec<Vec<String>>,
    stats: DocumentStats,
}

impl Corpus {
    /// Assemble a corpus from pre-split sentences and their tokens.
    pub fn from_parts(sentences: Vec<String>, token_lists: Vec<Vec<String>>) -> Result<Self> {
        if sentences.len() != token_lists.len() {
            return Err(Error::MisalignedCorpus {
                sentences: sentences.len(),
                token_lists: token_lists.len(),
            });
        }
        if sentences.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let sentence_count = sentences.len();
        let token_count: usize = token_lists.iter().map(Vec::len).sum();
        let stats = DocumentStats {
            sentence_count,
            token_count,
            avg_sentence_len: token_count as f64 / sentence_count as f64,
        };

        Ok(Self {
            sentences,
            token_lists,
            stats,
        })
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn token_lists(&self) -> &[Vec<String>] {
        &self.token_lists
    }

    pub fn sentence(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(String::as_str)
    }

    pub fn tokens(&self, index: usize) -> Option<&[String]> {
        self.token_lists.get(index).map(Vec::as_slice)
    }

    pub fn stats(&self) -> DocumentStats {
        self.stats
    }

    /// Number of sentences (never zero).
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Index of the first sentence whose raw text equals `sentence`.
    pub fn locate(&self, sentence: &str) -> Option<usize> {
        self.sentences.iter().position(|s| s == sentence)
    }
}

/// Builds a [`Corpus`] from full document text.
#[derive(Debug, Clone, Copy)]
pub struct CorpusBuilder<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    /// Split into sentences and normalize each one independently.
    pub fn build(&self, full_text: &str) -> Result<Corpus> {
        let sentences = split_sentences(full_text);
        let token_lists = sentences
            .iter()
            .map(|s| self.normalizer.normalize_text(s))
            .collect();
        Corpus::from_parts(sentences, token_lists)
    }
}

/// Sentence split with the figure abbreviation rewrite applied first.
///
/// This is the split the corpus uses, so sentences produced here can be
/// located in a corpus built from the same text.
pub fn split_sentences(text: &str) -> Vec<String> {
    tokenize_sentences(&normalize_figure_abbreviations(text))
}

/// Build a corpus with the process-wide English normalizer.
pub fn build_corpus(full_text: &str) -> Result<Corpus> {
    CorpusBuilder::new(Normalizer::english()?).build(full_text)
}
