//! Okapi BM25 over sentences
//!
//! Each sentence is a "document" and the corpus is the collection. The
//! constants are fixed:
//!
//! score(s) = Σ_t log2(N / sf(t))
//!            · (k1 + 1)·tf(t,s) / (k1·((1 − b) + b·|s|/avgLen) + tf(t,s))
//!            · (k3 + 1)·tf(t,q) / (k3 + tf(t,q))
//!
//! summed over the distinct query terms present in `s`.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::corpus::Corpus;
use super::query::Query;

pub const K1: f64 = 2.0;
pub const K3: f64 = 2.0;
pub const B: f64 = 0.75;
/// Number of sentences kept by [`Bm25Scorer::rank`].
pub const TOP_K: usize = 20;

/// A sentence index with its BM25 score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub index: usize,
    pub score: f64,
}

/// Contribution of one query term to one sentence's score.
pub fn term_weight(
    sentence_count: usize,
    sentence_freq: usize,
    tf_sentence: usize,
    sentence_len: usize,
    avg_sentence_len: f64,
    tf_query: usize,
) -> f64 {
    if tf_sentence == 0 || sentence_freq == 0 {
        return 0.0;
    }
    let isf = (sentence_count as f64 / sentence_freq as f64).log2();
    let tf_s = tf_sentence as f64;
    let tf_q = tf_query as f64;
    let length_norm = (1.0 - B) + B * (sentence_len as f64 / avg_sentence_len);
    let fts = (K1 + 1.0) * tf_s / (K1 * length_norm + tf_s);
    let ftq = (K3 + 1.0) * tf_q / (K3 + tf_q);
    isf * fts * ftq
}

/// Scores a fixed corpus against caption queries.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Scorer<'a> {
    corpus: &'a Corpus,
}

impl<'a> Bm25Scorer<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// BM25 score of every sentence, indexed like the corpus.
    pub fn score_all(&self, query: &Query) -> Vec<f64> {
        let stats = self.corpus.stats();
        let token_lists = self.corpus.token_lists();

        // Sorted so the per-sentence sum is accumulated in a fixed order.
        let mut query_terms: Vec<(&str, usize)> = query.term_frequencies().into_iter().collect();
        query_terms.sort_unstable();

        if query_terms.is_empty() {
            return vec![0.0; token_lists.len()];
        }

        let slot: FxHashMap<&str, usize> = query_terms
            .iter()
            .enumerate()
            .map(|(i, (term, _))| (*term, i))
            .collect();

        // One pass per sentence: query-term frequencies, then sf from them.
        let mut sentence_freq = vec![0usize; query_terms.len()];
        let term_freqs: Vec<Vec<usize>> = token_lists
            .iter()
            .map(|tokens| {
                let mut tf = vec![0usize; query_terms.len()];
                for token in tokens {
                    if let Some(&i) = slot.get(token.as_str()) {
                        tf[i] += 1;
                    }
                }
                for (sf, &count) in sentence_freq.iter_mut().zip(&tf) {
                    if count > 0 {
                        *sf += 1;
                    }
                }
                tf
            })
            .collect();

        token_lists
            .iter()
            .zip(&term_freqs)
            .map(|(tokens, tf)| {
                query_terms
                    .iter()
                    .enumerate()
                    .map(|(i, (_, tf_query))| {
                        term_weight(
                            stats.sentence_count,
                            sentence_freq[i],
                            tf[i],
                            tokens.len(),
                            stats.avg_sentence_len,
                            *tf_query,
                        )
                    })
                    .sum::<f64>()
            })
            .collect()
    }

    /// Top [`TOP_K`] sentences by descending score.
    ///
    /// Ties keep ascending sentence order.
    pub fn rank(&self, query: &Query) -> Vec<ScoredSentence> {
        let mut ranked: Vec<ScoredSentence> = self
            .score_all(query)
            .into_iter()
            .enumerate()
            .map(|(index, score)| ScoredSentence { index, score })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(TOP_K);
        ranked
    }

    /// Indices of the top [`TOP_K`] sentences.
    pub fn top_indices(&self, query: &Query) -> BTreeSet<usize> {
        self.rank(query).into_iter().map(|s| s.index).collect()
    }
}

/// Top-K sentence indices for `query` over `corpus`.
pub fn score(query: &Query, corpus: &Corpus) -> BTreeSet<usize> {
    Bm25Scorer::new(corpus).top_indices(query)
}
