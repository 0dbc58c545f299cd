//! Cue-phrase detection
//!
//! Flags sentences containing rhetorical vocabulary typical of result
//! reporting ("outperform", "baseline", "significantly", ...). The
//! vocabulary is stemmed once per process with the corpus stemmer, so it is
//! always in the same normalized form as corpus tokens.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use crate::nlp::normalizer::stem;

/// Surface forms of the cue vocabulary. "significant" and "significantly"
/// share a Snowball stem, so the stemmed vocabulary has 139 entries.
const CUE_WORDS: [&str; 140] = [
    "accuracy", "describe", "illustrate", "original", "run", "achieve", "detail", "improve",
    "outperform", "scenario", "actual", "determine", "increase", "output", "schema",
    "additional", "different", "infer", "parameter", "scheme", "aggregate", "discuss",
    "information", "partition", "score", "algorithm", "distance", "input", "percentage",
    "slope", "analysis", "distribution", "instance", "performance", "show", "approximate",
    "document", "interesting", "plot", "shown", "assign", "error", "label", "point",
    "significant", "average", "estimate", "large", "position", "significantly", "baseline",
    "evaluate", "larger", "precision", "similar", "case", "execute", "length", "predicate",
    "size", "collection", "exist", "level", "previous", "small", "column", "expect", "line",
    "problem", "state", "compare", "experimental", "list", "procedure", "step", "comparison",
    "fact", "maximum", "process", "structure", "compute", "feature", "mean", "produce",
    "system", "concept", "figure", "measure", "range", "table", "consist", "final", "method",
    "rank", "technique", "constraint", "focus", "metric", "rate", "test", "content",
    "frequency", "minimum", "row", "threshold", "correlation", "frequent", "model", "record",
    "time", "cost", "good", "note", "relate", "total", "curve", "graph", "number",
    "represent", "value", "data", "hierarchy", "observe", "require", "vary", "dataset",
    "high", "obtain", "result", "variable", "define", "higher", "operate", "return",
    "x-axis", "depict", "highlight", "optimize", "rule", "y-axis",
];

static CUE_VOCABULARY: LazyLock<FxHashSet<String>> =
    LazyLock::new(|| CUE_WORDS.iter().map(|word| stem(word)).collect());

/// Stemmed cue vocabulary shared by every call.
pub fn cue_vocabulary() -> &'static FxHashSet<String> {
    &CUE_VOCABULARY
}

/// Whether any token of a normalized sentence is a cue stem.
pub fn is_cue_sentence<S: AsRef<str>>(tokens: &[S]) -> bool {
    let vocabulary = cue_vocabulary();
    tokens.iter().any(|t| vocabulary.contains(t.as_ref()))
}

/// Indices of sentences containing at least one cue stem.
pub fn detect<S: AsRef<str>>(token_lists: &[Vec<S>]) -> BTreeSet<usize> {
    token_lists
        .iter()
        .enumerate()
        .filter(|(_, tokens)| is_cue_sentence(tokens.as_slice()))
        .map(|(i, _)| i)
        .collect()
}
