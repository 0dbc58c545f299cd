//! Per-sentence features
//!
//! Query and corpus construction, BM25 ranking, cue-phrase detection and
//! reference windows. Every feature is a set of corpus sentence indices.

pub mod bm25;
pub mod corpus;
pub mod cue;
pub mod query;
pub mod reference;
