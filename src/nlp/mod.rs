//! Natural Language Processing components
//!
//! This module provides tokenization, stopword filtering and stemming.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;
