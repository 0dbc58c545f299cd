//! # figref
//!
//! Sentence features for figure-grounded summarization of scientific
//! articles. Given a figure caption and the article body, it computes four
//! independent sets of sentence indices:
//!
//! - the top 20 sentences by BM25 relevance to the caption,
//! - sentences containing result-reporting cue words,
//! - sentences that literally reference a figure,
//! - the ±10 sentence window around every reference sentence.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use figref::{AnalysisConfig, ArticleDocument, FigureAnalyzer, NoopObserver};
//!
//! let doc = ArticleDocument::new("pmc-1")
//!     .with_paragraph("Our model outperforms the baseline. See Fig. 1.")
//!     .with_figure("Fig1", "Accuracy of the model and the baseline.");
//! let analyzer = FigureAnalyzer::new(AnalysisConfig::default())?;
//! let features = analyzer.analyze(&doc, "Fig1", &mut NoopObserver)?;
//! ```

pub mod config;
pub mod document;
pub mod errors;
pub mod features;
pub mod nlp;
pub mod pipeline;

pub use config::AnalysisConfig;
pub use document::{ArticleDocument, DocumentSource, Figure};
pub use errors::{Error, Result};
pub use features::bm25::{score, Bm25Scorer, ScoredSentence, TOP_K};
pub use features::corpus::{build_corpus, Corpus, CorpusBuilder, DocumentStats};
pub use features::cue::detect as detect_cues;
pub use features::query::{build_query, Query, QueryBuilder};
pub use features::reference::{extract as extract_references, ReferenceFeatures, WindowPolicy};
pub use nlp::normalizer::Normalizer;
pub use pipeline::observer::{AnalysisObserver, NoopObserver, TimingObserver};
pub use pipeline::runner::{DocumentFeatures, FigureAnalyzer, FigureFeatures};
