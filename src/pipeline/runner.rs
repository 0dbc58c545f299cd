//! Pipeline runner — per-document and per-figure analysis.
//!
//! The corpus is built once per document. Cue and reference features depend
//! only on the corpus, so [`FigureAnalyzer::analyze_document`] computes them
//! once and shares them across figures; the caption query and BM25 ranking
//! are computed per figure.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::document::DocumentSource;
use crate::errors::{Error, Result};
use crate::features::bm25::Bm25Scorer;
use crate::features::corpus::{split_sentences, Corpus, CorpusBuilder};
use crate::features::cue::{self, cue_vocabulary};
use crate::features::query::QueryBuilder;
use crate::features::reference::{self, ReferenceFeatures};
use crate::nlp::normalizer::Normalizer;
use crate::pipeline::observer::{
    AnalysisObserver, StageClock, StageReport, STAGE_BM25, STAGE_CORPUS, STAGE_CUE,
    STAGE_PARAGRAPHS, STAGE_QUERY, STAGE_REFERENCE,
};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Features that depend only on the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentFeatures {
    pub cue: BTreeSet<usize>,
    pub reference: ReferenceFeatures,
}

/// All features for one figure, as corpus sentence indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FigureFeatures {
    pub figure_id: String,
    /// Top BM25 sentences for the caption (at most 20).
    pub bm25: BTreeSet<usize>,
    pub cue: BTreeSet<usize>,
    pub reference: BTreeSet<usize>,
    pub proximity: BTreeSet<usize>,
    /// Sentences of the paragraphs that cite this figure.
    pub paragraph_sentences: BTreeSet<usize>,
}

impl FigureFeatures {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Runs the feature extractors over documents.
#[derive(Debug, Clone)]
pub struct FigureAnalyzer {
    config: AnalysisConfig,
    normalizer: Normalizer,
}

impl FigureAnalyzer {
    /// Validate the configuration and load static resources.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = Normalizer::for_language(&config.stopword_language)?;
        if cue_vocabulary().is_empty() {
            return Err(Error::MissingResource {
                resource: "cue_vocabulary",
            });
        }
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Build the sentence corpus of a document's body text.
    pub fn build_corpus<D: DocumentSource + ?Sized>(
        &self,
        doc: &D,
        observer: &mut impl AnalysisObserver,
    ) -> Result<Corpus> {
        trace_stage!(STAGE_CORPUS);
        observer.on_stage_start(STAGE_CORPUS);
        let clock = StageClock::start();
        let corpus = CorpusBuilder::new(&self.normalizer)
            .build(&doc.full_text())
            .map_err(|e| e.in_document(doc.id()))?;
        observer.on_stage_end(STAGE_CORPUS, &StageReport::new(clock.elapsed(), corpus.len()));

        #[cfg(feature = "tracing")]
        {
            let stats = corpus.stats();
            tracing::debug!(
                document = doc.id(),
                sentences = stats.sentence_count,
                tokens = stats.token_count,
                avg_len = stats.avg_sentence_len,
                "built corpus"
            );
        }

        Ok(corpus)
    }

    /// Cue and reference features over a corpus.
    pub fn document_features(
        &self,
        corpus: &Corpus,
        observer: &mut impl AnalysisObserver,
    ) -> DocumentFeatures {
        // Each stage gets its own block so its span closes before the next.
        let cue = {
            trace_stage!(STAGE_CUE);
            observer.on_stage_start(STAGE_CUE);
            let clock = StageClock::start();
            let cue = cue::detect(corpus.token_lists());
            observer.on_stage_end(STAGE_CUE, &StageReport::new(clock.elapsed(), cue.len()));
            cue
        };

        let reference = {
            trace_stage!(STAGE_REFERENCE);
            observer.on_stage_start(STAGE_REFERENCE);
            let clock = StageClock::start();
            let reference = reference::extract_with(corpus.sentences(), self.config.window_policy);
            observer.on_stage_end(
                STAGE_REFERENCE,
                &StageReport::new(clock.elapsed(), reference.reference.len()),
            );
            reference
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cue = cue.len(),
            reference = reference.reference.len(),
            proximity = reference.proximity.len(),
            "document features"
        );

        DocumentFeatures { cue, reference }
    }

    /// Caption-dependent features for one figure, combined with the shared
    /// document features.
    pub fn figure_features<D: DocumentSource + ?Sized>(
        &self,
        doc: &D,
        corpus: &Corpus,
        shared: &DocumentFeatures,
        figure_id: &str,
        observer: &mut impl AnalysisObserver,
    ) -> Result<FigureFeatures> {
        let caption = doc
            .caption(figure_id)
            .ok_or_else(|| Error::UnknownFigure(figure_id.to_string()).in_document(doc.id()))?;

        let query = {
            trace_stage!(STAGE_QUERY);
            observer.on_stage_start(STAGE_QUERY);
            let clock = StageClock::start();
            let query = QueryBuilder::new(&self.normalizer).build(caption);
            observer.on_stage_end(STAGE_QUERY, &StageReport::new(clock.elapsed(), query.len()));
            query
        };

        if query.is_empty() && self.config.reject_empty_query {
            return Err(Error::EmptyQuery {
                figure: figure_id.to_string(),
            }
            .in_figure(doc.id(), figure_id));
        }

        let bm25 = {
            trace_stage!(STAGE_BM25);
            observer.on_stage_start(STAGE_BM25);
            let clock = StageClock::start();
            let bm25 = Bm25Scorer::new(corpus).top_indices(&query);
            observer.on_stage_end(STAGE_BM25, &StageReport::new(clock.elapsed(), bm25.len()));
            bm25
        };

        let paragraph_sentences = {
            trace_stage!(STAGE_PARAGRAPHS);
            observer.on_stage_start(STAGE_PARAGRAPHS);
            let clock = StageClock::start();
            let found = locate_paragraph_sentences(corpus, doc.referencing_paragraphs(figure_id));
            observer.on_stage_end(
                STAGE_PARAGRAPHS,
                &StageReport::new(clock.elapsed(), found.len()),
            );
            found
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            document = doc.id(),
            figure = figure_id,
            query_terms = query.len(),
            bm25 = bm25.len(),
            paragraph_sentences = paragraph_sentences.len(),
            "figure features"
        );

        Ok(FigureFeatures {
            figure_id: figure_id.to_string(),
            bm25,
            cue: shared.cue.clone(),
            reference: shared.reference.reference.clone(),
            proximity: shared.reference.proximity.clone(),
            paragraph_sentences,
        })
    }

    /// Analyze a single figure of a document.
    pub fn analyze<D: DocumentSource + ?Sized>(
        &self,
        doc: &D,
        figure_id: &str,
        observer: &mut impl AnalysisObserver,
    ) -> Result<FigureFeatures> {
        let corpus = self.build_corpus(doc, observer)?;
        let shared = self.document_features(&corpus, observer);
        self.figure_features(doc, &corpus, &shared, figure_id, observer)
    }

    /// Analyze every figure of a document, in document order.
    pub fn analyze_document<D: DocumentSource + ?Sized>(
        &self,
        doc: &D,
        observer: &mut impl AnalysisObserver,
    ) -> Result<Vec<FigureFeatures>> {
        let corpus = self.build_corpus(doc, observer)?;
        let shared = self.document_features(&corpus, observer);
        doc.figures()
            .iter()
            .map(|figure| {
                self.figure_features(doc, &corpus, &shared, &figure.id, &mut *observer)
            })
            .collect()
    }
}

/// Corpus indices of the sentences making up the given paragraphs.
///
/// Paragraph sentences that do not occur in the corpus are skipped.
pub fn locate_paragraph_sentences<S: AsRef<str>>(
    corpus: &Corpus,
    paragraphs: &[S],
) -> BTreeSet<usize> {
    let mut found = BTreeSet::new();
    for paragraph in paragraphs {
        for sentence in split_sentences(paragraph.as_ref()) {
            match corpus.locate(&sentence) {
                Some(index) => {
                    found.insert(index);
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(sentence = %sentence, "paragraph sentence not in corpus");
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ArticleDocument;
    use crate::features::reference::WindowPolicy;
    use crate::pipeline::observer::{NoopObserver, TimingObserver};

    fn article() -> ArticleDocument {
        ArticleDocument::new("doc-1")
            .with_paragraph(
                "We study image classification. Our network improves accuracy over the baseline.",
            )
            .with_paragraph(
                "As Fig. 1 shows, accuracy grows with training data. The effect is large.",
            )
            .with_paragraph("Weather was mild during the study.")
            .with_figure("Fig1", "Classification accuracy of the network.")
            .with_figure("Fig2", "The")
            .with_reference("Fig1", 1)
    }

    #[test]
    fn test_analyze_single_figure() {
        let analyzer = FigureAnalyzer::new(AnalysisConfig::default()).unwrap();
        let features = analyzer.analyze(&article(), "Fig1", &mut NoopObserver).unwrap();

        assert_eq!(features.figure_id, "Fig1");
        // 5 sentences in total, all ranked.
        assert_eq!(features.bm25, (0..5).collect::<BTreeSet<_>>());
        assert_eq!(features.reference, BTreeSet::from([2]));
        assert_eq!(features.proximity, BTreeSet::from([0, 1, 3, 4]));
        assert_eq!(features.paragraph_sentences, BTreeSet::from([2, 3]));
        // "shows" and "large" are cue words, not stopwords.
        assert_eq!(features.cue, BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_left_clipped_config_passes_through() {
        let config = AnalysisConfig::default().with_window_policy(WindowPolicy::LeftClipped);
        let analyzer = FigureAnalyzer::new(config).unwrap();
        let features = analyzer.analyze(&article(), "Fig1", &mut NoopObserver).unwrap();
        assert!(features.proximity.contains(&12));
    }

    #[test]
    fn test_analyze_document_shares_corpus_features() {
        let analyzer = FigureAnalyzer::new(AnalysisConfig::default()).unwrap();
        let mut observer = TimingObserver::new();
        let all = analyzer.analyze_document(&article(), &mut observer).unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].cue, all[1].cue);
        assert_eq!(all[0].reference, all[1].reference);
        // "The" is a stopword: empty query ranks the first sentences in order.
        assert_eq!(all[1].bm25, (0..5).collect::<BTreeSet<_>>());
        assert!(all[1].paragraph_sentences.is_empty());

        let corpus_runs = observer
            .reports
            .iter()
            .filter(|(stage, _)| *stage == STAGE_CORPUS)
            .count();
        assert_eq!(corpus_runs, 1);
        assert_eq!(observer.report(STAGE_CORPUS).map(|r| r.items), Some(5));
    }

    #[test]
    fn test_reject_empty_query() {
        let config = AnalysisConfig::default().with_reject_empty_query(true);
        let analyzer = FigureAnalyzer::new(config).unwrap();
        let err = analyzer
            .analyze(&article(), "Fig2", &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err.root(), Error::EmptyQuery { .. }));
        assert!(err.to_string().contains("doc-1"));
    }

    #[test]
    fn test_unknown_figure() {
        let analyzer = FigureAnalyzer::new(AnalysisConfig::default()).unwrap();
        let err = analyzer
            .analyze(&article(), "Fig7", &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err.root(), Error::UnknownFigure(id) if id == "Fig7"));
    }

    #[test]
    fn test_empty_document() {
        let analyzer = FigureAnalyzer::new(AnalysisConfig::default()).unwrap();
        let doc = ArticleDocument::new("blank").with_figure("Fig1", "Anything.");
        let err = analyzer.analyze(&doc, "Fig1", &mut NoopObserver).unwrap_err();
        assert!(matches!(err.root(), Error::EmptyCorpus));
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            stopword_language: "fr".into(),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            FigureAnalyzer::new(config),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[cfg(feature = "tracing")]
    mod spans {
        use std::sync::{Arc, Mutex};

        use tracing::field::{Field, Visit};
        use tracing::span::{Attributes, Id};
        use tracing::Subscriber;
        use tracing_subscriber::layer::{Context, Layer};
        use tracing_subscriber::registry::LookupSpan;

        #[derive(Default)]
        struct StageField(Option<String>);

        impl Visit for StageField {
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "stage" {
                    self.0 = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "stage" {
                    self.0 = Some(format!("{value:?}"));
                }
            }
        }

        struct Stage(String);

        /// Records each stage span with the stage of its parent span.
        #[derive(Clone, Default)]
        pub struct StageNesting(pub Arc<Mutex<Vec<(String, Option<String>)>>>);

        impl<S> Layer<S> for StageNesting
        where
            S: Subscriber + for<'a> LookupSpan<'a>,
        {
            fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
                let mut field = StageField::default();
                attrs.record(&mut field);
                let (Some(stage), Some(span)) = (field.0, ctx.span(id)) else {
                    return;
                };
                let parent = span.parent().and_then(|parent| {
                    let extensions = parent.extensions();
                    let parent_stage = extensions.get::<Stage>().map(|s| s.0.clone());
                    parent_stage
                });
                span.extensions_mut().insert(Stage(stage.clone()));
                self.0.lock().unwrap().push((stage, parent));
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_stage_spans_are_siblings() {
        use tracing_subscriber::layer::SubscriberExt;

        let nesting = spans::StageNesting::default();
        let subscriber = tracing_subscriber::registry().with(nesting.clone());
        tracing::subscriber::with_default(subscriber, || {
            let analyzer = FigureAnalyzer::new(AnalysisConfig::default()).unwrap();
            analyzer.analyze(&article(), "Fig1", &mut NoopObserver).unwrap();
        });

        let recorded = nesting.0.lock().unwrap().clone();
        let stages: Vec<&str> = recorded.iter().map(|(stage, _)| stage.as_str()).collect();
        assert_eq!(
            stages,
            [
                STAGE_CORPUS,
                STAGE_CUE,
                STAGE_REFERENCE,
                STAGE_QUERY,
                STAGE_BM25,
                STAGE_PARAGRAPHS
            ]
        );
        assert!(
            recorded.iter().all(|(_, parent)| parent.is_none()),
            "nested stage spans: {recorded:?}"
        );
    }

    #[test]
    fn test_features_serialize() {
        let analyzer = FigureAnalyzer::new(AnalysisConfig::default()).unwrap();
        let features = analyzer.analyze(&article(), "Fig1", &mut NoopObserver).unwrap();
        let json: serde_json::Value = serde_json::from_str(&features.to_json().unwrap()).unwrap();
        assert_eq!(json["figure_id"], "Fig1");
        assert_eq!(json["reference"], serde_json::json!([2]));
    }
}
