//! Document boundary
//!
//! Markup parsing happens elsewhere. Whatever does it hands over a
//! [`DocumentSource`]: ordered figure captions, the paragraphs that
//! reference each figure, and the body text.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A figure and its caption text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub id: String,
    pub caption: String,
}

/// Structural view of one article.
pub trait DocumentSource {
    /// Identifier used in error messages.
    fn id(&self) -> &str;

    /// Figures in document order.
    fn figures(&self) -> &[Figure];

    /// Paragraph texts referencing each figure id, in document order.
    fn figure_references(&self) -> &FxHashMap<String, Vec<String>>;

    /// Body text: paragraphs joined by line breaks.
    fn full_text(&self) -> String;

    /// Caption texts in document order.
    fn captions(&self) -> Vec<&str> {
        self.figures().iter().map(|f| f.caption.as_str()).collect()
    }

    fn caption(&self, figure_id: &str) -> Option<&str> {
        self.figures()
            .iter()
            .find(|f| f.id == figure_id)
            .map(|f| f.caption.as_str())
    }

    fn referencing_paragraphs(&self, figure_id: &str) -> &[String] {
        self.figure_references()
            .get(figure_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// In-memory article already split into paragraphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDocument {
    pub id: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub references: FxHashMap<String, Vec<String>>,
}

impl ArticleDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Parse from the JSON shape produced by [`serde_json::to_string`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    pub fn with_figure(mut self, id: impl Into<String>, caption: impl Into<String>) -> Self {
        self.figures.push(Figure {
            id: id.into(),
            caption: caption.into(),
        });
        self
    }

    /// Record that the paragraph at `paragraph` references `figure_id`.
    ///
    /// Out-of-range paragraph indices are ignored.
    pub fn with_reference(mut self, figure_id: impl Into<String>, paragraph: usize) -> Self {
        if let Some(text) = self.paragraphs.get(paragraph).cloned() {
            self.references
                .entry(figure_id.into())
                .or_default()
                .push(text);
        }
        self
    }
}

impl DocumentSource for ArticleDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn figures(&self) -> &[Figure] {
        &self.figures
    }

    fn figure_references(&self) -> &FxHashMap<String, Vec<String>> {
        &self.references
    }

    fn full_text(&self) -> String {
        self.paragraphs.join("\n")
    }
}
