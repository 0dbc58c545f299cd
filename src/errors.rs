//! Error types for corpus construction, configuration and analysis.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or analyzing a document.
#[derive(Debug, Error)]
pub enum Error {
    /// The full text produced no sentences, so the average sentence length
    /// is undefined.
    #[error("corpus is empty: the full text yielded no sentences")]
    EmptyCorpus,

    /// Sentences and token lists handed to [`crate::Corpus::from_parts`]
    /// are not aligned 1:1.
    #[error("corpus is misaligned: {sentences} sentences but {token_lists} token lists")]
    MisalignedCorpus { sentences: usize, token_lists: usize },

    /// The caption normalized to zero terms and the configuration asks for
    /// this to be rejected.
    #[error("query for figure `{figure}` is empty after normalization")]
    EmptyQuery { figure: String },

    /// A static resource (stopword list, cue vocabulary) is unavailable.
    #[error("required resource `{resource}` is missing or empty")]
    MissingResource { resource: &'static str },

    /// No caption is registered for the requested figure.
    #[error("unknown figure `{0}`")]
    UnknownFigure(String),

    #[error("invalid configuration at `{field}`: {message}")]
    InvalidConfig { field: String, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Any of the above, tagged with the document (and figure) it came from.
    #[error("analysis of document `{document}`{} failed: {source}", figure_suffix(.figure))]
    Analysis {
        document: String,
        figure: Option<String>,
        #[source]
        source: Box<Error>,
    },
}

fn figure_suffix(figure: &Option<String>) -> String {
    match figure {
        Some(id) => format!(" (figure `{id}`)"),
        None => String::new(),
    }
}

impl Error {
    /// Attach document context. Already-tagged errors are left untouched.
    pub fn in_document(self, document: &str) -> Self {
        match self {
            Error::Analysis { .. } => self,
            other => Error::Analysis {
                document: document.to_string(),
                figure: None,
                source: Box::new(other),
            },
        }
    }

    /// Attach document and figure context.
    pub fn in_figure(self, document: &str, figure: &str) -> Self {
        match self {
            Error::Analysis { .. } => self,
            other => Error::Analysis {
                document: document.to_string(),
                figure: Some(figure.to_string()),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any document context stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::Analysis { source, .. } => source.root(),
            other => other,
        }
    }
}
