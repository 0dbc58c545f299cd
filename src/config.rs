//! Analysis configuration.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "window_policy": "clipped",
//!   "reject_empty_query": false,
//!   "stopword_language": "en",
//!   "strict": false
//! }
//! ```
//!
//! Every field is optional. BM25 constants and the top-K cutoff are fixed and
//! cannot be configured.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::features::reference::WindowPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Right-edge handling of proximity windows.
    #[serde(default)]
    pub window_policy: WindowPolicy,

    /// Fail with [`Error::EmptyQuery`] instead of scoring an empty caption.
    #[serde(default)]
    pub reject_empty_query: bool,

    #[serde(default = "default_language")]
    pub stopword_language: String,

    /// If `true`, unrecognized fields are errors.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_policy: WindowPolicy::default(),
            reject_empty_query: false,
            stopword_language: default_language(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_window_policy(mut self, policy: WindowPolicy) -> Self {
        self.window_policy = policy;
        self
    }

    pub fn with_reject_empty_query(mut self, reject: bool) -> Self {
        self.reject_empty_query = reject;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(
            self.stopword_language.to_lowercase().as_str(),
            "en" | "english"
        ) {
            return Err(Error::InvalidConfig {
                field: "stopword_language".to_string(),
                message: format!(
                    "unsupported language `{}` (only English is available)",
                    self.stopword_language
                ),
            });
        }

        if self.strict {
            let mut unknown: Vec<&str> = self.unknown_fields.keys().map(String::as_str).collect();
            unknown.sort_unstable();
            if let Some(first) = unknown.first() {
                return Err(Error::InvalidConfig {
                    field: first.to_string(),
                    message: format!("unknown field(s): {}", unknown.join(", ")),
                });
            }
        }

        Ok(())
    }
}
