//! Pipeline observer — hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic.

use std::time::{Duration, Instant};

pub const STAGE_CORPUS: &str = "corpus";
pub const STAGE_QUERY: &str = "query";
pub const STAGE_BM25: &str = "bm25";
pub const STAGE_CUE: &str = "cue";
pub const STAGE_REFERENCE: &str = "reference";
pub const STAGE_PARAGRAPHS: &str = "paragraph_sentences";

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage reports when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Size of the stage output (sentences, terms or indices).
    pub items: usize,
}

impl StageReport {
    pub fn new(elapsed: Duration, items: usize) -> Self {
        Self { elapsed, items }
    }
}

/// Receives stage start/end callbacks. Every method defaults to a no-op.
pub trait AnalysisObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Observer that records every finished stage in order.
#[derive(Debug, Clone, Default)]
pub struct TimingObserver {
    pub reports: Vec<(&'static str, StageReport)>,
}

impl TimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of elapsed time over all recorded stages.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }

    /// Last report recorded for `stage`.
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .rev()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }
}

impl AnalysisObserver for TimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}
