//! Recognition run metrics.
//!
//! The intended usage is:
//!
//! - `Recognizer::recognize` for normal operation.
//! - `Recognizer::recognize_with_metrics` for profiling slow patterns and for
//!   seeing which registrations failed to evaluate.
//!
//! Metrics are opt-in; the plain path does not time individual registrations.

use crate::RecognitionResult;
use std::time::Duration;

/// What happened when one registration was evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOutcome {
    Matched { entities: usize },
    NoMatch,
    /// The engine failed; the registration was skipped.
    Failed { reason: String },
}

/// Timing and outcome for a single registration.
#[derive(Debug, Clone)]
pub struct PatternMetrics {
    pub name: String,
    pub order: usize,
    pub duration: Duration,
    pub outcome: PatternOutcome,
}

#[derive(Debug, Default, Clone)]
pub struct RecognitionMetrics {
    /// Total elapsed time for [`Recognizer::recognize_with_metrics`](crate::Recognizer::recognize_with_metrics).
    pub total: Duration,
    /// One entry per registration, in registry order.
    pub patterns: Vec<PatternMetrics>,
}

impl RecognitionMetrics {
    pub fn matched(&self) -> usize {
        self.patterns.iter().filter(|p| matches!(p.outcome, PatternOutcome::Matched { .. })).count()
    }

    pub fn failed(&self) -> usize {
        self.patterns.iter().filter(|p| matches!(p.outcome, PatternOutcome::Failed { .. })).count()
    }

    /// Slowest registration, if any ran.
    pub fn slowest(&self) -> Option<&PatternMetrics> {
        self.patterns.iter().max_by_key(|p| p.duration)
    }
}

/// Recognition output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RecognitionRun {
    pub result: RecognitionResult,
    pub metrics: RecognitionMetrics,
}
