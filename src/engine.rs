//! Recognition engine.
//!
//! Recognizing one turn's text is a short pipeline:
//!
//! ```text
//! RegistryBuilder::add_intent ...      (registry.rs)
//!          │ build()
//!          v
//!   Registry (frozen, Arc-shared)
//!          │
//! text ────┼─ Recognizer::recognize    (this file)
//!          │    for each registration, in order:
//!          │      match_registration   (matcher.rs)
//!          │        └─ extract_entities (extract.rs)
//!          │      engine error? log + skip
//!          v
//!    rank_intents                      (rank.rs)
//!          │
//!          v
//!   RecognitionResult (+ RecognitionMetrics, metrics.rs)
//! ```
//!
//! The registry is immutable once built, so one `Registry` can serve any number
//! of concurrent turns without locking. Recognition itself is synchronous and
//! allocation-light: one capture pass per registration, first match only.
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: configuration-phase builder and the frozen registry.
//! - `matcher.rs`: one pattern against one input, producing an `Intent`.
//! - `extract.rs`: capture groups to named `Entity` values.
//! - `rank.rs`: score-descending, registration-order tie-breaking.
//! - `metrics.rs`: optional per-registration timings and outcomes.

#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/rank.rs"]
mod rank;
#[path = "engine/registry.rs"]
mod registry;

pub(crate) use matcher::match_pattern;
pub use metrics::{PatternMetrics, PatternOutcome, RecognitionMetrics, RecognitionRun};
pub use registry::{Registration, Registry, RegistryBuilder};

use crate::{Intent, RecognitionResult};
use std::time::Instant;

/// Runs a [`Registry`] over turn text.
///
/// Stateless; borrows the registry for the duration of a call.
#[derive(Debug, Clone, Copy)]
pub struct Recognizer<'r> {
    registry: &'r Registry,
}

impl<'r> Recognizer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Recognizer { registry }
    }

    /// Recognize `text` against every registration.
    ///
    /// Registrations whose pattern fails to evaluate are logged and skipped.
    pub fn recognize(&self, text: &str) -> RecognitionResult {
        let mut matched: Vec<(usize, Intent)> = Vec::new();

        for reg in self.registry.registrations() {
            match matcher::match_registration(text, reg) {
                Ok(Some(intent)) => {
                    tracing::debug!(intent = %reg.name, entities = intent.entities.len(), "pattern matched");
                    matched.push((reg.order, intent));
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(intent = %reg.name, error = %err, "skipping registration");
                }
            }
        }

        let intents = rank::rank_intents(matched);
        tracing::trace!(?intents, "recognition complete");
        RecognitionResult { text: text.to_string(), intents }
    }

    /// Like [`recognize`](Self::recognize) but also records per-registration
    /// timings and outcomes.
    pub fn recognize_with_metrics(&self, text: &str) -> RecognitionRun {
        let start = Instant::now();
        let mut matched: Vec<(usize, Intent)> = Vec::new();
        let mut patterns = Vec::with_capacity(self.registry.len());

        for reg in self.registry.registrations() {
            let reg_start = Instant::now();
            let outcome = match matcher::match_registration(text, reg) {
                Ok(Some(intent)) => {
                    let entities = intent.entities.len();
                    matched.push((reg.order, intent));
                    PatternOutcome::Matched { entities }
                }
                Ok(None) => PatternOutcome::NoMatch,
                Err(err) => {
                    tracing::warn!(intent = %reg.name, error = %err, "skipping registration");
                    PatternOutcome::Failed { reason: err.to_string() }
                }
            };
            patterns.push(PatternMetrics {
                name: reg.name.clone(),
                order: reg.order,
                duration: reg_start.elapsed(),
                outcome,
            });
        }

        let intents = rank::rank_intents(matched);
        RecognitionRun {
            result: RecognitionResult { text: text.to_string(), intents },
            metrics: RecognitionMetrics { total: start.elapsed(), patterns },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, PatternFlags};

    fn names(result: &RecognitionResult) -> Vec<&str> {
        result.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn each_input_matches_only_its_intent() {
        let registry = crate::intents! {
            "HelpIntent" => "(?i)help",
            "CancelIntent" => "(?i)cancel",
            "TacoIntent" => "(?i)taco",
        }
        .unwrap();
        let recognizer = Recognizer::new(&registry);

        assert_eq!(names(&recognizer.recognize("help")), ["HelpIntent"]);
        assert_eq!(names(&recognizer.recognize("cancel")), ["CancelIntent"]);
        assert_eq!(names(&recognizer.recognize("taco")), ["TacoIntent"]);
        assert!(recognizer.recognize("nothing here").is_empty());
    }

    #[test]
    fn matched_intent_carries_registered_score() {
        let registry = crate::intents! { "TacoIntent" => "(?i)taco" @ 0.4 }.unwrap();
        let result = Recognizer::new(&registry).recognize("TACO tuesday");
        assert_eq!(result.len(), 1);
        assert_eq!(result.top().unwrap().score, 0.4);
        assert_eq!(result.text, "TACO tuesday");
    }

    #[test]
    fn results_rank_by_score_then_registration_order() {
        let registry = crate::intents! {
            "Low" => "a" @ 0.2,
            "TieFirst" => "a" @ 0.7,
            "High" => "a" @ 0.9,
            "TieSecond" => "a" @ 0.7,
            "Miss" => "z" @ 1.0,
        }
        .unwrap();
        let result = Recognizer::new(&registry).recognize("aaa");
        assert_eq!(names(&result), ["High", "TieFirst", "TieSecond", "Low"]);
    }

    #[test]
    fn failing_pattern_does_not_block_others() {
        let options = Options { backtrack_limit: 100 };
        let registry = Registry::builder()
            .with_options(options)
            .add_pattern("Slow", r"^(a+)+\1?b", PatternFlags::empty(), 1.0)
            .unwrap()
            .add_pattern("Fine", "aaa", PatternFlags::empty(), 0.5)
            .unwrap()
            .build();

        let input = "a".repeat(30);
        let run = Recognizer::new(&registry).recognize_with_metrics(&input);

        assert_eq!(names(&run.result), ["Fine"]);
        assert!(matches!(run.metrics.patterns[0].outcome, PatternOutcome::Failed { .. }));
        assert_eq!(run.metrics.patterns[1].outcome, PatternOutcome::Matched { entities: 0 });
        assert_eq!(run.metrics.failed(), 1);
    }

    #[test]
    fn metrics_cover_every_registration() {
        let registry = crate::intents! {
            "Greeting" => "(?i)hello (?<who>\\w+)",
            "Farewell" => "(?i)bye",
        }
        .unwrap();
        let run = Recognizer::new(&registry).recognize_with_metrics("hello world");

        assert_eq!(run.metrics.patterns.len(), 2);
        assert_eq!(run.metrics.patterns[0].outcome, PatternOutcome::Matched { entities: 1 });
        assert_eq!(run.metrics.patterns[1].outcome, PatternOutcome::NoMatch);
        assert_eq!(run.metrics.matched(), 1);
        assert!(run.metrics.patterns.iter().all(|p| p.duration <= run.metrics.total));
        assert_eq!(run.result, Recognizer::new(&registry).recognize("hello world"));
    }
}
