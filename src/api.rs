use crate::engine::{self, RecognitionRun, Recognizer, Registry};
use crate::{Intent, RecognitionResult, Result, TextPattern};

/// Match a single pattern against `text` without a registry.
///
/// The returned intent is named after the pattern source. Engine failures are
/// returned to the caller rather than logged.
///
/// # Example
/// ```
/// use regexp_recognizer::recognize;
///
/// let re = regex::Regex::new(r"how (?<One>.*) (?<Two>.*)").unwrap();
/// let intent = recognize("how 11111 22222", &re, 1.0).unwrap().unwrap();
/// assert_eq!(intent.entities[0].group_name, "One");
/// ```
pub fn recognize<P: TextPattern + ?Sized>(text: &str, pattern: &P, score: f64) -> Result<Option<Intent>> {
    recognize_with_names::<P, &str>(text, pattern, &[], score)
}

/// Like [`recognize`], naming unnamed groups from `names` by position.
pub fn recognize_with_names<P, S>(text: &str, pattern: &P, names: &[S], score: f64) -> Result<Option<Intent>>
where
    P: TextPattern + ?Sized,
    S: AsRef<str>,
{
    engine::match_pattern(text, pattern.source(), pattern, names, score)
}

/// Run every registration in `registry` over `text`.
pub fn recognize_all(registry: &Registry, text: &str) -> RecognitionResult {
    Recognizer::new(registry).recognize(text)
}

/// Run `registry` over `text` and return per-registration timings and outcomes.
///
/// This is useful for profiling patterns and spotting registrations that fail
/// to evaluate. [`recognize_all`] does not collect these.
pub fn recognize_verbose(registry: &Registry, text: &str) -> RecognitionRun {
    Recognizer::new(registry).recognize_with_metrics(text)
}
