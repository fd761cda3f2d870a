extern crate self as regexp_recognizer;

use std::str::FromStr;

#[macro_use]
mod macros;
mod api;
mod config;
mod context;
mod engine;
mod error;
mod pattern;
mod pipeline;

pub use api::{recognize, recognize_all, recognize_verbose, recognize_with_names};
pub use config::{IntentDefinition, Options, load_definitions, parse_definitions};
pub use context::{Activity, ActivityKind, TurnContext};
pub use engine::{
    PatternMetrics, PatternOutcome, RecognitionMetrics, RecognitionRun, Recognizer, Registration, Registry,
    RegistryBuilder,
};
pub use error::{Error, Result};
pub use pattern::{CaptureSlot, Engine, Groups, Pattern, PatternFlags, TextPattern};
pub use pipeline::{Handler, Middleware, Next, Pipeline, RecognizerMiddleware};

#[doc(hidden)]
pub mod __private {
    pub use ::once_cell;
    pub use ::regex;
}

// --- Recognition data model -------------------------------------------------

/// One participating capture group of a successful match.
///
/// `start`/`end` are byte offsets into the recognized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Symbolic group name, caller-supplied name, or the group index as text.
    pub group_name: String,
    /// Captured substring, unconverted.
    pub raw_value: String,
    pub start: usize,
    pub end: usize,
}

impl Entity {
    /// Parse the raw value into `T`.
    ///
    /// # Example
    /// ```
    /// use regexp_recognizer::Entity;
    ///
    /// let e = Entity { group_name: "count".into(), raw_value: "42".into(), start: 0, end: 2 };
    /// assert_eq!(e.value_as::<u32>().unwrap(), 42);
    /// assert!(e.value_as::<bool>().is_err());
    /// ```
    pub fn value_as<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw_value.parse::<T>().map_err(|err| Error::Conversion {
            group: self.group_name.clone(),
            value: self.raw_value.clone(),
            target: std::any::type_name::<T>(),
            reason: err.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw_value
    }
}

/// A registration whose pattern matched the current input.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub name: String,
    /// Confidence supplied at registration; never computed from the match.
    pub score: f64,
    /// Entities in capture-group order.
    pub entities: Vec<Entity>,
}

impl Intent {
    /// First entity with the given group name.
    pub fn entity(&self, group_name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.group_name == group_name)
    }
}

/// Ranked intents recognized for one turn.
///
/// Sorted by descending score; equal scores keep registration order. Holds at
/// most one intent per registration name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognitionResult {
    /// The text recognition ran on.
    pub text: String,
    pub intents: Vec<Intent>,
}

impl RecognitionResult {
    /// Empty result for `text` (nothing matched, or nothing was attempted).
    pub fn empty(text: impl Into<String>) -> Self {
        RecognitionResult { text: text.into(), intents: Vec::new() }
    }

    /// Highest-ranked intent.
    pub fn top(&self) -> Option<&Intent> {
        self.intents.first()
    }

    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intent> {
        self.intents.iter()
    }
}

impl<'a> IntoIterator for &'a RecognitionResult {
    type Item = &'a Intent;
    type IntoIter = std::slice::Iter<'a, Intent>;

    fn into_iter(self) -> Self::IntoIter {
        self.intents.iter()
    }
}
