//! Intent registration.
//!
//! Registration is split into two phases:
//!
//! 1. **Configure** ([`RegistryBuilder`]): single-threaded, fluent, fallible.
//!    Each `add_*` call validates and appends one [`Registration`].
//! 2. **Serve** ([`Registry`]): produced by [`RegistryBuilder::build`]. It has no
//!    mutating methods, so it can be wrapped in an `Arc` and read from any number
//!    of turns at once.
//!
//! ## Invariants
//!
//! - Names are unique; a second registration of a name fails with
//!   [`Error::DuplicateName`].
//! - `Registration::order` equals the registration's index in
//!   `Registry::registrations()`; ranking uses it to break score ties.
//! - Scores are finite and within `[0, 1]`.

use crate::{Error, IntentDefinition, Options, Pattern, PatternFlags, Result};
use std::collections::HashMap;

/// One registered intent pattern.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub pattern: Pattern,
    pub score: f64,
    /// Registration sequence number; only used for tie-breaking.
    pub order: usize,
    /// Names for positional groups, used when the pattern declares none.
    pub group_names: Vec<String>,
}

/// Configuration-phase registry.
///
/// ```
/// use regexp_recognizer::{Registry, regex};
///
/// let registry = Registry::builder()
///     .add_intent("HelpIntent", regex!("(?i)help"), 1.0)?
///     .add_intent("CancelIntent", regex!("(?i)cancel"), 1.0)?
///     .build();
/// assert_eq!(registry.len(), 2);
/// # Ok::<(), regexp_recognizer::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    options: Options,
    registrations: Vec<Registration>,
    by_name: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used by [`add_pattern`](Self::add_pattern) and
    /// [`add_definition`](Self::add_definition) when compiling textual patterns.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Register `name` for an already compiled pattern.
    pub fn add_intent(self, name: impl Into<String>, pattern: impl Into<Pattern>, score: f64) -> Result<Self> {
        self.add_intent_with_names(name, pattern, Vec::<String>::new(), score)
    }

    /// Register `name` with positional group names, applied to unnamed groups
    /// in index order.
    pub fn add_intent_with_names<I, S>(
        mut self,
        name: impl Into<String>,
        pattern: impl Into<Pattern>,
        group_names: I,
        score: f64,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(Error::InvalidScore { name, score });
        }
        if self.by_name.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }

        let order = self.registrations.len();
        let pattern = pattern.into();
        tracing::debug!(intent = %name, pattern = %pattern, score, order, "registered intent");

        self.by_name.insert(name.clone(), order);
        self.registrations.push(Registration {
            name,
            pattern,
            score,
            order,
            group_names: group_names.into_iter().map(Into::into).collect(),
        });
        Ok(self)
    }

    /// Compile `source` with `flags` and the builder's options, then register it.
    pub fn add_pattern(self, name: impl Into<String>, source: &str, flags: PatternFlags, score: f64) -> Result<Self> {
        let pattern = Pattern::compile_with(source, flags, &self.options)?;
        self.add_intent(name, pattern, score)
    }

    /// Register a parsed `NAME[@SCORE]=PATTERN` definition.
    pub fn add_definition(self, def: &IntentDefinition, flags: PatternFlags) -> Result<Self> {
        self.add_pattern(def.name.as_str(), &def.pattern, flags, def.score)
    }

    /// Freeze the registrations for serving.
    pub fn build(self) -> Registry {
        Registry { registrations: self.registrations, by_name: self.by_name }
    }
}

/// Frozen, read-only set of registrations.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    registrations: Vec<Registration>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// All registrations in insertion order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.by_name.get(name).map(|&idx| &self.registrations[idx])
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
