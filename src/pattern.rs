//! Compiled patterns and the engines behind them.
//!
//! Two matching engines are available:
//!
//! - **Standard** (`regex`): linear-time, no look-around or back-references.
//! - **Backtracking** (`fancy-regex`): supports look-around and
//!   back-references, bounded by a backtrack limit.
//!
//! [`Pattern::compile`] prefers the standard engine and only falls back to the
//! backtracking one when the source uses constructs the standard engine
//! rejects. Both engines understand `(?<Name>...)` and `(?P<Name>...)`.
//!
//! ```text
//! source + PatternFlags ──▶ "(?i)source" ──┬─ regex::Regex        (Standard)
//!                                          └─ fancy_regex::Regex  (Backtracking, fallback)
//! ```
//!
//! The matcher never touches engine types directly. It only sees
//! [`TextPattern`] and the engine-neutral [`Groups`] it returns.

use crate::{Error, Options, Result};

bitflags::bitflags! {
    /// Matching flags applied when compiling a textual pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PatternFlags: u8 {
        const IGNORE_CASE          = 1 << 0;
        const MULTI_LINE           = 1 << 1;
        const DOT_MATCHES_NEW_LINE = 1 << 2;
        const IGNORE_WHITESPACE    = 1 << 3;
    }
}

impl PatternFlags {
    /// Render as an inline flag group, e.g. `(?im)`. Empty when no flag is set.
    pub fn inline_prefix(self) -> String {
        let mut letters = String::new();
        if self.contains(PatternFlags::IGNORE_CASE) {
            letters.push('i');
        }
        if self.contains(PatternFlags::MULTI_LINE) {
            letters.push('m');
        }
        if self.contains(PatternFlags::DOT_MATCHES_NEW_LINE) {
            letters.push('s');
        }
        if self.contains(PatternFlags::IGNORE_WHITESPACE) {
            letters.push('x');
        }
        if letters.is_empty() { letters } else { format!("(?{letters})") }
    }
}

/// Which engine a [`Pattern`] runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Standard,
    Backtracking,
}

/// One capture slot of a successful match. Index 0 is the whole match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSlot {
    /// Symbolic name declared by the pattern, if any.
    pub name: Option<String>,
    /// Byte span in the haystack; `None` when the group did not participate.
    pub span: Option<(usize, usize)>,
}

/// Engine-neutral view of the first match of a pattern.
#[derive(Debug, Clone)]
pub struct Groups<'t> {
    haystack: &'t str,
    slots: Vec<CaptureSlot>,
}

impl<'t> Groups<'t> {
    pub(crate) fn new(haystack: &'t str, slots: Vec<CaptureSlot>) -> Self {
        Groups { haystack, slots }
    }

    /// Number of slots, including slot 0.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&CaptureSlot> {
        self.slots.get(index)
    }

    /// Text of slot `index`, or `None` if it did not participate.
    pub fn text(&self, index: usize) -> Option<&'t str> {
        let (start, end) = self.slots.get(index)?.span?;
        self.haystack.get(start..end)
    }

    /// The whole match (slot 0).
    pub fn whole(&self) -> Option<&'t str> {
        self.text(0)
    }
}

/// Anything that can be evaluated against turn text.
///
/// Implemented for [`Pattern`], [`regex::Regex`] and [`fancy_regex::Regex`], so
/// callers can hand either engine's regex straight to the matcher or to
/// [`TurnContext::if_intent_matches`](crate::TurnContext::if_intent_matches).
pub trait TextPattern {
    /// Pattern source as written.
    fn source(&self) -> &str;

    fn is_match(&self, text: &str) -> Result<bool>;

    /// Captures of the first match only, or `None` when nothing matches.
    fn first_captures<'t>(&self, text: &'t str) -> Result<Option<Groups<'t>>>;
}

impl TextPattern for regex::Regex {
    fn source(&self) -> &str {
        self.as_str()
    }

    fn is_match(&self, text: &str) -> Result<bool> {
        Ok(regex::Regex::is_match(self, text))
    }

    fn first_captures<'t>(&self, text: &'t str) -> Result<Option<Groups<'t>>> {
        let Some(caps) = self.captures(text) else {
            return Ok(None);
        };
        let slots = self
            .capture_names()
            .enumerate()
            .map(|(i, name)| CaptureSlot {
                name: name.map(str::to_string),
                span: caps.get(i).map(|m| (m.start(), m.end())),
            })
            .collect();
        Ok(Some(Groups::new(text, slots)))
    }
}

impl TextPattern for fancy_regex::Regex {
    fn source(&self) -> &str {
        self.as_str()
    }

    fn is_match(&self, text: &str) -> Result<bool> {
        fancy_regex::Regex::is_match(self, text).map_err(|e| engine_error(self.as_str(), &e))
    }

    fn first_captures<'t>(&self, text: &'t str) -> Result<Option<Groups<'t>>> {
        let Some(caps) = self.captures(text).map_err(|e| engine_error(self.as_str(), &e))? else {
            return Ok(None);
        };
        let slots = self
            .capture_names()
            .enumerate()
            .map(|(i, name)| CaptureSlot {
                name: name.map(str::to_string),
                span: caps.get(i).map(|m| (m.start(), m.end())),
            })
            .collect();
        Ok(Some(Groups::new(text, slots)))
    }
}

fn engine_error(pattern: &str, err: &fancy_regex::Error) -> Error {
    Error::MatchEngine { pattern: pattern.to_string(), reason: err.to_string() }
}

/// A compiled pattern on one of the two engines.
#[derive(Debug, Clone)]
pub enum Pattern {
    Standard(regex::Regex),
    Backtracking(fancy_regex::Regex),
}

impl Pattern {
    /// Compile `source` with `flags` and default [`Options`].
    ///
    /// # Example
    /// ```
    /// use regexp_recognizer::{Engine, Pattern, PatternFlags};
    ///
    /// let p = Pattern::compile("help", PatternFlags::IGNORE_CASE).unwrap();
    /// assert_eq!(p.engine(), Engine::Standard);
    /// ```
    pub fn compile(source: &str, flags: PatternFlags) -> Result<Self> {
        Self::compile_with(source, flags, &Options::default())
    }

    /// Compile `source` with `flags`, using `options` for the backtracking engine.
    pub fn compile_with(source: &str, flags: PatternFlags, options: &Options) -> Result<Self> {
        let full = format!("{}{}", flags.inline_prefix(), source);

        let standard_err = match regex::Regex::new(&full) {
            Ok(re) => return Ok(Pattern::Standard(re)),
            Err(err) => err,
        };

        match fancy_regex::RegexBuilder::new(&full).backtrack_limit(options.backtrack_limit).build() {
            Ok(re) => {
                tracing::debug!(pattern = %full, "falling back to backtracking engine");
                Ok(Pattern::Backtracking(re))
            }
            Err(fancy_err) => Err(Error::InvalidPattern {
                pattern: source.to_string(),
                reason: format!("{standard_err}; backtracking engine: {fancy_err}"),
            }),
        }
    }

    pub fn engine(&self) -> Engine {
        match self {
            Pattern::Standard(_) => Engine::Standard,
            Pattern::Backtracking(_) => Engine::Backtracking,
        }
    }

    pub fn as_str(&self) -> &str {
        self.source()
    }
}

impl TextPattern for Pattern {
    fn source(&self) -> &str {
        match self {
            Pattern::Standard(re) => re.as_str(),
            Pattern::Backtracking(re) => re.as_str(),
        }
    }

    fn is_match(&self, text: &str) -> Result<bool> {
        match self {
            Pattern::Standard(re) => TextPattern::is_match(re, text),
            Pattern::Backtracking(re) => TextPattern::is_match(re, text),
        }
    }

    fn first_captures<'t>(&self, text: &'t str) -> Result<Option<Groups<'t>>> {
        match self {
            Pattern::Standard(re) => re.first_captures(text),
            Pattern::Backtracking(re) => re.first_captures(text),
        }
    }
}

impl From<regex::Regex> for Pattern {
    fn from(re: regex::Regex) -> Self {
        Pattern::Standard(re)
    }
}

impl From<&regex::Regex> for Pattern {
    fn from(re: &regex::Regex) -> Self {
        Pattern::Standard(re.clone())
    }
}

impl From<fancy_regex::Regex> for Pattern {
    fn from(re: fancy_regex::Regex) -> Self {
        Pattern::Backtracking(re)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source())
    }
}
