//! Recognizer options and textual intent definitions.
//!
//! A definition is a single line of the form:
//!
//! ```text
//! NAME[@SCORE]=PATTERN
//!
//! HelpIntent=(?i)help
//! TacoIntent@0.5=(?i)tacos?
//! ```
//!
//! Definitions files hold one definition per line; blank lines and lines
//! starting with `#` are skipped. The pattern is everything after the first `=`,
//! so patterns may themselves contain `=`.

use crate::{Error, Result};
use std::path::Path;
use std::str::FromStr;

/// Options that affect pattern compilation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Backtracking steps allowed per evaluation on the backtracking engine.
    /// Exceeding it fails that evaluation with [`Error::MatchEngine`].
    pub backtrack_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { backtrack_limit: 1_000_000 }
    }
}

/// A parsed `NAME[@SCORE]=PATTERN` line.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentDefinition {
    pub name: String,
    pub score: f64,
    pub pattern: String,
}

impl FromStr for IntentDefinition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_line(s, 1)
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<IntentDefinition> {
    let invalid = |reason: String| Error::InvalidDefinition { line: line_no, reason };

    let (head, pattern) =
        line.split_once('=').ok_or_else(|| invalid(format!("expected NAME[@SCORE]=PATTERN, got {line:?}")))?;

    let (name, score) = match head.split_once('@') {
        Some((name, score)) => {
            let score = score.trim().parse::<f64>().map_err(|e| invalid(format!("bad score {score:?}: {e}")))?;
            (name.trim(), score)
        }
        None => (head.trim(), 1.0),
    };

    if name.is_empty() {
        return Err(invalid("missing intent name".to_string()));
    }
    if pattern.is_empty() {
        return Err(invalid(format!("intent `{name}` has an empty pattern")));
    }

    Ok(IntentDefinition { name: name.to_string(), score, pattern: pattern.to_string() })
}

/// Parse every definition in `contents`, reporting errors with 1-based line numbers.
pub fn parse_definitions(contents: &str) -> Result<Vec<IntentDefinition>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, line)| parse_line(line.trim_start(), idx + 1))
        .collect()
}

/// Read and parse a definitions file.
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<IntentDefinition>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let defs = parse_definitions(&contents)?;
    tracing::debug!(path = %path.as_ref().display(), count = defs.len(), "loaded intent definitions");
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_pattern_with_default_score() {
        let def: IntentDefinition = "HelpIntent=(?i)help".parse().unwrap();
        assert_eq!(def, IntentDefinition { name: "HelpIntent".into(), score: 1.0, pattern: "(?i)help".into() });
    }

    #[test]
    fn parses_explicit_score_and_keeps_equals_in_pattern() {
        let def: IntentDefinition = "Assign@0.25=(?<key>\\w+)=(?<value>\\w+)".parse().unwrap();
        assert_eq!(def.name, "Assign");
        assert_eq!(def.score, 0.25);
        assert_eq!(def.pattern, "(?<key>\\w+)=(?<value>\\w+)");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!("no separator".parse::<IntentDefinition>(), Err(Error::InvalidDefinition { .. })));
        assert!(matches!("=help".parse::<IntentDefinition>(), Err(Error::InvalidDefinition { .. })));
        assert!(matches!("Help@high=help".parse::<IntentDefinition>(), Err(Error::InvalidDefinition { .. })));
        assert!(matches!("Help=".parse::<IntentDefinition>(), Err(Error::InvalidDefinition { .. })));
    }

    #[test]
    fn definitions_skip_comments_and_report_line_numbers() {
        let contents = "# greetings\nHelpIntent=(?i)help\n\n  CancelIntent@0.8=(?i)cancel\n";
        let defs = parse_definitions(contents).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[1].name, "CancelIntent");
        assert_eq!(defs[1].score, 0.8);

        let err = parse_definitions("HelpIntent=help\n\nbroken\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition { line: 3, .. }));
    }

    #[test]
    fn load_definitions_reports_missing_file() {
        let err = load_definitions("/definitely/not/here/intents.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
