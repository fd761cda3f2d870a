//! Error type shared by registration, recognition and the turn pipeline.
//!
//! Propagation differs by phase:
//!
//! - Registration errors (`DuplicateName`, `InvalidName`, `InvalidScore`,
//!   `InvalidPattern`) fail fast while the registry is being configured.
//! - `MatchEngine` is produced per registration during recognition. The
//!   recognizer logs it and skips that registration; it never reaches a handler.
//! - `Conversion` is local to a single [`Entity::value_as`](crate::Entity::value_as) call.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("intent `{0}` is already registered")]
    DuplicateName(String),

    #[error("intent name must not be empty")]
    InvalidName,

    #[error("intent `{name}` has score {score}; expected a value in [0, 1]")]
    InvalidScore { name: String, score: f64 },

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("pattern `{pattern}` failed to evaluate: {reason}")]
    MatchEngine { pattern: String, reason: String },

    #[error("cannot convert entity `{group}` value {value:?} to {target}: {reason}")]
    Conversion { group: String, value: String, target: &'static str, reason: String },

    #[error("invalid intent definition on line {line}: {reason}")]
    InvalidDefinition { line: usize, reason: String },

    #[error("turn handler failed: {0}")]
    Handler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convenience constructor for handler code that wants to abort a turn.
    pub fn handler(reason: impl std::fmt::Display) -> Self {
        Error::Handler(reason.to_string())
    }
}
