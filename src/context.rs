//! Per-turn context and the query surface handlers use.
//!
//! A [`TurnContext`] is created for each inbound [`Activity`] and dropped when
//! the turn ends. Its recognition state is trivial:
//!
//! ```text
//! unset ──attach_recognition──▶ set ──(read any number of times)──▶ dropped
//! ```
//!
//! The two queries are deliberately independent:
//!
//! - [`TurnContext::if_intent`] only looks at the attached result.
//! - [`TurnContext::if_intent_matches`] only looks at the raw text.

use crate::{Intent, RecognitionResult, TextPattern};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    Message,
    ConversationUpdate,
    Other(String),
}

/// An inbound or outbound unit of a conversation.
#[derive(Debug, Clone)]
pub struct Activity {
    pub kind: ActivityKind,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl Activity {
    /// A message activity stamped with the current local time.
    pub fn message(text: impl Into<String>) -> Self {
        Activity { kind: ActivityKind::Message, text: text.into(), timestamp: Local::now() }
    }

    pub fn conversation_update() -> Self {
        Activity { kind: ActivityKind::ConversationUpdate, text: String::new(), timestamp: Local::now() }
    }

    pub fn is_message(&self) -> bool {
        self.kind == ActivityKind::Message
    }
}

#[derive(Debug)]
pub struct TurnContext {
    activity: Activity,
    recognized: Option<RecognitionResult>,
    responses: Vec<Activity>,
}

impl TurnContext {
    pub fn new(activity: Activity) -> Self {
        TurnContext { activity, recognized: None, responses: Vec::new() }
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Raw text of the inbound activity.
    pub fn text(&self) -> &str {
        &self.activity.text
    }

    /// Attach the turn's recognition result, replacing any earlier one.
    pub fn attach_recognition(&mut self, result: RecognitionResult) {
        if self.recognized.is_some() {
            tracing::debug!("replacing recognition result already attached to this turn");
        }
        self.recognized = Some(result);
    }

    /// The attached result, or `None` when no recognizer ran.
    pub fn recognized(&self) -> Option<&RecognitionResult> {
        self.recognized.as_ref()
    }

    pub fn top_intent(&self) -> Option<&Intent> {
        self.recognized.as_ref()?.top()
    }

    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.recognized.as_ref()?.get(name)
    }

    /// True iff an intent called `name` was recognized this turn.
    pub fn if_intent(&self, name: &str) -> bool {
        self.intent(name).is_some()
    }

    /// True iff `pattern` matches the raw turn text.
    ///
    /// Ignores the registry and the attached result entirely. An engine failure
    /// is logged and reported as no match.
    pub fn if_intent_matches<P: TextPattern + ?Sized>(&self, pattern: &P) -> bool {
        match pattern.is_match(self.text()) {
            Ok(hit) => hit,
            Err(err) => {
                tracing::warn!(pattern = %pattern.source(), error = %err, "ad hoc pattern failed");
                false
            }
        }
    }

    /// Queue a message reply for this turn.
    pub fn reply(&mut self, text: impl Into<String>) {
        self.responses.push(Activity::message(text));
    }

    pub fn responses(&self) -> &[Activity] {
        &self.responses
    }

    pub fn into_responses(self) -> Vec<Activity> {
        self.responses
    }
}
