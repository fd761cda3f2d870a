//! Turn pipeline and the recognizer middleware.
//!
//! A [`Pipeline`] runs each inbound activity through an ordered chain of
//! [`Middleware`] and finally the receive handler:
//!
//! ```text
//! Activity ─▶ TurnContext ─▶ mw[0] ─▶ mw[1] ─▶ ... ─▶ handler
//!                              │ next.run(ctx)
//!                              └─ a middleware may stop the chain by not calling next
//! ```
//!
//! [`RecognizerMiddleware`] always calls `next`: recognition is advisory and a
//! turn with zero matches proceeds exactly like one with many.
//!
//! Middleware and handlers are `Send + Sync`; a pipeline can process turns from
//! several threads at once, each with its own `TurnContext`.

use crate::engine::{Recognizer, Registry};
use crate::{Activity, RecognitionResult, Result, TurnContext};
use std::sync::Arc;

/// Receive handler invoked after every middleware has run.
pub type Handler = Box<dyn Fn(&mut TurnContext) -> Result<()> + Send + Sync>;

/// One stage of the turn pipeline.
pub trait Middleware: Send + Sync {
    fn on_turn(&self, ctx: &mut TurnContext, next: Next<'_>) -> Result<()>;
}

/// Continuation for the rest of the chain.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Middleware>],
    handler: Option<&'a Handler>,
}

impl<'a> Next<'a> {
    /// Run the remaining middleware and then the handler.
    pub fn run(self, ctx: &mut TurnContext) -> Result<()> {
        match self.chain.split_first() {
            Some((head, rest)) => head.on_turn(ctx, Next { chain: rest, handler: self.handler }),
            None => match self.handler {
                Some(handler) => handler(ctx),
                None => Ok(()),
            },
        }
    }
}

#[derive(Default)]
pub struct Pipeline {
    middleware: Vec<Arc<dyn Middleware>>,
    handler: Option<Handler>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware stage.
    pub fn use_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Set the receive handler, replacing any previous one.
    pub fn on_receive<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut TurnContext) -> Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Process one activity and return the finished turn context.
    pub fn process(&self, activity: Activity) -> Result<TurnContext> {
        let mut ctx = TurnContext::new(activity);
        Next { chain: &self.middleware, handler: self.handler.as_ref() }.run(&mut ctx)?;
        Ok(ctx)
    }

    /// Send `text` as a message and collect the replies.
    ///
    /// ```
    /// use regexp_recognizer::{Pipeline, RecognizerMiddleware, intents};
    ///
    /// let registry = intents! { "HelpIntent" => "(?i)help" }.unwrap();
    /// let pipeline = Pipeline::new().use_middleware(RecognizerMiddleware::new(registry)).on_receive(|ctx| {
    ///     if ctx.if_intent("HelpIntent") {
    ///         ctx.reply("You selected HelpIntent");
    ///     }
    ///     Ok(())
    /// });
    ///
    /// let replies = pipeline.test("help").unwrap();
    /// assert_eq!(replies[0].text, "You selected HelpIntent");
    /// ```
    pub fn test(&self, text: &str) -> Result<Vec<Activity>> {
        Ok(self.process(Activity::message(text))?.into_responses())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("middleware", &self.middleware.len())
            .field("handler", &self.handler.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// Recognizes every message against a frozen [`Registry`] and attaches the
/// ranked result to the turn.
#[derive(Debug, Clone)]
pub struct RecognizerMiddleware {
    registry: Arc<Registry>,
}

impl RecognizerMiddleware {
    pub fn new(registry: impl Into<Arc<Registry>>) -> Self {
        RecognizerMiddleware { registry: registry.into() }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Middleware for RecognizerMiddleware {
    fn on_turn(&self, ctx: &mut TurnContext, next: Next<'_>) -> Result<()> {
        let result = if ctx.activity().is_message() {
            Recognizer::new(&self.registry).recognize(ctx.text())
        } else {
            tracing::trace!(kind = ?ctx.activity().kind, "skipping recognition for non-message activity");
            RecognitionResult::empty(ctx.text())
        };
        ctx.attach_recognition(result);
        next.run(ctx)
    }
}
