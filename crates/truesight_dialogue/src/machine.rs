//! Turn resolution.
//!
//! Given the previous context (or none) and a parsed question, produces the
//! reply text and the next context. When the current context cannot answer,
//! the question is reclassified; when that fails too, a bare "no" or "yes"
//! still gets a sensible answer.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};
use truesight_foundation::{Error, ErrorContext, ErrorKind, Result};
use truesight_parser::ParsedQuestion;

use crate::classifier::IntentClassifier;
use crate::context::{ActiveContext, Context, Next, Refusal, Reply};
use crate::engine::EngineConfig;
use crate::reporter::UsageReporter;
use crate::respond;

/// Everything a context may use while answering, besides the question.
#[derive(Clone, Copy)]
pub struct TurnEnv<'a> {
    /// Engine tuning.
    pub config: &'a EngineConfig,
    /// Usage side channel.
    pub reporter: &'a dyn UsageReporter,
    /// Caller identifier, for usage reporting.
    pub user: Option<&'a str>,
    /// The text as the user typed it, before normalization.
    pub raw_text: Option<&'a str>,
}

impl TurnEnv<'_> {
    /// Picks a sample question, deterministically for a given seed and text.
    #[must_use]
    pub fn sample(&self, question: &ParsedQuestion<'_>) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed ^ text_seed(question.text()));
        respond::sample_question(&mut rng)
    }
}

/// The outcome of resolving one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Full reply text, punctuated, with any follow-up question appended.
    pub text: String,
    /// The context to continue with, if any.
    pub next: Option<ActiveContext>,
    /// Name of the context that produced the answer.
    pub responder: &'static str,
}

/// Resolves turns against contexts.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateMachine {
    classifier: IntentClassifier,
}

impl StateMachine {
    /// Creates a state machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one turn.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DoNotUnderstand`] when nothing can answer the question
    /// - [`ErrorKind::Goodbye`] when the user ends the conversation
    /// - [`ErrorKind::UnusableContext`] when a freshly classified context
    ///   refuses the question it was chosen for
    pub fn resolve(
        &self,
        previous: Option<ActiveContext>,
        question: &ParsedQuestion<'_>,
        env: &TurnEnv<'_>,
    ) -> Result<Resolution> {
        let active = match previous {
            Some(active) => active,
            None => ActiveContext::fresh(self.classifier.classify(question)?),
        };
        self.answer(active, question, env)
    }

    fn answer(
        &self,
        active: ActiveContext,
        question: &ParsedQuestion<'_>,
        env: &TurnEnv<'_>,
    ) -> Result<Resolution> {
        match active.context.answer(question, active.usage, env) {
            Ok(reply) => Ok(Self::finish(&active, reply)),
            Err(Refusal::Goodbye) => Err(Error::goodbye()),
            Err(Refusal::Inappropriate) if active.usage == 0 => {
                error!(
                    context = %active.context,
                    question = %question.text(),
                    "fresh context refused its first question"
                );
                Err(Error::unusable_context(active.context.to_string()).with_context(
                    ErrorContext::new()
                        .with_source("state machine")
                        .with_question(question.text())
                        .with_frame(active.context.name()),
                ))
            }
            Err(Refusal::Inappropriate) => self.recover(active, question, env),
        }
    }

    fn recover(
        &self,
        active: ActiveContext,
        question: &ParsedQuestion<'_>,
        env: &TurnEnv<'_>,
    ) -> Result<Resolution> {
        debug!(context = %active.context, "context cannot answer, reclassifying");
        match self.classifier.classify(question) {
            Ok(context) => self.answer(ActiveContext::fresh(context), question, env),
            Err(err) if matches!(err.kind, ErrorKind::DoNotUnderstand) => {
                if question.no() {
                    debug!("negative answer, starting afresh");
                    return self.answer(ActiveContext::fresh(Context::FreshStart), question, env);
                }
                if question.yes() {
                    if let Some(prompt) = active.context.yes_prompt() {
                        debug!(context = %active.context, "affirmative answer, asking for more");
                        return Ok(Resolution {
                            text: prompt.to_string(),
                            responder: active.context.name(),
                            next: Some(active),
                        });
                    }
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn finish(active: &ActiveContext, reply: Reply) -> Resolution {
        let responder = active.context.name();
        let mut text = reply.text;
        ensure_punctuation(&mut text);

        let next = match reply.next {
            Next::Close => None,
            Next::Continue(context) => Some(ActiveContext {
                context,
                usage: active.usage + 1,
            }),
            Next::Switch(context) => Some(ActiveContext { context, usage: 1 }),
        };
        if let Some(follow_up) = next.as_ref().and_then(ActiveContext::follow_up) {
            text.push(' ');
            text.push_str(follow_up);
        }

        Resolution {
            text,
            next,
            responder,
        }
    }
}

/// 64-bit FNV-1a over the text bytes, so seeds do not change between builds.
fn text_seed(text: &str) -> u64 {
    text.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Ends `text` with a sentence terminator, looking through closing quotes.
fn ensure_punctuation(text: &mut String) {
    let unquoted = text.trim_end_matches(['\'', '"']);
    if !unquoted.ends_with(['.', '?', '!']) {
        text.push('.');
    }
}
