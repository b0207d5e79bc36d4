//! The turn boundary.
//!
//! [`Engine::respond`] is the only entry point callers need. It decodes the
//! caller's token, resolves the turn, encodes the next token and reports
//! usage. No fault escapes it: internal errors and panics become a generic
//! apology that keeps the caller's token.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{error, info, warn};
use truesight_foundation::{ErrorKind, Result};
use truesight_parser::{QuestionParser, Vocabulary};
use truesight_store::KnowledgeStore;

use crate::machine::{StateMachine, TurnEnv};
use crate::reporter::UsageReporter;
use crate::respond;
use crate::token::{decode_token, encode_token};

/// Engine tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Seed for picking sample questions.
    pub seed: u64,
    /// How many top matchups soft counters are drawn from.
    pub soft_counter_limit: usize,
    /// Advantage at which a matchup counts as very strong.
    pub strong_advantage: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            soft_counter_limit: 8,
            strong_advantage: 2.0,
        }
    }
}

impl EngineConfig {
    /// Builder method to set the sample question seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the soft counter limit.
    #[must_use]
    pub fn with_soft_counter_limit(mut self, limit: usize) -> Self {
        self.soft_counter_limit = limit;
        self
    }

    /// Builder method to set the strong advantage threshold.
    #[must_use]
    pub fn with_strong_advantage(mut self, threshold: f64) -> Self {
        self.strong_advantage = threshold;
        self
    }
}

/// The result of one turn, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// An answer, and the token to send back next turn (if the conversation
    /// expects a follow-up).
    Reply {
        /// Response text.
        text: String,
        /// Next conversation token.
        token: Option<String>,
    },
    /// Nothing could answer the question.
    DoNotUnderstand {
        /// What the user said.
        heard: String,
        /// The caller's token, unchanged.
        token: Option<String>,
    },
    /// The user ended the conversation.
    Goodbye,
}

impl TurnOutcome {
    /// Text to show the user.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Reply { text, .. } => text.clone(),
            Self::DoNotUnderstand { heard, .. } => respond::not_understood(heard),
            Self::Goodbye => respond::GOODBYE.to_string(),
        }
    }

    /// Token to send with the next turn.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Reply { token, .. } | Self::DoNotUnderstand { token, .. } => token.as_deref(),
            Self::Goodbye => None,
        }
    }

    /// Returns true if the conversation is over.
    #[must_use]
    pub fn is_goodbye(&self) -> bool {
        matches!(self, Self::Goodbye)
    }
}

/// Answers questions against a knowledge store.
///
/// The engine holds no per-conversation state; all of it travels in the
/// token, so one engine can serve any number of conversations concurrently.
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn KnowledgeStore>,
    parser: QuestionParser,
    machine: StateMachine,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the standard vocabulary and default tuning.
    #[must_use]
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            store,
            parser: QuestionParser::default(),
            machine: StateMachine::new(),
            config: EngineConfig::default(),
        }
    }

    /// Builder method to set the tuning.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Builder method to replace the vocabulary.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.parser = QuestionParser::new(vocabulary);
        self
    }

    /// Returns the tuning.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the knowledge store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KnowledgeStore> {
        &self.store
    }

    /// Answers one turn.
    ///
    /// `token` is whatever the previous turn returned; `user` identifies the
    /// caller for usage reporting only.
    pub fn respond(
        &self,
        text: Option<&str>,
        token: Option<&str>,
        user: Option<&str>,
        reporter: &dyn UsageReporter,
    ) -> TurnOutcome {
        let apology = || TurnOutcome::Reply {
            text: respond::APOLOGY.to_string(),
            token: token.map(str::to_string),
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.turn(text, token, user, reporter))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                error!(
                    error = %err,
                    context = %err.context.clone().unwrap_or_default(),
                    question = text.unwrap_or_default(),
                    "turn failed"
                );
                apology()
            }
            Err(_) => {
                error!(question = text.unwrap_or_default(), "turn panicked");
                apology()
            }
        }
    }

    fn turn(
        &self,
        text: Option<&str>,
        token: Option<&str>,
        user: Option<&str>,
        reporter: &dyn UsageReporter,
    ) -> Result<TurnOutcome> {
        let store: &dyn KnowledgeStore = self.store.as_ref();
        let question = self.parser.parse(text, store);

        let previous = decode_token(token, store).unwrap_or_else(|err| {
            warn!(error = %err, "discarding conversation token");
            None
        });

        let env = TurnEnv {
            config: &self.config,
            reporter,
            user,
            raw_text: text,
        };

        match self.machine.resolve(previous, &question, &env) {
            Ok(resolution) => {
                let next_token = resolution.next.as_ref().map(encode_token).transpose()?;
                reporter.responder_used(resolution.responder, user);
                reporter.turn_outcome(true);
                info!(
                    target: "good_response",
                    question = %question,
                    responder = resolution.responder,
                    response = %resolution.text,
                    "answered"
                );
                Ok(TurnOutcome::Reply {
                    text: resolution.text,
                    token: next_token,
                })
            }
            Err(err) => match err.kind {
                ErrorKind::DoNotUnderstand => {
                    warn!(target: "failed_response", question = %question, "unable to respond to question");
                    let heard = text.unwrap_or_default();
                    reporter.misunderstood(heard);
                    reporter.turn_outcome(false);
                    Ok(TurnOutcome::DoNotUnderstand {
                        heard: heard.to_string(),
                        token: token.map(str::to_string),
                    })
                }
                ErrorKind::Goodbye => {
                    info!(question = %question, "conversation finished");
                    Ok(TurnOutcome::Goodbye)
                }
                _ => Err(err),
            },
        }
    }
}
