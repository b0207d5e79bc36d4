//! Conversation state for the REPL.
//!
//! The engine itself is stateless; a [`Session`] plays the caller's part,
//! holding the token between turns and counting usage.

use std::sync::Arc;

use truesight_dialogue::{Engine, TurnOutcome, UsageCounters, UsageStats};
use truesight_store::KnowledgeStore;

/// One interactive conversation.
pub struct Session {
    engine: Engine,
    token: Option<String>,
    user: Option<String>,
    counters: Arc<UsageCounters>,
    turns: u64,
}

impl Session {
    /// Creates a session with no conversation in progress.
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            token: None,
            user: None,
            counters: Arc::new(UsageCounters::new()),
            turns: 0,
        }
    }

    /// Builder method to set the user identifier.
    #[must_use]
    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    /// Builder method to start from an existing token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Builder method to share usage counters with other sessions.
    #[must_use]
    pub fn with_counters(mut self, counters: Arc<UsageCounters>) -> Self {
        self.counters = counters;
        self
    }

    /// Answers one turn and remembers the returned token.
    ///
    /// A goodbye clears the token, so the next question starts afresh.
    pub fn ask(&mut self, text: &str) -> TurnOutcome {
        let outcome = self.engine.respond(
            Some(text),
            self.token.as_deref(),
            self.user.as_deref(),
            self.counters.as_ref(),
        );
        self.token = outcome.token().map(str::to_string);
        self.turns += 1;
        outcome
    }

    /// The opening line for a new conversation.
    pub fn greet(&mut self) -> TurnOutcome {
        self.token = None;
        self.engine
            .respond(None, None, self.user.as_deref(), self.counters.as_ref())
    }

    /// Forgets the current conversation.
    pub fn reset(&mut self) {
        self.token = None;
    }

    /// The token that will accompany the next turn.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replaces the token for the next turn.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// The user identifier, if any.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Number of questions asked in this session.
    #[must_use]
    pub const fn turns(&self) -> u64 {
        self.turns
    }

    /// Current usage counts.
    #[must_use]
    pub fn stats(&self) -> UsageStats {
        self.counters.snapshot()
    }

    /// The engine answering this session.
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Hero and ability names, for tab completion.
    #[must_use]
    pub fn known_names(&self) -> Vec<String> {
        let store = self.engine.store();
        let mut names: Vec<String> = store
            .characters()
            .iter()
            .map(|c| c.name.clone())
            .chain(store.abilities().iter().map(|a| a.name.clone()))
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
