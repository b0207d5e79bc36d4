//! Integration tests for Layer 3: Dialogue
//!
//! Multi-turn conversations against the bundled knowledge base, driven
//! through [`Engine::respond`] the way a caller would.

mod advantages;
mod faults;
mod tokens;

use std::sync::Arc;

use truesight_dialogue::{Engine, EngineConfig, TurnOutcome, UsageCounters};
use truesight_runtime::serialize::bundled_store;
use truesight_store::MemoryStore;

/// The demo knowledge base shipped with the binary.
pub fn heroes() -> MemoryStore {
    bundled_store().expect("bundled data loads")
}

/// A caller that threads the token from one turn into the next.
pub struct Chat {
    pub engine: Engine,
    pub token: Option<String>,
    pub counters: UsageCounters,
}

impl Chat {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::new(Arc::new(heroes())).with_config(config),
            token: None,
            counters: UsageCounters::new(),
        }
    }

    /// Sends one turn and keeps whatever token comes back.
    pub fn say(&mut self, text: &str) -> TurnOutcome {
        let outcome = self
            .engine
            .respond(Some(text), self.token.as_deref(), Some("tester"), &self.counters);
        self.token = outcome.token().map(str::to_string);
        outcome
    }

    /// Sends one turn and returns only the text.
    pub fn ask(&mut self, text: &str) -> String {
        self.say(text).text()
    }
}
