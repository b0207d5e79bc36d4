//! Usage reporting.
//!
//! Reporting is a side channel: every method is infallible, so a broken
//! metrics sink can never fail a turn.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use tracing::info;

/// Receives usage events from the turn boundary.
pub trait UsageReporter: Send + Sync {
    /// A context answered a turn.
    fn responder_used(&self, _responder: &str, _user: Option<&str>) {}

    /// A turn finished; `answered` is false for misunderstood turns.
    fn turn_outcome(&self, _answered: bool) {}

    /// A question nothing could answer.
    fn misunderstood(&self, _question: &str) {}

    /// Feedback left by a user.
    fn feedback(&self, _user: Option<&str>, _text: &str) {}
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl UsageReporter for NullReporter {}

/// Emits every event as a `tracing` event on target `usage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl UsageReporter for LogReporter {
    fn responder_used(&self, responder: &str, user: Option<&str>) {
        info!(target: "usage", responder, user = user.unwrap_or("-"), "responder used");
    }

    fn turn_outcome(&self, answered: bool) {
        info!(target: "usage", answered, "turn finished");
    }

    fn misunderstood(&self, question: &str) {
        info!(target: "usage", question, "question misunderstood");
    }

    fn feedback(&self, user: Option<&str>, text: &str) {
        info!(target: "usage", user = user.unwrap_or("-"), feedback = text, "feedback received");
    }
}

/// Snapshot of [`UsageCounters`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsageStats {
    /// Answers per responder name.
    pub responders: BTreeMap<String, u64>,
    /// Distinct users seen.
    pub users: BTreeSet<String>,
    /// Turns answered.
    pub answered: u64,
    /// Turns not understood.
    pub failed: u64,
    /// Misunderstood questions, oldest first.
    pub misunderstood: Vec<String>,
    /// Feedback received, oldest first.
    pub feedback: Vec<String>,
}

impl UsageStats {
    /// Total answers across all responders.
    #[must_use]
    pub fn responder_total(&self) -> u64 {
        self.responders.values().sum()
    }
}

/// Counts events in memory.
#[derive(Debug, Default)]
pub struct UsageCounters {
    stats: Mutex<UsageStats>,
}

impl UsageCounters {
    /// Creates empty counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current counts.
    #[must_use]
    pub fn snapshot(&self) -> UsageStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut UsageStats)) {
        // A poisoned lock only loses metrics.
        if let Ok(mut stats) = self.stats.lock() {
            f(&mut stats);
        }
    }
}

impl UsageReporter for UsageCounters {
    fn responder_used(&self, responder: &str, user: Option<&str>) {
        self.update(|stats| {
            *stats.responders.entry(responder.to_string()).or_default() += 1;
            if let Some(user) = user {
                stats.users.insert(user.to_string());
            }
        });
    }

    fn turn_outcome(&self, answered: bool) {
        self.update(|stats| {
            if answered {
                stats.answered += 1;
            } else {
                stats.failed += 1;
            }
        });
    }

    fn misunderstood(&self, question: &str) {
        self.update(|stats| stats.misunderstood.push(question.to_string()));
    }

    fn feedback(&self, _user: Option<&str>, text: &str) {
        self.update(|stats| stats.feedback.push(text.to_string()));
    }
}
