//! Fault containment and usage reporting

use std::sync::Arc;

use truesight_dialogue::respond::APOLOGY;
use truesight_dialogue::{Engine, NullReporter, TurnOutcome, UsageReporter};
use truesight_foundation::{Ability, Character, Matchup};
use truesight_store::{KnowledgeStore, MatchupFilter, MemoryStore};

use crate::{Chat, heroes};

/// Answers character and ability lookups, then fails on matchups.
struct BrokenMatchups(MemoryStore);

impl KnowledgeStore for BrokenMatchups {
    fn character(&self, name: &str) -> Option<Arc<Character>> {
        self.0.character(name)
    }

    fn characters(&self) -> Vec<Arc<Character>> {
        self.0.characters()
    }

    fn abilities(&self) -> Vec<Arc<Ability>> {
        self.0.abilities()
    }

    fn matchup(&self, _subject: &str, _enemy: &str) -> Option<Matchup> {
        panic!("matchup table unavailable")
    }

    fn matchups(&self, _filter: &MatchupFilter) -> Vec<Matchup> {
        panic!("matchup table unavailable")
    }
}

struct PanickingReporter;

impl UsageReporter for PanickingReporter {
    fn responder_used(&self, _responder: &str, _user: Option<&str>) {
        panic!("metrics sink down")
    }
}

fn apology(token: Option<&str>) -> TurnOutcome {
    TurnOutcome::Reply {
        text: APOLOGY.to_string(),
        token: token.map(str::to_string),
    }
}

#[test]
fn failing_store_apologizes_and_keeps_token() {
    let engine = Engine::new(Arc::new(BrokenMatchups(heroes())));
    let token = r#"{"version":1,"context":"ability-list","usage":1,"character":"Lion"}"#;

    let outcome = engine.respond(Some("Who counters Meepo?"), Some(token), None, &NullReporter);
    assert_eq!(outcome, apology(Some(token)));

    // Questions that do not touch matchups still work.
    let outcome = engine.respond(Some("What is the cooldown of Glimpse?"), None, None, &NullReporter);
    assert!(outcome.text().starts_with("The cooldown of Glimpse"));
}

#[test]
fn panicking_reporter_is_contained() {
    let engine = Engine::new(Arc::new(heroes()));
    let outcome = engine.respond(Some("Who counters Lion?"), None, None, &PanickingReporter);
    assert_eq!(outcome, apology(None));

    // The engine is still usable afterwards.
    let outcome = engine.respond(Some("Who counters Lion?"), None, None, &NullReporter);
    assert!(outcome.text().starts_with("Lifestealer and Queen of Pain"));
}

#[test]
fn counters_track_a_conversation() {
    let mut chat = Chat::new();
    chat.ask("Who counters Meepo?");
    chat.ask("What about Lion?");
    chat.ask("what is the weather");
    chat.ask("What is the cooldown of Glimpse?");

    let stats = chat.counters.snapshot();
    assert_eq!(stats.answered, 3);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.responders.get("counters"), Some(&2));
    assert_eq!(stats.responders.get("ability-detail"), Some(&1));
    assert_eq!(stats.responder_total(), 3);
    assert_eq!(stats.misunderstood, vec!["what is the weather"]);
    assert!(stats.users.contains("tester"));
}

#[test]
fn goodbye_is_not_counted_as_an_answer() {
    let mut chat = Chat::new();
    chat.ask("Who counters Meepo?");
    chat.ask("no");
    assert!(chat.say("no").is_goodbye());

    let stats = chat.counters.snapshot();
    assert_eq!(stats.answered, 2);
    assert_eq!(stats.responders.get("fresh-start"), Some(&1));
}
