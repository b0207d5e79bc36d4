//! Advantage answers and their thresholds

use truesight_dialogue::EngineConfig;
use truesight_dialogue::respond::advantage_verdict;

use crate::Chat;

#[test]
fn verdict_boundaries() {
    assert_eq!(advantage_verdict(2.01, 2.0), "very strong");
    assert_eq!(advantage_verdict(2.0, 2.0), "not bad");
    assert_eq!(advantage_verdict(0.01, 2.0), "not bad");
    assert_eq!(advantage_verdict(0.0, 2.0), "not great");
    assert_eq!(advantage_verdict(-1.99, 2.0), "not great");
    assert_eq!(advantage_verdict(-2.0, 2.0), "terrible");
}

// =============================================================================
// One hero against another
// =============================================================================

#[test]
fn two_hero_verdicts() {
    let mut chat = Chat::new();
    assert_eq!(
        chat.ask("Is Lion good against Meepo?"),
        "Lion is very strong against Meepo. Lion's advantage is 4.62. Any other matchup?"
    );
    assert_eq!(
        Chat::new().ask("Is Zeus good against Anti-Mage?"),
        "Zeus is not bad against Anti-Mage. Zeus's advantage is 1.96. Any other matchup?"
    );
    assert_eq!(
        Chat::new().ask("Is Anti-Mage good against Zeus?"),
        "Anti-Mage is not great against Zeus. Anti-Mage's advantage is -1.96. Any other matchup?"
    );
    assert_eq!(
        Chat::new().ask("Meepo vs Lion"),
        "Meepo is terrible against Lion. Meepo's advantage is -4.62. Any other matchup?"
    );
}

#[test]
fn two_hero_without_data() {
    assert_eq!(
        Chat::new().ask("Is Zeus good against Lion?"),
        "I don't have any data on Zeus against Lion. Any other matchup?"
    );
}

#[test]
fn two_hero_follow_up_keeps_enemy() {
    let mut chat = Chat::new();
    chat.ask("Is Lion good against Meepo?");
    assert_eq!(
        chat.ask("What about Disruptor?"),
        "Disruptor is very strong against Meepo. Disruptor's advantage is 3.10. Any others?"
    );
}

// =============================================================================
// Counters and strengths
// =============================================================================

#[test]
fn strong_threshold_is_inclusive_for_counters() {
    let mut chat = Chat::with_config(EngineConfig::default().with_strong_advantage(2.93));
    assert!(
        chat.ask("Who counters Meepo?")
            .starts_with("Lion, Disruptor, and Dark Willow are very strong against Meepo.")
    );

    let mut chat = Chat::with_config(EngineConfig::default().with_strong_advantage(3.0));
    assert_eq!(
        chat.ask("Who counters Meepo?"),
        "Lion and Disruptor are very strong against Meepo. \
         Dark Willow, Queen of Pain, and Storm Spirit are also good. Any other hero?"
    );
}

#[test]
fn soft_counters_drawn_from_the_top() {
    assert_eq!(
        Chat::new().ask("Who counters Disruptor?"),
        "Lifestealer is very strong against Disruptor. Alchemist, Clockwerk, Lion, \
         Storm Spirit, Dark Willow, and Zeus are also good. Any other hero?"
    );

    let mut chat = Chat::with_config(EngineConfig::default().with_soft_counter_limit(3));
    assert_eq!(
        chat.ask("Who counters Disruptor?"),
        "Lifestealer is very strong against Disruptor. \
         Alchemist and Clockwerk are also good. Any other hero?"
    );
}

#[test]
fn only_soft_counters() {
    assert_eq!(
        Chat::new().ask("Who counters Lion?"),
        "Lifestealer and Queen of Pain are good against Lion. Any other hero?"
    );
}

#[test]
fn role_filters_listed_heroes() {
    assert_eq!(
        Chat::new().ask("Which mid heroes are good against Meepo?"),
        "Queen of Pain and Storm Spirit are good against Meepo. Any other hero?"
    );
    assert_eq!(
        Chat::new().ask("Which carries counter Meepo?"),
        "Storm Spirit is good against Meepo. Any other hero?"
    );
    assert_eq!(
        Chat::new().ask("Any jungle heroes against Meepo?"),
        "I don't know of any jungler heroes that are good against Meepo. Any other hero?"
    );
}

#[test]
fn strengths_follow_word_order() {
    assert_eq!(
        Chat::new().ask("Who is Lion strong against?"),
        "Lion is very strong against Meepo and Anti-Mage, and also counters Storm Spirit. \
         Any other hero?"
    );
    assert_eq!(
        Chat::new().ask("Who is Meepo strong against?"),
        "Meepo isn't particularly strong against anyone. Any other hero?"
    );
}
