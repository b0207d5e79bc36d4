//! Integration tests for knowledge store queries

use std::sync::Arc;
use std::thread;

use truesight_foundation::{Ability, Character, Matchup, Role};
use truesight_store::{KnowledgeStore, MatchupFilter, MatchupSide, MemoryStore, UltimateLookup};

fn store() -> MemoryStore {
    let characters = [
        Character::new("Anti-Mage").with_alias("AM").with_role(Role::Carry),
        Character::new("Disruptor").with_role(Role::Support),
        Character::new("Lion").with_role(Role::Support),
        Character::new("Meepo").with_role(Role::Mid).with_role(Role::Carry),
        Character::new("Storm Spirit").with_alias("Storm").with_role(Role::Mid),
        Character::new("Dark Willow").with_alias("DW").with_role(Role::Support),
    ];
    let abilities = [
        Ability::new("Anti-Mage", "Blink").with_hotkey('w'),
        Ability::new("Anti-Mage", "Mana Void").with_hotkey('r').ultimate(),
        Ability::new("Disruptor", "Glimpse").with_hotkey('w'),
        Ability::new("Disruptor", "Static Storm").with_hotkey('r').ultimate(),
        Ability::new("Dark Willow", "Bedlam").with_hotkey('r').ultimate(),
        Ability::new("Dark Willow", "Terrorize").with_hotkey('d').ultimate(),
        Ability::new("Dark Willow", "Shadow Realm").with_hotkey('w'),
        Ability::new("Disruptor", "Kinetic Aura").non_standard(),
    ];
    let matchups = [
        Matchup::new("Lion", "Meepo", 4.62),
        Matchup::new("Disruptor", "Meepo", 3.1),
        Matchup::new("Dark Willow", "Meepo", 2.93),
        Matchup::new("Anti-Mage", "Meepo", -0.4),
        Matchup::new("Meepo", "Lion", -4.62),
        Matchup::new("Meepo", "Anti-Mage", 0.4),
        Matchup::new("Meepo", "Storm Spirit", 1.1),
    ];

    let mut store = MemoryStore::new();
    for c in characters {
        store = store.insert_character(c).unwrap();
    }
    for a in abilities {
        store = store.insert_ability(a).unwrap();
    }
    for m in matchups {
        store = store.insert_matchup(m).unwrap();
    }
    store
}

fn names(found: &[truesight_store::AliasMatch]) -> Vec<(&str, &str)> {
    found
        .iter()
        .map(|m| (m.character.name.as_str(), m.alias.as_str()))
        .collect()
}

// =============================================================================
// Characters and Aliases
// =============================================================================

#[test]
fn characters_ordered_by_name() {
    let store = store();
    let order: Vec<String> = store.characters().iter().map(|c| c.name.clone()).collect();
    assert_eq!(order[0], "Anti-Mage");
    assert_eq!(order.last().map(String::as_str), Some("Storm Spirit"));
}

#[test]
fn two_letter_alias_needs_whole_word() {
    let store = store();
    assert_eq!(
        names(&store.alias_candidates("is am good", &["is", "am", "good"])),
        vec![("Anti-Mage", "am")]
    );
    assert!(store.alias_candidates("pam", &["pam"]).is_empty());
}

#[test]
fn long_alias_matches_anywhere() {
    let store = store();
    let found = store.alias_candidates("storm spirit", &["storm", "spirit"]);
    assert_eq!(
        names(&found),
        vec![("Storm Spirit", "storm spirit"), ("Storm Spirit", "storm")]
    );
}

#[test]
fn characters_by_role() {
    let store = store();
    let supports: Vec<String> = store
        .characters_with_role(Role::Support)
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(supports, vec!["Dark Willow", "Disruptor", "Lion"]);
}

// =============================================================================
// Abilities
// =============================================================================

#[test]
fn abilities_named_in_text() {
    let store = store();
    let found: Vec<String> = store
        .abilities_named_in("what does static storm do")
        .iter()
        .map(|a| a.name.clone())
        .collect();
    assert_eq!(found, vec!["Static Storm"]);
}

#[test]
fn standard_filter_hides_upgrades() {
    let store = store();
    assert_eq!(store.abilities_of("Disruptor", true).len(), 2);
    assert_eq!(store.abilities_of("Disruptor", false).len(), 3);
}

#[test]
fn hotkey_lookup_ignores_case() {
    let store = store();
    let blink = store.ability_by_hotkey("Anti-Mage", 'w').unwrap();
    assert_eq!(blink.name, "Blink");
    assert!(store.ability_by_hotkey("Anti-Mage", 'e').is_none());
}

#[test]
fn ultimate_lookup() {
    let store = store();
    assert!(matches!(store.ultimate("Disruptor"), UltimateLookup::Single(a) if a.name == "Static Storm"));
    match store.ultimate("Dark Willow") {
        UltimateLookup::Multiple(all) => {
            let names: Vec<&str> = all.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, vec!["Bedlam", "Terrorize"]);
        }
        other => panic!("expected two ultimates, got {other:?}"),
    }
    assert!(matches!(store.ultimate("Lion"), UltimateLookup::None));
}

// =============================================================================
// Matchups
// =============================================================================

#[test]
fn matchups_are_directional() {
    let store = store();
    assert_eq!(store.matchup("Lion", "Meepo").map(|m| m.advantage), Some(4.62));
    assert_eq!(store.matchup("Meepo", "Lion").map(|m| m.advantage), Some(-4.62));
    assert!(store.matchup("Lion", "Storm Spirit").is_none());
}

#[test]
fn counters_sorted_and_thresholded() {
    let store = store();
    let found = store.matchups(&MatchupFilter::against("Meepo").with_min_advantage(0.0));
    let subjects: Vec<&str> = found.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Lion", "Disruptor", "Dark Willow"]);
}

#[test]
fn role_filter_applies_to_chosen_side() {
    let store = store();
    let carries = store.matchups(
        &MatchupFilter::against("Meepo").with_role(MatchupSide::Subject, Some(Role::Carry)),
    );
    assert_eq!(carries.len(), 1);
    assert_eq!(carries[0].subject, "Anti-Mage");

    let vs_mids = store.matchups(
        &MatchupFilter::for_subject("Meepo").with_role(MatchupSide::Enemy, Some(Role::Mid)),
    );
    assert_eq!(vs_mids.len(), 1);
    assert_eq!(vs_mids[0].enemy, "Storm Spirit");
}

#[test]
fn self_matchup_rejected() {
    assert!(store().insert_matchup(Matchup::new("Lion", "Lion", 0.0)).is_err());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn snapshot_shared_across_threads() {
    let store: Arc<dyn KnowledgeStore> = Arc::new(store());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.matchups(&MatchupFilter::against("Meepo")).len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
}
