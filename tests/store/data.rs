//! Integration tests for the flat data form of a store

use truesight_foundation::{Ability, Character, ErrorKind, Matchup, Role};
use truesight_store::{KnowledgeStore, StoreData};

fn data() -> StoreData {
    StoreData {
        characters: vec![
            Character::new("Lion").with_role(Role::Support),
            Character::new("Meepo").with_role(Role::Mid),
        ],
        abilities: vec![
            Ability::new("Lion", "Hex").with_hotkey('w'),
            Ability::new("Lion", "Finger of Death").with_hotkey('r').ultimate(),
            Ability::new("Meepo", "Poof").with_hotkey('w'),
        ],
        matchups: vec![Matchup::new("Lion", "Meepo", 4.62)],
    }
}

#[test]
fn ability_order_preserved() {
    let store = data().into_store().unwrap();
    let names: Vec<String> = store
        .abilities_of("Lion", true)
        .iter()
        .map(|a| a.name.clone())
        .collect();
    assert_eq!(names, vec!["Hex", "Finger of Death"]);
}

#[test]
fn json_form_loads() {
    let json = r#"{
        "characters": [{"name": "Lion", "roles": ["support"]}, {"name": "Meepo"}],
        "abilities": [{"character": "Lion", "name": "Hex", "hotkey": "W"}],
        "matchups": [{"subject": "Lion", "enemy": "Meepo", "advantage": 4.62}]
    }"#;
    let data: StoreData = serde_json::from_str(json).unwrap();
    let store = data.into_store().unwrap();
    assert_eq!(store.character_count(), 2);
    assert_eq!(store.ability_by_hotkey("Lion", 'w').map(|a| a.name.clone()), Some("Hex".into()));
}

#[test]
fn lowercase_hotkeys_load_uppercase() {
    let json = r#"{
        "characters": [{"name": "Disruptor"}],
        "abilities": [
            {"character": "Disruptor", "name": "Glimpse", "hotkey": "w"},
            {"character": "Disruptor", "name": "Thunder Strike", "hotkey": "q"}
        ]
    }"#;
    let data: StoreData = serde_json::from_str(json).unwrap();
    let store = data.into_store().unwrap();

    let glimpse = store.ability_by_hotkey("Disruptor", 'W').unwrap();
    assert_eq!(glimpse.name, "Glimpse");
    assert_eq!(glimpse.hotkey, Some('W'));
    assert_eq!(
        store.ability_by_hotkey("Disruptor", 'q').map(|a| a.name.clone()),
        Some("Thunder Strike".into())
    );
}

#[test]
fn missing_sections_default_to_empty() {
    let data: StoreData = serde_json::from_str(r#"{"characters": [{"name": "Lion"}]}"#).unwrap();
    let store = data.into_store().unwrap();
    assert_eq!(store.ability_count(), 0);
    assert_eq!(store.matchup_count(), 0);
}

#[test]
fn dangling_matchup_rejected() {
    let mut data = data();
    data.matchups.push(Matchup::new("Lion", "Pudge", 1.0));
    let err = data.into_store().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCharacter(ref name) if name == "Pudge"));
}

#[test]
fn duplicate_ability_rejected() {
    let mut data = data();
    data.abilities.push(Ability::new("Lion", "Hex"));
    let err = data.into_store().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidData(_)));
}

#[test]
fn json_roundtrip_through_store() {
    let store = data().into_store().unwrap();
    let json = serde_json::to_string(&StoreData::from_store(&store)).unwrap();
    let back: StoreData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data());
}
