//! Integration tests for domain records
//!
//! Tests characters, abilities, matchups, roles and their JSON form.

use truesight_foundation::{Ability, Character, DamageType, Matchup, Role, RoleSet, SpellImmunity};

// =============================================================================
// Characters
// =============================================================================

#[test]
fn search_terms_include_name_and_aliases() {
    let am = Character::new("Anti-Mage")
        .with_alias("AM")
        .with_alias("antimage")
        .with_alias("Antimage");
    assert_eq!(am.search_terms(), vec!["anti-mage", "am", "antimage"]);
}

#[test]
fn blank_aliases_ignored() {
    let lion = Character::new("Lion").with_alias("  ");
    assert_eq!(lion.search_terms(), vec!["lion"]);
}

#[test]
fn roles_checked() {
    let clock = Character::new("Clockwerk")
        .with_role(Role::OffLane)
        .with_role(Role::Support);
    assert!(clock.has_role(Role::OffLane));
    assert!(!clock.has_role(Role::Carry));
}

// =============================================================================
// Roles
// =============================================================================

#[test]
fn role_names() {
    let names: Vec<&str> = Role::ALL.iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["carry", "support", "off-lane", "jungler", "mid", "roaming"]
    );
}

#[test]
fn role_set_from_vec() {
    let set = RoleSet::from(vec![Role::Mid, Role::Carry, Role::Mid]);
    let roles: Vec<Role> = set.into();
    assert_eq!(roles, vec![Role::Carry, Role::Mid]);
}

// =============================================================================
// Abilities
// =============================================================================

#[test]
fn ability_defaults() {
    let glimpse = Ability::new("Disruptor", "Glimpse");
    assert!(glimpse.standard);
    assert!(!glimpse.ultimate);
    assert!(glimpse.is_passive());
    assert_eq!(glimpse.to_string(), "Glimpse");
}

#[test]
fn hotkey_stored_uppercase() {
    let glimpse = Ability::new("Disruptor", "Glimpse").with_hotkey('w');
    assert_eq!(glimpse.hotkey, Some('W'));
}

#[test]
fn ability_builders() {
    let finger = Ability::new("Lion", "Finger of Death")
        .ultimate()
        .with_cooldown(vec![160.0, 100.0, 40.0])
        .with_damage_type(DamageType::Magical)
        .with_upgraded_damage_type(DamageType::Pure)
        .with_spell_immunity(SpellImmunity::DoesNotPierce, None);
    assert!(finger.ultimate);
    assert!(!finger.is_passive());
    assert_eq!(finger.upgraded_damage_type, Some(DamageType::Pure));
    assert_eq!(DamageType::Pure.name(), "pure");
}

// =============================================================================
// JSON Form
// =============================================================================

#[test]
fn character_json_uses_role_names() {
    let json = r#"{"name":"Clockwerk","aliases":["Clock"],"roles":["off-lane","roaming"]}"#;
    let clock: Character = serde_json::from_str(json).unwrap();
    assert!(clock.has_role(Role::OffLane));
    assert!(clock.has_role(Role::Roaming));
    assert_eq!(serde_json::to_string(&clock).unwrap(), json);
}

#[test]
fn ability_json_defaults() {
    let json = r#"{"character":"Invoker","name":"Sun Strike","standard":false}"#;
    let sun_strike: Ability = serde_json::from_str(json).unwrap();
    assert!(!sun_strike.standard);
    assert!(sun_strike.cooldown.is_empty());

    let minimal: Ability = serde_json::from_str(r#"{"character":"Lion","name":"Hex"}"#).unwrap();
    assert!(minimal.standard);
}

#[test]
fn spell_immunity_json() {
    let value: SpellImmunity = serde_json::from_str(r#""partially-pierces""#).unwrap();
    assert_eq!(value, SpellImmunity::PartiallyPierces);
}

#[test]
fn matchup_json() {
    let m: Matchup =
        serde_json::from_str(r#"{"subject":"Lion","enemy":"Meepo","advantage":4.62}"#).unwrap();
    assert_eq!(m, Matchup::new("Lion", "Meepo", 4.62));
}
