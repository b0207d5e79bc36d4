//! Knowledge base records.
//!
//! These are owned by the knowledge store and read-only to the dialogue core.
//! Every cross-record reference is by name, never by a storage handle, so a
//! conversation token stays valid across knowledge base reloads.

use std::fmt;

use crate::role::{Role, RoleSet};

/// A playable hero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    /// Unique display name.
    pub name: String,
    /// Alternative names players use (some only two characters long).
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
    /// Positions this hero can play.
    #[cfg_attr(feature = "serde", serde(default))]
    pub roles: RoleSet,
}

impl Character {
    /// Creates a character with no aliases and no roles.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            roles: RoleSet::empty(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Checks whether this hero plays the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// Returns the lowercased name and aliases, without duplicates.
    ///
    /// The name itself always counts as an alias.
    #[must_use]
    pub fn search_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::with_capacity(self.aliases.len() + 1);
        for term in std::iter::once(&self.name).chain(&self.aliases) {
            let lower = term.trim().to_lowercase();
            if !lower.is_empty() && !terms.contains(&lower) {
                terms.push(lower);
            }
        }
        terms
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How an ability interacts with spell immunity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SpellImmunity {
    /// Fully affects spell-immune targets.
    Pierces,
    /// Some effects go through spell immunity.
    PartiallyPierces,
    /// Blocked by spell immunity.
    DoesNotPierce,
}

/// The damage type an ability deals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DamageType {
    /// Reduced by magic resistance.
    Magical,
    /// Reduced by armor.
    Physical,
    /// Not reduced.
    Pure,
}

impl DamageType {
    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Magical => "magical",
            Self::Physical => "physical",
            Self::Pure => "pure",
        }
    }
}

/// A skill belonging to exactly one character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    /// Name of the owning character.
    pub character: String,
    /// Ability name (unique per character, not globally).
    pub name: String,
    /// Keyboard hotkey, if the ability is castable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hotkey: Option<char>,
    /// Cooldown in seconds per level; empty for passives.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: Vec<f64>,
    /// Whether this is an ultimate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultimate: bool,
    /// False for talent or upgrade granted abilities hidden from default listings.
    #[cfg_attr(feature = "serde", serde(default = "default_standard"))]
    pub standard: bool,
    /// Spell immunity classification.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell_immunity: Option<SpellImmunity>,
    /// Free text detail about spell immunity interactions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell_immunity_detail: Option<String>,
    /// Damage type dealt.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: Option<DamageType>,
    /// Damage type dealt when upgraded by Aghanim's Scepter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded_damage_type: Option<DamageType>,
    /// Free text description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

#[cfg(feature = "serde")]
fn default_standard() -> bool {
    true
}

impl Ability {
    /// Creates a standard, non-ultimate ability with no other data.
    #[must_use]
    pub fn new(character: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            name: name.into(),
            hotkey: None,
            cooldown: Vec::new(),
            ultimate: false,
            standard: true,
            spell_immunity: None,
            spell_immunity_detail: None,
            damage_type: None,
            upgraded_damage_type: None,
            description: None,
        }
    }

    /// Sets the hotkey (stored uppercase).
    #[must_use]
    pub fn with_hotkey(mut self, hotkey: char) -> Self {
        self.hotkey = Some(hotkey.to_ascii_uppercase());
        self
    }

    /// Sets the cooldown per level.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: impl Into<Vec<f64>>) -> Self {
        self.cooldown = cooldown.into();
        self
    }

    /// Marks the ability as an ultimate.
    #[must_use]
    pub fn ultimate(mut self) -> Self {
        self.ultimate = true;
        self
    }

    /// Marks the ability as talent or upgrade granted.
    #[must_use]
    pub fn non_standard(mut self) -> Self {
        self.standard = false;
        self
    }

    /// Sets the spell immunity classification and optional detail.
    #[must_use]
    pub fn with_spell_immunity(mut self, kind: SpellImmunity, detail: Option<&str>) -> Self {
        self.spell_immunity = Some(kind);
        self.spell_immunity_detail = detail.map(str::to_string);
        self
    }

    /// Sets the damage type.
    #[must_use]
    pub fn with_damage_type(mut self, damage: DamageType) -> Self {
        self.damage_type = Some(damage);
        self
    }

    /// Sets the damage type of the upgraded variant.
    #[must_use]
    pub fn with_upgraded_damage_type(mut self, damage: DamageType) -> Self {
        self.upgraded_damage_type = Some(damage);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A passive ability has no cooldown.
    #[must_use]
    pub fn is_passive(&self) -> bool {
        self.cooldown.is_empty()
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A directional advantage score of `subject` when facing `enemy`.
///
/// `(A, B)` and `(B, A)` are independent records.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matchup {
    /// The hero whose advantage is measured.
    pub subject: String,
    /// The opposing hero.
    pub enemy: String,
    /// Signed advantage score; positive favours the subject.
    pub advantage: f64,
}

impl Matchup {
    /// Creates a matchup record.
    #[must_use]
    pub fn new(subject: impl Into<String>, enemy: impl Into<String>, advantage: f64) -> Self {
        Self {
            subject: subject.into(),
            enemy: enemy.into(),
            advantage,
        }
    }
}
