//! In-memory knowledge store with immutable snapshots.
//!
//! `MemoryStore` uses persistent data structures for O(1) cloning and
//! structural sharing: every insertion returns a new store and leaves the
//! original untouched, so a snapshot can be handed to any number of
//! concurrent conversations without locking.

use std::sync::Arc;

use im::{OrdMap, Vector};
use truesight_foundation::{Ability, Character, Error, ErrorKind, Matchup, Result, Role};

use crate::query::{KnowledgeStore, MatchupFilter, MatchupSide, by_advantage_descending};

/// Immutable in-memory knowledge base.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// Characters keyed by name.
    characters: OrdMap<String, Arc<Character>>,
    /// Abilities in insertion order.
    abilities: Vector<Arc<Ability>>,
    /// Matchups keyed by (subject, enemy).
    matchups: OrdMap<(String, String), Matchup>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of characters.
    #[must_use]
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Returns the number of abilities.
    #[must_use]
    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Returns the number of matchups.
    #[must_use]
    pub fn matchup_count(&self) -> usize {
        self.matchups.len()
    }

    /// Adds a character.
    ///
    /// Returns a new store with the character added.
    ///
    /// # Errors
    ///
    /// Returns an error if a character with the same name already exists.
    pub fn insert_character(&self, character: Character) -> Result<MemoryStore> {
        if self.characters.contains_key(&character.name) {
            return Err(Error::new(ErrorKind::DuplicateCharacter(character.name)));
        }
        Ok(MemoryStore {
            characters: self
                .characters
                .update(character.name.clone(), Arc::new(character)),
            ..self.clone()
        })
    }

    /// Adds an ability.
    ///
    /// Returns a new store with the ability added. Hotkeys are stored
    /// uppercase whatever case the data uses.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning character is unknown or already has an
    /// ability with this name.
    pub fn insert_ability(&self, mut ability: Ability) -> Result<MemoryStore> {
        ability.hotkey = ability.hotkey.map(|key| key.to_ascii_uppercase());
        if !self.characters.contains_key(&ability.character) {
            return Err(Error::unknown_character(ability.character));
        }
        if self
            .abilities
            .iter()
            .any(|a| a.character == ability.character && a.name == ability.name)
        {
            return Err(Error::new(ErrorKind::InvalidData(format!(
                "{} already has an ability named {}",
                ability.character, ability.name
            ))));
        }
        let mut abilities = self.abilities.clone();
        abilities.push_back(Arc::new(ability));
        Ok(MemoryStore {
            abilities,
            ..self.clone()
        })
    }

    /// Adds or replaces a matchup.
    ///
    /// Returns a new store with the matchup set.
    ///
    /// # Errors
    ///
    /// Returns an error if either character is unknown, or the matchup pits a
    /// character against itself.
    pub fn insert_matchup(&self, matchup: Matchup) -> Result<MemoryStore> {
        for name in [&matchup.subject, &matchup.enemy] {
            if !self.characters.contains_key(name) {
                return Err(Error::unknown_character(name.clone()));
            }
        }
        if matchup.subject == matchup.enemy {
            return Err(Error::new(ErrorKind::InvalidData(format!(
                "{} cannot be matched up against itself",
                matchup.subject
            ))));
        }
        let key = (matchup.subject.clone(), matchup.enemy.clone());
        Ok(MemoryStore {
            matchups: self.matchups.update(key, matchup),
            ..self.clone()
        })
    }

    /// Iterates all matchups in (subject, enemy) order.
    pub fn all_matchups(&self) -> impl Iterator<Item = &Matchup> + '_ {
        self.matchups.values()
    }

    fn plays_role(&self, name: &str, role: Role) -> bool {
        self.characters.get(name).is_some_and(|c| c.has_role(role))
    }
}

impl KnowledgeStore for MemoryStore {
    fn character(&self, name: &str) -> Option<Arc<Character>> {
        self.characters.get(name).cloned()
    }

    fn characters(&self) -> Vec<Arc<Character>> {
        self.characters.values().cloned().collect()
    }

    fn abilities(&self) -> Vec<Arc<Ability>> {
        self.abilities.iter().cloned().collect()
    }

    fn matchup(&self, subject: &str, enemy: &str) -> Option<Matchup> {
        self.matchups
            .get(&(subject.to_string(), enemy.to_string()))
            .cloned()
    }

    fn matchups(&self, filter: &MatchupFilter) -> Vec<Matchup> {
        let mut found: Vec<Matchup> = self
            .matchups
            .values()
            .filter(|m| filter.accepts(m))
            .filter(|m| match filter.role {
                None => true,
                Some((MatchupSide::Subject, role)) => self.plays_role(&m.subject, role),
                Some((MatchupSide::Enemy, role)) => self.plays_role(&m.enemy, role),
            })
            .cloned()
            .collect();
        found.sort_by(by_advantage_descending);
        found
    }
}
