//! Flat, serializable form of a knowledge base.
//!
//! Persistent collections are an in-memory concern; on disk a store is just
//! three lists. Loading goes through [`MemoryStore`]'s validating inserts so a
//! file with dangling references is rejected rather than half loaded.

use truesight_foundation::{Ability, Character, Matchup, Result};

use crate::memory::MemoryStore;
use crate::query::KnowledgeStore;

/// Plain-data view of a [`MemoryStore`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreData {
    /// Characters, any order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub characters: Vec<Character>,
    /// Abilities, in listing order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<Ability>,
    /// Matchups, any order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub matchups: Vec<Matchup>,
}

impl StoreData {
    /// Builds a validated store from this data.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate characters or abilities, or on abilities
    /// and matchups naming unknown characters.
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();
        for character in self.characters {
            store = store.insert_character(character)?;
        }
        for ability in self.abilities {
            store = store.insert_ability(ability)?;
        }
        for matchup in self.matchups {
            store = store.insert_matchup(matchup)?;
        }
        Ok(store)
    }

    /// Captures the contents of a store.
    #[must_use]
    pub fn from_store(store: &MemoryStore) -> Self {
        Self {
            characters: store.characters().iter().map(|c| (**c).clone()).collect(),
            abilities: store.abilities().iter().map(|a| (**a).clone()).collect(),
            matchups: store.all_matchups().cloned().collect(),
        }
    }
}
