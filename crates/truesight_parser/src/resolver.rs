//! Entity resolution against the knowledge store.
//!
//! Finds the characters, abilities and hotkey a question mentions. Names
//! overlap in practice ("Rage" inside "Chemical Rage", an alias inside a
//! longer alias), so the longest mention always wins.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;
use truesight_foundation::{Ability, Character};
use truesight_store::KnowledgeStore;

use crate::tokenizer::{QuestionTokenizer, Word};

/// A character found in a question, with where it was first mentioned.
#[derive(Clone, Debug)]
pub struct CharacterMention {
    /// The mentioned character.
    pub character: Arc<Character>,
    /// Byte offset of the first kept mention in the lowercased text.
    pub position: usize,
}

/// Resolves question text to knowledge store entities.
#[derive(Clone, Copy)]
pub struct EntityResolver<'s> {
    store: &'s dyn KnowledgeStore,
}

impl<'s> EntityResolver<'s> {
    /// Creates a resolver over the given store.
    #[must_use]
    pub fn new(store: &'s dyn KnowledgeStore) -> Self {
        Self { store }
    }

    /// Finds the characters mentioned in `text`, in order of first mention.
    ///
    /// Candidate aliases are consumed longest first. Once an alias matches,
    /// every occurrence of it is blanked out, so a shorter alias contained in
    /// it can no longer match there. Two-character aliases only match whole
    /// words that are still intact. Ties in position are broken by name.
    #[must_use]
    pub fn characters(&self, text: &str, words: &[Word]) -> Vec<CharacterMention> {
        let word_texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        let mut candidates = self.store.alias_candidates(text, &word_texts);
        candidates.sort_by(|a, b| {
            b.alias
                .chars()
                .count()
                .cmp(&a.alias.chars().count())
                .then_with(|| a.alias.cmp(&b.alias))
                .then_with(|| a.character.name.cmp(&b.character.name))
        });

        // Blanking keeps byte length, so offsets into `scratch` are offsets into `text`.
        let mut scratch = text.to_string();
        let mut mentions: Vec<CharacterMention> = Vec::new();

        for candidate in candidates {
            let position = if candidate.alias.chars().count() == 2 {
                let remaining = QuestionTokenizer::tokenize(&scratch);
                let Some(word) = remaining.iter().find(|w| w.text == candidate.alias) else {
                    trace!(alias = %candidate.alias, "alias consumed by a longer mention");
                    continue;
                };
                blank(&mut scratch, word.offset, word.text.len());
                word.offset
            } else {
                let Some(first) = scratch.find(candidate.alias.as_str()) else {
                    trace!(alias = %candidate.alias, "alias consumed by a longer mention");
                    continue;
                };
                while let Some(at) = scratch.find(candidate.alias.as_str()) {
                    blank(&mut scratch, at, candidate.alias.len());
                }
                first
            };

            match mentions
                .iter_mut()
                .find(|m| m.character.name == candidate.character.name)
            {
                Some(existing) => existing.position = existing.position.min(position),
                None => mentions.push(CharacterMention {
                    character: candidate.character,
                    position,
                }),
            }
        }

        mentions.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then_with(|| a.character.name.cmp(&b.character.name))
        });
        mentions
    }

    /// Finds the abilities named in `text`, in store order.
    ///
    /// An ability whose name is contained in another found ability's name is
    /// dropped. When several characters own an ability of the same name, the
    /// ones owned by a mentioned character are preferred.
    #[must_use]
    pub fn abilities(&self, text: &str, mentioned: &[CharacterMention]) -> Vec<Arc<Ability>> {
        let found: Vec<(Arc<Ability>, String)> = self
            .store
            .abilities_named_in(text)
            .into_iter()
            .map(|a| {
                let lower = a.name.to_lowercase();
                (a, lower)
            })
            .collect();

        let mut kept: Vec<(Arc<Ability>, String)> = found
            .iter()
            .filter(|(_, name)| {
                !found
                    .iter()
                    .any(|(_, other)| other != name && other.contains(name.as_str()))
            })
            .cloned()
            .collect();

        let owned = |ability: &Ability| mentioned.iter().any(|m| m.character.name == ability.character);
        let owned_names: HashSet<String> = kept
            .iter()
            .filter(|(a, _)| owned(a))
            .map(|(_, name)| name.clone())
            .collect();
        kept.retain(|(a, name)| owned(a) || !owned_names.contains(name));

        kept.into_iter().map(|(a, _)| a).collect()
    }

    /// Finds the single hotkey of `character` named as a whole word.
    ///
    /// Returns `None` when no hotkey or more than one distinct hotkey of that
    /// character is named.
    #[must_use]
    pub fn hotkey_for(&self, character: &Character, words: &[Word]) -> Option<char> {
        let mut keys: Vec<char> = self
            .store
            .abilities_of(&character.name, false)
            .iter()
            .filter_map(|a| a.hotkey)
            .filter(|key| {
                let key = key.to_lowercase().to_string();
                words.iter().any(|w| w.text == key)
            })
            .collect();
        keys.sort_unstable();
        keys.dedup();
        match keys.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

fn blank(text: &mut String, start: usize, len: usize) {
    text.replace_range(start..start + len, &" ".repeat(len));
}
