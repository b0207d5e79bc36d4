//! The knowledge store query contract.
//!
//! The dialogue core only ever reads from the store, possibly from many
//! conversations at once, so implementations must be `Send + Sync` and every
//! query must be answerable from an immutable snapshot.

use std::cmp::Ordering;
use std::sync::Arc;

use truesight_foundation::{Ability, Character, Matchup, Role};

/// One alias of one character found in a question.
#[derive(Clone, Debug)]
pub struct AliasMatch {
    /// The character owning the alias.
    pub character: Arc<Character>,
    /// The lowercased alias that matched.
    pub alias: String,
}

/// Result of looking up a character's ultimate.
#[derive(Clone, Debug)]
pub enum UltimateLookup {
    /// The character has no ability flagged ultimate.
    None,
    /// Exactly one ultimate.
    Single(Arc<Ability>),
    /// More than one ultimate, in store order.
    Multiple(Vec<Arc<Ability>>),
}

/// Which side of a matchup a role filter applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchupSide {
    /// The hero whose advantage is measured.
    Subject,
    /// The opposing hero.
    Enemy,
}

/// Filter for matchup queries.
#[derive(Clone, Debug, Default)]
pub struct MatchupFilter {
    /// Only matchups with this subject.
    pub subject: Option<String>,
    /// Only matchups against this enemy.
    pub enemy: Option<String>,
    /// Only matchups with at least this advantage.
    pub min_advantage: Option<f64>,
    /// Only matchups whose hero on the given side plays the role.
    pub role: Option<(MatchupSide, Role)>,
}

impl MatchupFilter {
    /// Matchups of every hero against `enemy`.
    #[must_use]
    pub fn against(enemy: impl Into<String>) -> Self {
        Self {
            enemy: Some(enemy.into()),
            ..Self::default()
        }
    }

    /// Matchups of `subject` against every hero.
    #[must_use]
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    /// Keeps only matchups with at least this advantage.
    #[must_use]
    pub fn with_min_advantage(mut self, advantage: f64) -> Self {
        self.min_advantage = Some(advantage);
        self
    }

    /// Keeps only matchups whose hero on `side` plays `role`.
    #[must_use]
    pub fn with_role(mut self, side: MatchupSide, role: Option<Role>) -> Self {
        self.role = role.map(|r| (side, r));
        self
    }

    /// Checks the name and advantage constraints (not the role constraint).
    #[must_use]
    pub fn accepts(&self, matchup: &Matchup) -> bool {
        self.subject.as_ref().is_none_or(|s| *s == matchup.subject)
            && self.enemy.as_ref().is_none_or(|e| *e == matchup.enemy)
            && self.min_advantage.is_none_or(|min| matchup.advantage >= min)
    }
}

/// Orders matchups by advantage descending, then subject and enemy name.
#[must_use]
pub fn by_advantage_descending(a: &Matchup, b: &Matchup) -> Ordering {
    b.advantage
        .total_cmp(&a.advantage)
        .then_with(|| a.subject.cmp(&b.subject))
        .then_with(|| a.enemy.cmp(&b.enemy))
}

/// Read-only queries over characters, abilities and matchups.
pub trait KnowledgeStore: Send + Sync {
    /// Looks up a character by exact name.
    fn character(&self, name: &str) -> Option<Arc<Character>>;

    /// All characters, ordered by name.
    fn characters(&self) -> Vec<Arc<Character>>;

    /// Finds every (character, alias) pair mentioned in a question.
    ///
    /// An alias of three or more characters matches anywhere in `text`; a
    /// two character alias only matches a whole entry of `words`. Shorter
    /// aliases never match.
    fn alias_candidates(&self, text: &str, words: &[&str]) -> Vec<AliasMatch> {
        let mut found = Vec::new();
        for character in self.characters() {
            for alias in character.search_terms() {
                let matched = match alias.chars().count() {
                    0 | 1 => false,
                    2 => words.contains(&alias.as_str()),
                    _ => text.contains(alias.as_str()),
                };
                if matched {
                    found.push(AliasMatch {
                        character: Arc::clone(&character),
                        alias,
                    });
                }
            }
        }
        found
    }

    /// Characters playing the given role, ordered by name.
    fn characters_with_role(&self, role: Role) -> Vec<Arc<Character>> {
        self.characters()
            .into_iter()
            .filter(|c| c.has_role(role))
            .collect()
    }

    /// All abilities, in store order.
    fn abilities(&self) -> Vec<Arc<Ability>>;

    /// Abilities whose lowercased name occurs in `text`, in store order.
    fn abilities_named_in(&self, text: &str) -> Vec<Arc<Ability>> {
        self.abilities()
            .into_iter()
            .filter(|a| {
                let name = a.name.to_lowercase();
                !name.is_empty() && text.contains(name.as_str())
            })
            .collect()
    }

    /// Looks up an ability by owner and name.
    fn ability(&self, character: &str, name: &str) -> Option<Arc<Ability>> {
        self.abilities()
            .into_iter()
            .find(|a| a.character == character && a.name == name)
    }

    /// A character's abilities in store order, optionally only the standard ones.
    fn abilities_of(&self, character: &str, standard_only: bool) -> Vec<Arc<Ability>> {
        self.abilities()
            .into_iter()
            .filter(|a| a.character == character && (a.standard || !standard_only))
            .collect()
    }

    /// Looks up an ability by owner and hotkey (case insensitive).
    fn ability_by_hotkey(&self, character: &str, hotkey: char) -> Option<Arc<Ability>> {
        self.abilities_of(character, false)
            .into_iter()
            .find(|a| a.hotkey.is_some_and(|key| key.eq_ignore_ascii_case(&hotkey)))
    }

    /// Looks up a character's ultimate, reporting when there is more than one.
    fn ultimate(&self, character: &str) -> UltimateLookup {
        let mut ultimates: Vec<_> = self
            .abilities_of(character, false)
            .into_iter()
            .filter(|a| a.ultimate)
            .collect();
        match ultimates.len() {
            0 => UltimateLookup::None,
            1 => UltimateLookup::Single(ultimates.remove(0)),
            _ => UltimateLookup::Multiple(ultimates),
        }
    }

    /// Looks up the matchup of `subject` against `enemy`.
    fn matchup(&self, subject: &str, enemy: &str) -> Option<Matchup>;

    /// Matchups accepted by `filter`, ordered by advantage descending.
    fn matchups(&self, filter: &MatchupFilter) -> Vec<Matchup>;
}
