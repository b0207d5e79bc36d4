//! Vocabulary registry for question keywords.
//!
//! Stores role keywords, yes/no words, back-reference words and intent cues.
//! Lookups never fail; an unrecognised question simply carries no cues.

use std::collections::BTreeSet;
use std::fmt;

use truesight_foundation::Role;

use crate::stdlib;
use crate::tokenizer::Word;

/// A keyword family signalling what a question is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cue {
    /// Cooldown of an ability.
    Cooldown,
    /// Spell immunity interaction.
    SpellImmunity,
    /// Damage type.
    DamageType,
    /// Strengths, counters or a head-to-head comparison.
    Advantage,
    /// A hero's ultimate.
    Ultimate,
    /// A hero's ability list.
    AbilityList,
    /// A hero's ability on a hotkey. Detected from data, not from keywords.
    Hotkey,
    /// What the assistant can do.
    Help,
    /// The user wants to leave feedback.
    Feedback,
}

impl Cue {
    /// Returns the cue name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cooldown => "cooldown",
            Self::SpellImmunity => "spell-immunity",
            Self::DamageType => "damage-type",
            Self::Advantage => "advantage",
            Self::Ultimate => "ultimate",
            Self::AbilityList => "ability-list",
            Self::Hotkey => "hotkey",
            Self::Help => "help",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The cues present in one question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueSet(BTreeSet<Cue>);

impl CueSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cue.
    pub fn insert(&mut self, cue: Cue) {
        self.0.insert(cue);
    }

    /// Checks whether the cue is present.
    #[must_use]
    pub fn contains(&self, cue: Cue) -> bool {
        self.0.contains(&cue)
    }

    /// Returns true if no cue is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether any cue outside `allowed` is present.
    #[must_use]
    pub fn has_other_than(&self, allowed: &[Cue]) -> bool {
        self.0.iter().any(|c| !allowed.contains(c))
    }

    /// Iterates cues in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Cue> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Cue> for CueSet {
    fn from_iter<I: IntoIterator<Item = Cue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keywords for one cue.
#[derive(Clone, Debug)]
struct CueKeywords {
    cue: Cue,
    /// Matched anywhere in the text
    phrases: Vec<String>,
    /// Matched against whole words only
    words: Vec<String>,
}

impl CueKeywords {
    fn first_position(&self, text: &str, words: &[Word]) -> Option<usize> {
        let phrase_hit = self.phrases.iter().filter_map(|p| text.find(p.as_str()));
        let word_hit = words
            .iter()
            .filter(|w| self.words.contains(&w.text))
            .map(|w| w.offset);
        phrase_hit.chain(word_hit).min()
    }
}

/// Registry of question vocabulary.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    roles: Vec<(Role, Vec<String>)>,
    yes: Vec<String>,
    no: Vec<String>,
    back_references: Vec<String>,
    cues: Vec<CueKeywords>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vocabulary with the standard tables loaded.
    #[must_use]
    pub fn standard() -> Self {
        let mut vocab = Self::new();
        for (role, keywords) in stdlib::ROLES {
            vocab.register_role(*role, keywords);
        }
        vocab.register_yes(stdlib::YES_WORDS);
        vocab.register_no(stdlib::NO_WORDS);
        vocab.register_back_references(stdlib::BACK_REFERENCES);
        for (cue, phrases, words) in stdlib::CUES {
            vocab.register_cue(*cue, phrases, words);
        }
        vocab
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers substring keywords for a role.
    pub fn register_role(&mut self, role: Role, keywords: &[&str]) {
        let keywords = lowered(keywords);
        if let Some((_, existing)) = self.roles.iter_mut().find(|(r, _)| *r == role) {
            existing.extend(keywords);
        } else {
            self.roles.push((role, keywords));
        }
    }

    /// Registers whole words that answer "yes".
    pub fn register_yes(&mut self, words: &[&str]) {
        self.yes.extend(lowered(words));
    }

    /// Registers whole words that answer "no".
    pub fn register_no(&mut self, words: &[&str]) {
        self.no.extend(lowered(words));
    }

    /// Registers whole words that refer back to the previous subject.
    pub fn register_back_references(&mut self, words: &[&str]) {
        self.back_references.extend(lowered(words));
    }

    /// Registers keywords for a cue.
    ///
    /// Phrases match anywhere in the text; words must match a whole word.
    pub fn register_cue(&mut self, cue: Cue, phrases: &[&str], words: &[&str]) {
        if let Some(existing) = self.cues.iter_mut().find(|k| k.cue == cue) {
            existing.phrases.extend(lowered(phrases));
            existing.words.extend(lowered(words));
        } else {
            self.cues.push(CueKeywords {
                cue,
                phrases: lowered(phrases),
                words: lowered(words),
            });
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Detects the single role a question names.
    ///
    /// Returns `None` when no role keyword occurs, or when keywords of two
    /// different roles occur.
    #[must_use]
    pub fn role_in(&self, text: &str) -> Option<Role> {
        let mut found = self
            .roles
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|(role, _)| *role);
        let first = found.next()?;
        if found.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Checks whether any word answers "yes".
    #[must_use]
    pub fn says_yes(&self, words: &[Word]) -> bool {
        words.iter().any(|w| self.yes.contains(&w.text))
    }

    /// Checks whether any word answers "no".
    #[must_use]
    pub fn says_no(&self, words: &[Word]) -> bool {
        words.iter().any(|w| self.no.contains(&w.text))
    }

    /// Checks whether any word refers back to the previous subject.
    #[must_use]
    pub fn refers_back(&self, words: &[Word]) -> bool {
        words.iter().any(|w| self.back_references.contains(&w.text))
    }

    /// Collects the keyword cues present in a question.
    #[must_use]
    pub fn cues_in(&self, text: &str, words: &[Word]) -> CueSet {
        self.cues
            .iter()
            .filter(|k| k.first_position(text, words).is_some())
            .map(|k| k.cue)
            .collect()
    }

    /// Returns the byte offset of the first keyword for `cue`, if any.
    #[must_use]
    pub fn cue_position(&self, cue: Cue, text: &str, words: &[Word]) -> Option<usize> {
        self.cues
            .iter()
            .filter(|k| k.cue == cue)
            .filter_map(|k| k.first_position(text, words))
            .min()
    }
}

fn lowered(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}
