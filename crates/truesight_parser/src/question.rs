//! Parsed questions.
//!
//! A [`ParsedQuestion`] is created once per turn. Every derived fact is
//! computed on first access and memoized, so a classifier that only looks at
//! the hero list never pays for cue detection and vice versa.

use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use truesight_foundation::{Ability, Character, Role};
use truesight_store::KnowledgeStore;

use crate::resolver::{CharacterMention, EntityResolver};
use crate::tokenizer::{QuestionTokenizer, Word};
use crate::vocabulary::{Cue, CueSet, Vocabulary};

/// Creates [`ParsedQuestion`]s.
#[derive(Clone, Debug)]
pub struct QuestionParser {
    vocabulary: Vocabulary,
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl QuestionParser {
    /// Creates a parser with the given vocabulary.
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Returns the vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Parses one turn of user text. Absent text parses as empty.
    #[must_use]
    pub fn parse<'a>(&'a self, text: Option<&str>, store: &'a dyn KnowledgeStore) -> ParsedQuestion<'a> {
        let text = text.unwrap_or_default().trim().to_lowercase();
        debug!(question = %text, "parsing question");
        ParsedQuestion::new(text, &self.vocabulary, store)
    }
}

/// One turn of user text with lazily derived facts.
pub struct ParsedQuestion<'a> {
    text: String,
    vocabulary: &'a Vocabulary,
    store: &'a dyn KnowledgeStore,
    words: OnceCell<Vec<Word>>,
    mentions: OnceCell<Vec<CharacterMention>>,
    characters: OnceCell<Vec<Arc<Character>>>,
    abilities: OnceCell<Vec<Arc<Ability>>>,
    role: OnceCell<Option<Role>>,
    hotkey: OnceCell<Option<char>>,
    cues: OnceCell<CueSet>,
}

impl<'a> ParsedQuestion<'a> {
    /// Creates a parsed question over already normalized text.
    #[must_use]
    pub fn new(text: String, vocabulary: &'a Vocabulary, store: &'a dyn KnowledgeStore) -> Self {
        Self {
            text,
            vocabulary,
            store,
            words: OnceCell::new(),
            mentions: OnceCell::new(),
            characters: OnceCell::new(),
            abilities: OnceCell::new(),
            role: OnceCell::new(),
            hotkey: OnceCell::new(),
            cues: OnceCell::new(),
        }
    }

    /// The lowercased, trimmed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the user said nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The store this question is resolved against.
    #[must_use]
    pub fn store(&self) -> &'a dyn KnowledgeStore {
        self.store
    }

    fn resolver(&self) -> EntityResolver<'a> {
        EntityResolver::new(self.store)
    }

    /// The words of the question.
    pub fn words(&self) -> &[Word] {
        self.words.get_or_init(|| QuestionTokenizer::tokenize(&self.text))
    }

    /// Character mentions with positions, in order of first mention.
    pub fn mentions(&self) -> &[CharacterMention] {
        self.mentions
            .get_or_init(|| self.resolver().characters(&self.text, self.words()))
    }

    /// Mentioned characters, in order of first mention.
    pub fn characters(&self) -> &[Arc<Character>] {
        self.characters.get_or_init(|| {
            self.mentions()
                .iter()
                .map(|m| Arc::clone(&m.character))
                .collect()
        })
    }

    /// Named abilities, in store order.
    pub fn abilities(&self) -> &[Arc<Ability>] {
        self.abilities
            .get_or_init(|| self.resolver().abilities(&self.text, self.mentions()))
    }

    /// The single role named, if any.
    pub fn role(&self) -> Option<Role> {
        *self.role.get_or_init(|| self.vocabulary.role_in(&self.text))
    }

    /// The hotkey named, when exactly one character is mentioned and exactly
    /// one of its hotkeys occurs as a word.
    pub fn hotkey(&self) -> Option<char> {
        *self.hotkey.get_or_init(|| match self.characters() {
            [only] => self.hotkey_for(only),
            _ => None,
        })
    }

    /// The hotkey of `character` named in this question, if exactly one is.
    #[must_use]
    pub fn hotkey_for(&self, character: &Character) -> Option<char> {
        self.resolver().hotkey_for(character, self.words())
    }

    /// Whether the user answered "yes".
    pub fn yes(&self) -> bool {
        self.vocabulary.says_yes(self.words())
    }

    /// Whether the user answered "no".
    pub fn no(&self) -> bool {
        self.vocabulary.says_no(self.words())
    }

    /// Whether the question refers back to the previous subject ("it", "that").
    pub fn refers_back(&self) -> bool {
        self.vocabulary.refers_back(self.words())
    }

    /// The intent cues present, including [`Cue::Hotkey`] when a hotkey is named.
    pub fn cues(&self) -> &CueSet {
        self.cues.get_or_init(|| {
            let mut cues = self.vocabulary.cues_in(&self.text, self.words());
            if self.hotkey().is_some() {
                cues.insert(Cue::Hotkey);
            }
            cues
        })
    }

    /// Checks whether a cue is present.
    pub fn has_cue(&self, cue: Cue) -> bool {
        self.cues().contains(cue)
    }

    /// Byte offset of the first keyword of `cue`.
    pub fn cue_position(&self, cue: Cue) -> Option<usize> {
        self.vocabulary.cue_position(cue, &self.text, self.words())
    }

    /// Byte offset of the first mention of `character`.
    pub fn position_of(&self, character: &Character) -> Option<usize> {
        self.mentions()
            .iter()
            .find(|m| m.character.name == character.name)
            .map(|m| m.position)
    }
}

impl fmt::Debug for ParsedQuestion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedQuestion")
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ParsedQuestion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let characters: Vec<&str> = self.characters().iter().map(|c| c.name.as_str()).collect();
        let abilities: Vec<&str> = self.abilities().iter().map(|a| a.name.as_str()).collect();
        let cues: Vec<&str> = self.cues().iter().map(Cue::name).collect();
        write!(
            f,
            "question '{}': characters [{}], abilities [{}], role {}, cues [{}]",
            self.text,
            characters.join(", "),
            abilities.join(", "),
            self.role().map_or("none", Role::name),
            cues.join(", ")
        )
    }
}
