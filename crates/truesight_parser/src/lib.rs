//! Rule-based entity resolver for hero and ability questions.
//!
//! This crate transforms a question like "Is Disruptor good against AM?" into
//! a [`ParsedQuestion`] the dialogue layer can route on.
//!
//! # Architecture
//!
//! ```text
//! "Is Disruptor good against AM?"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → ["is", "disruptor", "good", "against", "am"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ENTITY          │  → characters [Disruptor, Anti-Mage], abilities []
//! │ RESOLUTION      │    (alias overlap removed, ordered by position)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ VOCABULARY      │  → cues {advantage}, role None, yes/no false
//! │ LOOKUP          │
//! └─────────────────┘
//!          │
//!          ▼
//!    ParsedQuestion
//! ```
//!
//! Nothing here ever fails: an unmatched entity is simply absent, and
//! ambiguity is resolved by fixed rules.
//!
//! # Modules
//!
//! - [`tokenizer`] - Split text into punctuation-insensitive words with offsets
//! - [`vocabulary`] - Role keywords, yes/no words and intent cues
//! - [`stdlib`] - The standard vocabulary tables
//! - [`resolver`] - Character, ability, role and hotkey resolution
//! - [`question`] - The lazily computed, memoized parse of one turn

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod question;
pub mod resolver;
pub mod stdlib;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for convenience
pub use question::{ParsedQuestion, QuestionParser};
pub use resolver::{CharacterMention, EntityResolver};
pub use tokenizer::{QuestionTokenizer, Word};
pub use vocabulary::{Cue, CueSet, Vocabulary};
