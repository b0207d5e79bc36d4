//! Error types for the Truesight system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Two kinds are control signals rather than faults: [`ErrorKind::DoNotUnderstand`]
//! and [`ErrorKind::Goodbye`]. The turn boundary turns them into outcomes the
//! caller can act on; every other kind is contained there as a generic apology.

use std::fmt;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Truesight operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a "question not understood" signal.
    #[must_use]
    pub fn do_not_understand() -> Self {
        Self::new(ErrorKind::DoNotUnderstand)
    }

    /// Creates a "conversation finished" signal.
    #[must_use]
    pub fn goodbye() -> Self {
        Self::new(ErrorKind::Goodbye)
    }

    /// Creates an error for a freshly classified context that refused its first turn.
    #[must_use]
    pub fn unusable_context(context: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnusableContext(context.into()))
    }

    /// Creates a conversation token error.
    #[must_use]
    pub fn token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Token(message.into()))
    }

    /// Creates an unknown character error.
    #[must_use]
    pub fn unknown_character(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCharacter(name.into()))
    }

    /// Creates an unknown ability error.
    #[must_use]
    pub fn unknown_ability(character: impl Into<String>, ability: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAbility {
            character: character.into(),
            ability: ability.into(),
        })
    }

    /// Returns true for the two control signals that end a turn without a fault.
    #[must_use]
    pub fn is_signal(&self) -> bool {
        matches!(self.kind, ErrorKind::DoNotUnderstand | ErrorKind::Goodbye)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No handler could make sense of the question.
    #[error("question not understood")]
    DoNotUnderstand,

    /// The user ended the conversation.
    #[error("conversation finished")]
    Goodbye,

    /// A context handed out by the classifier refused the turn it was chosen for.
    #[error("classifier produced an unusable context: {0}")]
    UnusableContext(String),

    /// The conversation token could not be encoded or decoded.
    #[error("conversation token error: {0}")]
    Token(String),

    /// No character with this name exists in the knowledge base.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// The named character has no ability with this name.
    #[error("unknown ability: {ability} of {character}")]
    UnknownAbility {
        /// Owning character name.
        character: String,
        /// Ability name.
        ability: String,
    },

    /// A knowledge base contained two characters with the same name.
    #[error("duplicate character: {0}")]
    DuplicateCharacter(String),

    /// A record referenced inconsistent data while loading a knowledge base.
    #[error("invalid knowledge base: {0}")]
    InvalidData(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or component name.
    pub source: Option<String>,
    /// The question being answered when the error occurred.
    pub question: Option<String>,
    /// Chain of handlers the turn passed through.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the question text.
    #[must_use]
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if let Some(question) = &self.question {
            write!(f, " while answering '{question}'")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
