//! Truesight - Rule-based conversational question answering
//!
//! This crate re-exports all layers of the Truesight system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: truesight_runtime    - Config, logging, data loading, REPL, CLI
//! Layer 3: truesight_dialogue   - Classifier, contexts, state machine, tokens
//! Layer 2: truesight_parser     - Tokenizer, vocabulary, entity resolution
//! Layer 1: truesight_store      - Knowledge store contract, snapshot store
//! Layer 0: truesight_foundation - Domain records, Error
//! ```

pub use truesight_dialogue as dialogue;
pub use truesight_foundation as foundation;
pub use truesight_parser as parser;
pub use truesight_runtime as runtime;
pub use truesight_store as store;
