//! Conversation engine for Truesight.
//!
//! This crate turns one [`ParsedQuestion`](truesight_parser::ParsedQuestion)
//! plus an optional conversation token into a reply and the next token.
//!
//! # Turn flow
//!
//! ```text
//! text + token
//!      │
//!      ▼
//! ┌──────────┐   absent / broken   ┌────────────┐
//! │  token   │ ──────────────────▶ │ classifier │
//! └──────────┘                     └────────────┘
//!      │ context                         │ context
//!      ▼                                 ▼
//! ┌─────────────────────────────────────────────┐
//! │ state machine: direct answer, or recovery   │
//! └─────────────────────────────────────────────┘
//!      │
//!      ▼
//! reply + follow-up + next token
//! ```
//!
//! # Modules
//!
//! - [`context`] - The context variants and their direct answers
//! - [`classifier`] - Picks a context for a question
//! - [`machine`] - Direct answer, recovery and follow-up assembly
//! - [`respond`] - Response text
//! - [`token`] - Versioned, opaque conversation tokens
//! - [`reporter`] - Usage reporting side channel
//! - [`engine`] - The turn boundary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classifier;
pub mod context;
pub mod engine;
pub mod machine;
pub mod reporter;
pub mod respond;
pub mod token;

pub use classifier::IntentClassifier;
pub use context::{ActiveContext, Aspect, Context, ContextKind, Next, Refusal, Reply};
pub use engine::{Engine, EngineConfig, TurnOutcome};
pub use machine::{Resolution, StateMachine, TurnEnv};
pub use reporter::{LogReporter, NullReporter, UsageCounters, UsageReporter, UsageStats};
pub use token::{TOKEN_VERSION, decode_token, encode_token};
