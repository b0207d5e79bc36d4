//! Configuration, data loading, REPL, and CLI for Truesight.
//!
//! This crate provides:
//! - [`RuntimeConfig`] - Settings from defaults, environment and flags
//! - [`init_logging`] - The `tracing` subscriber used by the binary
//! - Knowledge base loading from JSON and `MessagePack` snapshots
//! - [`Repl`] - Interactive conversation loop

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::{DataSource, LogConfig, RuntimeConfig, init_logging};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Handled, Repl};
pub use session::Session;
