//! Knowledge store contract and in-memory snapshot store for Truesight.
//!
//! This crate provides:
//! - [`KnowledgeStore`] - The read-only query contract the dialogue core consumes
//! - [`MemoryStore`] - Immutable snapshot store with structural sharing
//! - [`StoreData`] - Flat, serializable form of a store (with the `serde` feature)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod data;
pub mod memory;
pub mod query;

pub use data::StoreData;
pub use memory::MemoryStore;
pub use query::{AliasMatch, KnowledgeStore, MatchupFilter, MatchupSide, UltimateLookup};
