//! Domain records and error types for Truesight.
//!
//! This crate provides:
//! - [`Character`] - A playable hero with aliases and role flags
//! - [`Ability`] - A skill owned by exactly one character
//! - [`Matchup`] - A directional advantage score between two characters
//! - [`Role`] and [`RoleSet`] - Gameplay positions
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod model;
pub mod role;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use model::{Ability, Character, DamageType, Matchup, SpellImmunity};
pub use role::{Role, RoleSet};
