//! Integration tests for Layer 1: Store
//!
//! Tests for the knowledge store contract, the in-memory snapshot store and
//! its flat data form.

mod data;
mod queries;
