//! Cross-layer integration tests for Truesight
//!
//! Tests that verify the runtime, dialogue and store layers work together.

mod concurrency;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use truesight_dialogue::Engine;
use truesight_runtime::serialize::bundled_store;

/// An engine over the bundled knowledge base.
pub fn engine() -> Engine {
    Engine::new(Arc::new(bundled_store().expect("bundled data loads")))
}

/// A per-process scratch path that is removed when dropped.
pub struct ScratchFile(pub PathBuf);

impl ScratchFile {
    pub fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!(
            "truesight_{}_{name}",
            std::process::id()
        )))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
