//! Runtime configuration and logging setup.
//!
//! Settings come from three places, later ones winning:
//! defaults, `TRUESIGHT_*` environment variables, then command line flags
//! (applied by the binary through the builder methods).

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use truesight_dialogue::EngineConfig;
use truesight_foundation::{Error, ErrorKind, Result};
use truesight_store::MemoryStore;

use crate::serialize;

/// Environment variable naming a knowledge base file.
pub const ENV_DATA: &str = "TRUESIGHT_DATA";
/// Environment variable holding the sample question seed.
pub const ENV_SEED: &str = "TRUESIGHT_SEED";
/// Environment variable holding the user identifier.
pub const ENV_USER: &str = "TRUESIGHT_USER";

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "truesight=info";

/// Where the knowledge base comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DataSource {
    /// The demo data compiled into the binary.
    #[default]
    Bundled,
    /// A JSON file.
    Json(PathBuf),
    /// A `MessagePack` snapshot file.
    Snapshot(PathBuf),
}

impl DataSource {
    /// Picks a source for a path by its extension.
    ///
    /// `.msgpack` and `.mpk` files are snapshots; anything else is JSON.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_snapshot = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("msgpack") || ext.eq_ignore_ascii_case("mpk"));
        if is_snapshot {
            Self::Snapshot(path)
        } else {
            Self::Json(path)
        }
    }

    /// Loads the knowledge base.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or is invalid.
    pub fn load(&self) -> Result<MemoryStore> {
        match self {
            Self::Bundled => serialize::bundled_store(),
            Self::Json(path) => serialize::load_json(path),
            Self::Snapshot(path) => serialize::load_snapshot(path),
        }
    }

    /// Path of the file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Bundled => None,
            Self::Json(path) | Self::Snapshot(path) => Some(path),
        }
    }
}

/// Logging output settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

/// Everything the binary needs to start.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    /// Knowledge base source.
    pub data: DataSource,
    /// Engine tuning.
    pub engine: EngineConfig,
    /// User identifier passed to usage reporting.
    pub user: Option<String>,
    /// Logging settings.
    pub log: LogConfig,
}

impl RuntimeConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TRUESIGHT_SEED` is not an unsigned integer.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads overrides through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed variable is not an unsigned integer.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = present(ENV_DATA) {
            config = config.with_data(DataSource::from_path(path));
        }
        if let Some(seed) = present(ENV_SEED) {
            config = config.with_seed(parse_seed(&seed)?);
        }
        if let Some(user) = present(ENV_USER) {
            config = config.with_user(user);
        }
        Ok(config)
    }

    /// Builder method to set the data source.
    #[must_use]
    pub fn with_data(mut self, data: DataSource) -> Self {
        self.data = data;
        self
    }

    /// Builder method to set the sample question seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine = self.engine.with_seed(seed);
        self
    }

    /// Builder method to set the user identifier.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Builder method to switch JSON logging on or off.
    #[must_use]
    pub fn with_json_log(mut self, json: bool) -> Self {
        self.log.json = json;
        self
    }

    /// Builder method to replace the engine tuning.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Parses a seed value.
///
/// # Errors
///
/// Returns an error if `value` is not an unsigned 64-bit integer.
pub fn parse_seed(value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        Error::new(ErrorKind::InvalidData(format!("invalid seed: {value}")))
    })
}

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr so they never mix with answers on stdout. `RUST_LOG`
/// overrides the configured default filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| Error::new(ErrorKind::Internal(format!("logging setup failed: {e}"))))
}
