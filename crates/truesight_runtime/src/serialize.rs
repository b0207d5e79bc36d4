//! Knowledge base loading and saving.
//!
//! Two formats are supported:
//! - human-authored JSON (see `data/heroes.json` for the layout)
//! - `MessagePack` snapshots, for fast startup on large data sets
//!
//! Both go through [`StoreData`], so every load is validated by
//! [`StoreData::into_store`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use truesight_foundation::{Error, ErrorKind, Result};
use truesight_store::{MemoryStore, StoreData};

/// The demo knowledge base bundled with the binary.
pub const BUNDLED_HEROES: &str = include_str!("../data/heroes.json");

/// Loads the bundled demo knowledge base.
///
/// # Errors
///
/// Returns an error if the bundled data is malformed.
pub fn bundled_store() -> Result<MemoryStore> {
    from_json(BUNDLED_HEROES)
}

/// Parses a JSON knowledge base.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or references unknown characters.
pub fn from_json(json: &str) -> Result<MemoryStore> {
    let data: StoreData = serde_json::from_str(json)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))?;
    data.into_store()
}

/// Renders a store as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(store: &MemoryStore) -> Result<String> {
    serde_json::to_string_pretty(&StoreData::from_store(store))
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Serializes a store to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(store: &MemoryStore) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(&StoreData::from_store(store))
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a store from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization or validation fails.
pub fn from_bytes(bytes: &[u8]) -> Result<MemoryStore> {
    let data: StoreData = rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))?;
    data.into_store()
}

/// Saves a store snapshot to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_snapshot<P: AsRef<Path>>(store: &MemoryStore, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(store)?;

    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;
    Ok(())
}

/// Loads a store snapshot from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization fails.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<MemoryStore> {
    from_bytes(&read_file(path.as_ref())?)
}

/// Loads a JSON knowledge base from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<MemoryStore> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let text = std::str::from_utf8(&bytes).map_err(|e| {
        Error::new(ErrorKind::InvalidData(format!(
            "'{}' is not valid UTF-8: {e}",
            path.display()
        )))
    })?;
    from_json(text)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    Ok(bytes)
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {err}",
        path.display()
    )))
}
