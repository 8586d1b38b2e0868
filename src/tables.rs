//! Loading of the two analysis lookup tables.
//!
//! The tables arrive as JSON objects already extracted from djay's
//! databases (`{ "<slug or persistent ID>": { "bpm": .., "key": .. } }`);
//! this module never touches the on-disk plists themselves.

use std::fs;
use std::path::Path;

use crate::types::MetadataTable;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot read {path}: {error}")]
    Io { path: String, error: String },
    #[error("cannot parse {path}: {error}")]
    Parse { path: String, error: String },
}

/// Load one metadata table from a JSON file. Entries with absent or missing
/// fields are kept with those fields as `None`.
pub fn load_table(path: &Path) -> Result<MetadataTable, TableError> {
    let display = path.display().to_string();
    let data = fs::read_to_string(path).map_err(|e| TableError::Io {
        path: display.clone(),
        error: e.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|e| TableError::Parse {
        path: display,
        error: e.to_string(),
    })
}
