//! Record persistence as JSON.
//!
//! Records are stored as a single pretty-printed JSON document with camelCase
//! keys. Loading is forgiving: missing fields take their seed defaults,
//! unknown keys are ignored, and unrecognized enum values fall back rather
//! than failing, so documents written by older or newer versions still open.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::record::CoverRecord;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("i/o error accessing record file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the record to pretty JSON.
pub fn to_json(record: &CoverRecord) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parse a record from JSON text.
pub fn from_json(json: &str) -> Result<CoverRecord, PersistError> {
    Ok(serde_json::from_str(json)?)
}

/// Write the record to `path` as JSON.
pub fn save_record(path: &Path, record: &CoverRecord) -> Result<(), PersistError> {
    fs::write(path, to_json(record)?)?;
    Ok(())
}

/// Load a record from a JSON file at `path`.
pub fn load_record(path: &Path) -> Result<CoverRecord, PersistError> {
    let json = fs::read_to_string(path)?;
    from_json(&json)
}
