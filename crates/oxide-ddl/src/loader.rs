//! Schema files.
//!
//! A schema file is the JSON form of a [`TableSchema`]: a `fields` object
//! and an optional `meta` object with `indexes`, `constraints` and `table`.

use std::fs;
use std::path::Path;

use oxide_ddl_core::TableSchema;
use tracing::debug;

use crate::error::{ExecuteError, Result};

/// Loads a table schema from a JSON file.
///
/// # Errors
///
/// Returns [`ExecuteError::Io`] if the file cannot be read and
/// [`ExecuteError::ParseError`] if it does not describe a schema.
pub fn load_schema(path: impl AsRef<Path>) -> Result<TableSchema> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading schema file");
    let contents = fs::read_to_string(path)?;
    TableSchema::from_json(&contents).map_err(|e| ExecuteError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
