//! JSON persistence for the stash file.
//!
//! The file is a single flat JSON object mapping flag name to flag value,
//! with no versioning or metadata. It is written pretty-printed so users can edit
//! it by hand. A missing file is a normal condition (first run) and is
//! reported as `Ok(None)` rather than an error; everything else propagates
//! with the offending path attached.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::FlagstashError;

/// Load the persisted mapping from `path`.
///
/// Returns `Ok(None)` when the file does not exist. I/O and JSON decode
/// failures are returned as errors.
pub fn load(path: &Path) -> Result<Option<BTreeMap<String, String>>, FlagstashError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(FlagstashError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let values = serde_json::from_str(&content).map_err(|e| FlagstashError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(values))
}

/// Write the full mapping to `path` as a pretty-printed JSON object.
/// Creates parent directories as needed.
pub fn save(path: &Path, values: &BTreeMap<String, String>) -> Result<(), FlagstashError> {
    let content = serde_json::to_string_pretty(values).map_err(|e| FlagstashError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| FlagstashError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| FlagstashError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
