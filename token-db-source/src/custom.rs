//! Hand-maintained token overrides.
//!
//! The overrides file is a JSON array of records shaped like extracted tokens.
//! Every problem with it is recoverable: the run continues without overrides.

use std::fs;
use std::path::Path;

use token_db_core::RawTokenRecord;

use crate::error::SourceError;

/// Default overrides file, relative to the working directory.
pub const DEFAULT_CUSTOM_TOKENS_PATH: &str = "custom_tokens.json";

/// Outcome of reading the overrides file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomTokens {
    /// No file at the given path.
    Missing,
    /// The file holds an empty array.
    Empty,
    /// Records read from the file.
    Loaded(Vec<RawTokenRecord>),
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Read the overrides file, reporting exactly what was found.
///
/// Records missing `reverse_related` or `artwork` get empty lists so they
/// merge like extracted records.
pub fn read_custom_tokens(path: &Path) -> Result<CustomTokens, SourceError> {
    if !path.exists() {
        return Ok(CustomTokens::Missing);
    }

    let contents = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => return Err(SourceError::NotAnArray(json_kind(&other))),
    };
    if items.is_empty() {
        return Ok(CustomTokens::Empty);
    }

    let records = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<RawTokenRecord>, _>>()?;
    Ok(CustomTokens::Loaded(records))
}

/// Load overrides, falling back to none on any problem.
pub fn load_custom_tokens(path: &Path) -> Vec<RawTokenRecord> {
    match read_custom_tokens(path) {
        Ok(CustomTokens::Missing) => {
            log::info!("No custom tokens file found at {}", path.display());
            Vec::new()
        }
        Ok(CustomTokens::Empty) => {
            log::info!("Custom tokens file is empty (no tokens to merge)");
            Vec::new()
        }
        Ok(CustomTokens::Loaded(records)) => {
            log::info!("Loaded {} custom tokens", records.len());
            records
        }
        Err(SourceError::NotAnArray(kind)) => {
            log::warn!(
                "Custom tokens file {} is not a JSON array ({kind}), skipping",
                path.display()
            );
            Vec::new()
        }
        Err(e) => {
            log::error!("Error loading custom tokens from {}: {e}", path.display());
            Vec::new()
        }
    }
}
