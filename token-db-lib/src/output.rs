//! Database file writer.

use std::fs;
use std::path::Path;

use serde::Serialize;

use token_db_core::{NormalizedTokenRecord, OutputSchema};

use crate::error::WriteError;

/// Five-field view written by [`OutputSchema::Legacy`].
#[derive(Serialize)]
struct LegacyRecord<'a> {
    name: &'a str,
    abilities: &'a str,
    pt: &'a str,
    colors: &'a str,
    #[serde(rename = "type")]
    type_line: &'a str,
}

impl<'a> From<&'a NormalizedTokenRecord> for LegacyRecord<'a> {
    fn from(token: &'a NormalizedTokenRecord) -> Self {
        Self {
            name: &token.name,
            abilities: &token.abilities,
            pt: &token.pt,
            colors: &token.colors,
            type_line: &token.type_line,
        }
    }
}

/// Render the database as pretty-printed JSON in the schema's layout.
pub fn render_database(
    tokens: &[NormalizedTokenRecord],
    schema: OutputSchema,
) -> Result<String, WriteError> {
    let json = match schema {
        OutputSchema::Popularity => serde_json::to_string_pretty(tokens)?,
        OutputSchema::Legacy => {
            let legacy: Vec<LegacyRecord<'_>> = tokens.iter().map(LegacyRecord::from).collect();
            serde_json::to_string_pretty(&legacy)?
        }
    };
    Ok(json)
}

/// Write the database to `path`, replacing any previous file.
///
/// The file is written next to the target and renamed into place, so a
/// failed run never leaves a truncated database behind.
pub fn write_database(
    path: &Path,
    tokens: &[NormalizedTokenRecord],
    schema: OutputSchema,
) -> Result<(), WriteError> {
    let json = render_database(tokens, schema)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| WriteError::io(parent, e))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| WriteError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(WriteError::io(path, e));
    }

    log::debug!("Wrote {} tokens to {}", tokens.len(), path.display());
    Ok(())
}
