use std::path::PathBuf;

use thiserror::Error;

use token_db_lib::WriteError;
use token_db_source::SourceError;

/// Fatal errors that abort a run.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Token list could not be downloaded
    #[error("Failed to fetch token list: {0}")]
    Fetch(SourceError),

    /// Local token list could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Token list is not well-formed XML
    #[error("Failed to parse token list: {0}")]
    Parse(SourceError),

    /// Database file could not be written
    #[error("Failed to write database: {0}")]
    Write(#[from] WriteError),
}

impl CliError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }
}
