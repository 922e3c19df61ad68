//! Cleaning, deduplication and popularity scoring for the token database.

pub mod clean;
pub mod error;
pub mod merge;
pub mod output;
pub mod stats;

pub use error::WriteError;
pub use merge::{Normalized, TokenKey, merge_custom, normalize};
pub use output::{render_database, write_database};
pub use stats::{BracketPlan, FrequencyRow, Percentiles, PopularityStats, color_counts, top_tokens};
pub use token_db_core::{ArtworkEntry, NormalizedTokenRecord, OutputSchema, RawTokenRecord};
