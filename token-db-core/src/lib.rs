//! Shared record types for the token database pipeline.

pub mod record;
pub mod schema;

pub use record::{ArtworkEntry, NormalizedTokenRecord, RawTokenRecord, DEFAULT_TYPE};
pub use schema::{OutputSchema, UnknownSchema};
