/// Output layout of the generated database file.
///
/// The two layouts are not wire-compatible: they differ in fields, in how the
/// type line is cleaned, and in what counts as a duplicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputSchema {
    /// Popularity-scored records with artwork. Type lines lose their "Token "
    /// prefix, abilities take part in deduplication, and game-state markers
    /// (counters, dungeons, ...) are dropped.
    #[default]
    Popularity,
    /// The earlier five-field layout. Type lines gain a "Token " prefix and
    /// duplicates are detected on name, P/T, colours and type only.
    Legacy,
}

const ALL_SCHEMAS: &[OutputSchema] = &[OutputSchema::Popularity, OutputSchema::Legacy];

impl OutputSchema {
    pub fn name(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Legacy => "legacy",
        }
    }

    /// File written when no output path is given.
    pub fn default_output_path(self) -> &'static str {
        match self {
            Self::Popularity => "token_database.json",
            Self::Legacy => "TokenDatabase.json",
        }
    }

    /// Whether ability text is part of the deduplication key.
    pub fn keys_on_abilities(self) -> bool {
        matches!(self, Self::Popularity)
    }

    /// Whether non-gameplay token categories are filtered out.
    pub fn filters_categories(self) -> bool {
        matches!(self, Self::Popularity)
    }

    pub fn all() -> &'static [OutputSchema] {
        ALL_SCHEMAS
    }
}

impl std::fmt::Display for OutputSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known schema.
#[derive(Debug, Clone)]
pub struct UnknownSchema(pub String);

impl std::fmt::Display for UnknownSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown schema '{}' (expected popularity or legacy)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSchema {}

impl std::str::FromStr for OutputSchema {
    type Err = UnknownSchema;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ALL_SCHEMAS
            .iter()
            .copied()
            .find(|schema| schema.name() == lower)
            .ok_or_else(|| UnknownSchema(s.to_string()))
    }
}
