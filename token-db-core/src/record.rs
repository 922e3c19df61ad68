use serde::{Deserialize, Deserializer, Serialize};

/// Type line used when a card carries none.
pub const DEFAULT_TYPE: &str = "Token";

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

/// Hand-written override files may spell an absent value as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_type))
}

/// One printing of a token: the set it appeared in and its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkEntry {
    pub set: String,
    pub url: String,
}

impl ArtworkEntry {
    pub fn new(set: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            set: set.into(),
            url: url.into(),
        }
    }
}

/// A token as extracted from the card XML, or as written in the custom
/// overrides file. Fields are uncleaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTokenRecord {
    pub name: String,

    #[serde(
        rename = "type",
        default = "default_type",
        deserialize_with = "null_as_default_type"
    )]
    pub type_line: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub abilities: String,

    /// Power/toughness, e.g. "2/2" or "*/*".
    #[serde(default, deserialize_with = "null_as_default")]
    pub pt: String,

    /// Colour letters, e.g. "W" or "UB". Empty for colourless.
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: String,

    /// Names of cards that create this token.
    #[serde(
        default,
        alias = "reverseRelated",
        deserialize_with = "null_as_default"
    )]
    pub reverse_related: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub artwork: Vec<ArtworkEntry>,
}

impl RawTokenRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: default_type(),
            abilities: String::new(),
            pt: String::new(),
            colors: String::new(),
            reverse_related: Vec::new(),
            artwork: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = type_line.into();
        self
    }

    pub fn with_abilities(mut self, abilities: impl Into<String>) -> Self {
        self.abilities = abilities.into();
        self
    }

    pub fn with_pt(mut self, pt: impl Into<String>) -> Self {
        self.pt = pt.into();
        self
    }

    pub fn with_colors(mut self, colors: impl Into<String>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn with_reverse_related(mut self, card: impl Into<String>) -> Self {
        self.reverse_related.push(card.into());
        self
    }

    pub fn with_artwork(mut self, set: impl Into<String>, url: impl Into<String>) -> Self {
        self.artwork.push(ArtworkEntry::new(set, url));
        self
    }
}

/// A deduplicated, cleaned token as written to the database file.
///
/// Field order matches the on-disk JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTokenRecord {
    pub name: String,
    pub abilities: String,
    pub pt: String,
    pub colors: String,
    #[serde(rename = "type")]
    pub type_line: String,
    /// Number of distinct cards that create this token.
    pub popularity: u32,
    pub artwork: Vec<ArtworkEntry>,
}

impl NormalizedTokenRecord {
    /// Colour code for display, with colourless tokens spelled out.
    pub fn color_label(&self) -> &str {
        if self.colors.is_empty() {
            "Colorless"
        } else {
            &self.colors
        }
    }
}
