//! Grouping of raw records into deduplicated database entries.
//!
//! Records are cleaned, keyed on their cleaned fields, and folded into one
//! accumulator per key. Scalar fields are last-write-wins, so overrides
//! appended after generated records replace them. Reverse-related cards and
//! artwork are unioned across every record sharing the key.

use std::collections::{HashMap, HashSet};

use token_db_core::{ArtworkEntry, NormalizedTokenRecord, OutputSchema, RawTokenRecord};

use crate::clean::{clean_abilities, clean_name, clean_type};

/// Type-line fragments marking game-state markers rather than physical tokens.
pub const EXCLUDED_TYPE_FRAGMENTS: &[&str] = &["Counter", "State", "Bounty", "Dungeon"];

/// Identity of a database entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    pub name: String,
    pub pt: String,
    pub colors: String,
    pub type_line: String,
    /// Only part of the key under [`OutputSchema::Popularity`], so reprints
    /// with different rules text stay separate.
    pub abilities: Option<String>,
}

impl TokenKey {
    pub fn of(record: &NormalizedTokenRecord, schema: OutputSchema) -> Self {
        Self {
            name: record.name.clone(),
            pt: record.pt.clone(),
            colors: record.colors.clone(),
            type_line: record.type_line.clone(),
            abilities: schema
                .keys_on_abilities()
                .then(|| record.abilities.clone()),
        }
    }
}

/// A raw record after cleaning.
#[derive(Debug, Clone)]
struct CleanedToken {
    name: String,
    abilities: String,
    pt: String,
    colors: String,
    type_line: String,
}

impl CleanedToken {
    fn from_raw(raw: &RawTokenRecord, schema: OutputSchema) -> Option<Self> {
        let name = clean_name(&raw.name);
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            abilities: clean_abilities(&raw.abilities),
            pt: raw.pt.clone(),
            colors: raw.colors.clone(),
            type_line: clean_type(&raw.type_line, schema),
        })
    }

    fn key(&self, schema: OutputSchema) -> TokenKey {
        TokenKey {
            name: self.name.clone(),
            pt: self.pt.clone(),
            colors: self.colors.clone(),
            type_line: self.type_line.clone(),
            abilities: schema.keys_on_abilities().then(|| self.abilities.clone()),
        }
    }
}

/// Everything seen so far for one key.
#[derive(Debug)]
struct TokenGroup {
    token: CleanedToken,
    reverse_related: HashSet<String>,
    artwork: Vec<ArtworkEntry>,
    artwork_urls: HashSet<String>,
}

impl TokenGroup {
    fn new(token: CleanedToken) -> Self {
        Self {
            token,
            reverse_related: HashSet::new(),
            artwork: Vec::new(),
            artwork_urls: HashSet::new(),
        }
    }

    fn absorb(&mut self, token: CleanedToken, raw: &RawTokenRecord) {
        self.token = token;
        self.reverse_related
            .extend(raw.reverse_related.iter().cloned());
        for art in &raw.artwork {
            if self.artwork_urls.insert(art.url.clone()) {
                self.artwork.push(art.clone());
            }
        }
    }

    fn is_game_state_marker(&self) -> bool {
        EXCLUDED_TYPE_FRAGMENTS
            .iter()
            .any(|fragment| self.token.type_line.contains(fragment))
    }

    fn finish(self) -> NormalizedTokenRecord {
        let popularity = u32::try_from(self.reverse_related.len()).unwrap_or(u32::MAX);
        NormalizedTokenRecord {
            name: self.token.name,
            abilities: self.token.abilities,
            pt: self.token.pt,
            colors: self.token.colors,
            type_line: self.token.type_line,
            popularity,
            artwork: self.artwork,
        }
    }
}

/// Result of [`normalize`].
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Deduplicated records sorted by name.
    pub tokens: Vec<NormalizedTokenRecord>,
    /// Groups dropped as game-state markers.
    pub excluded: usize,
    /// Raw records dropped because their cleaned name was empty.
    pub unnamed: usize,
}

/// Append overrides after generated records so they win key collisions.
pub fn merge_custom(
    mut generated: Vec<RawTokenRecord>,
    custom: Vec<RawTokenRecord>,
) -> Vec<RawTokenRecord> {
    if custom.is_empty() {
        return generated;
    }
    log::info!(
        "Merging {} custom tokens with {} generated tokens",
        custom.len(),
        generated.len()
    );
    generated.extend(custom);
    log::info!(
        "Merged list contains {} total tokens (before deduplication)",
        generated.len()
    );
    generated
}

/// Clean, deduplicate and score raw records.
pub fn normalize(records: &[RawTokenRecord], schema: OutputSchema) -> Normalized {
    let mut index: HashMap<TokenKey, usize> = HashMap::new();
    let mut groups: Vec<TokenGroup> = Vec::new();
    let mut unnamed = 0;

    for raw in records {
        let Some(token) = CleanedToken::from_raw(raw, schema) else {
            unnamed += 1;
            continue;
        };
        let key = token.key(schema);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(TokenGroup::new(token.clone()));
            groups.len() - 1
        });
        groups[slot].absorb(token, raw);
    }

    let mut excluded = 0;
    let mut tokens = Vec::with_capacity(groups.len());
    for group in groups {
        if schema.filters_categories() && group.is_game_state_marker() {
            excluded += 1;
            continue;
        }
        tokens.push(group.finish());
    }

    if excluded > 0 {
        log::info!(
            "Excluded {excluded} non-traditional token types ({})",
            EXCLUDED_TYPE_FRAGMENTS.join("/")
        );
    }

    // Stable: equal names keep first-seen order.
    tokens.sort_by(|a, b| a.name.cmp(&b.name));

    Normalized {
        tokens,
        excluded,
        unnamed,
    }
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
