//! Token extraction from the Cockatrice card database XML.
//!
//! Layout of the relevant part of the document:
//!
//! ```text
//! <cockatrice_carddatabase version="4">
//!   <cards>
//!     <card>
//!       <name>Angel Token</name>
//!       <text>Flying</text>
//!       <prop>
//!         <type>Token Creature — Angel</type>
//!         <pt>4/4</pt>
//!         <colors>W</colors>
//!       </prop>
//!       <set picURL="https://...">TM19</set>
//!       <reverse-related>Resplendent Angel</reverse-related>
//!       <token>1</token>
//!     </card>
//!   </cards>
//! </cockatrice_carddatabase>
//! ```

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use token_db_core::{ArtworkEntry, DEFAULT_TYPE, RawTokenRecord};

use crate::error::SourceError;

/// Value of `<token>` that marks a card as a token.
const TOKEN_MARKER: &str = "1";

/// Leaf elements whose text we collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Text,
    Token,
    Type,
    Pt,
    Colors,
    ReverseRelated,
    Set,
}

impl Field {
    fn card_child(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Self::Name),
            b"text" => Some(Self::Text),
            b"token" => Some(Self::Token),
            b"reverse-related" => Some(Self::ReverseRelated),
            b"set" => Some(Self::Set),
            _ => None,
        }
    }

    fn prop_child(tag: &[u8]) -> Option<Self> {
        match tag {
            b"type" => Some(Self::Type),
            b"pt" => Some(Self::Pt),
            b"colors" => Some(Self::Colors),
            _ => None,
        }
    }
}

/// Fields of one `<card>` while it is being read. Single-valued fields keep
/// the first occurrence only.
#[derive(Debug, Default)]
struct CardBuilder {
    depth: usize,
    name: Option<String>,
    text: Option<String>,
    token: Option<String>,
    prop_seen: bool,
    in_prop: bool,
    type_line: Option<String>,
    pt: Option<String>,
    colors: Option<String>,
    reverse_related: Vec<String>,
    artwork: Vec<ArtworkEntry>,
    pending_pic_url: Option<String>,
}

impl CardBuilder {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    fn commit(&mut self, field: Field, raw: String) {
        match field {
            Field::Name => {
                self.name.get_or_insert(raw);
            }
            Field::Text => {
                self.text.get_or_insert(raw);
            }
            Field::Token => {
                self.token.get_or_insert(raw);
            }
            Field::Type => {
                self.type_line.get_or_insert(raw);
            }
            Field::Pt => {
                self.pt.get_or_insert(raw);
            }
            Field::Colors => {
                self.colors.get_or_insert(raw);
            }
            Field::ReverseRelated => {
                let card = raw.trim();
                if !card.is_empty() {
                    self.reverse_related.push(card.to_string());
                }
            }
            Field::Set => {
                let url = self.pending_pic_url.take().unwrap_or_default();
                let (set, url) = (raw.trim(), url.trim());
                if !set.is_empty() && !url.is_empty() {
                    self.artwork.push(ArtworkEntry::new(set, url));
                }
            }
        }
    }

    /// Turn the collected fields into a record, or `None` if the card is not
    /// a token or has no usable name.
    fn finish(self) -> Option<RawTokenRecord> {
        if self.token.as_deref() != Some(TOKEN_MARKER) {
            return None;
        }

        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let type_line = trimmed(self.type_line);
        Some(RawTokenRecord {
            name: name.to_string(),
            type_line: if type_line.is_empty() {
                DEFAULT_TYPE.to_string()
            } else {
                type_line
            },
            abilities: trimmed(self.text),
            pt: trimmed(self.pt),
            colors: trimmed(self.colors),
            reverse_related: self.reverse_related,
            artwork: self.artwork,
        })
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Where the reader is relative to the first `<cards>` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    NotFound,
    Inside { depth: usize },
    Done,
}

/// Walks parser events and assembles token records.
struct Extractor {
    depth: usize,
    saw_root: bool,
    collection: Collection,
    card: Option<CardBuilder>,
    /// Field being captured and the depth of its element.
    capture: Option<(Field, usize)>,
    text_buf: String,
    tokens: Vec<RawTokenRecord>,
}

impl Extractor {
    fn new() -> Self {
        Self {
            depth: 0,
            saw_root: false,
            collection: Collection::NotFound,
            card: None,
            capture: None,
            text_buf: String::new(),
            tokens: Vec::new(),
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), SourceError> {
        if self.depth == 0 && self.saw_root {
            return Err(SourceError::invalid_xml(format!(
                "junk after document element: <{}>",
                String::from_utf8_lossy(e.name().as_ref())
            )));
        }
        self.depth += 1;
        self.saw_root = true;
        let depth = self.depth;
        let tag = e.name();
        let tag = tag.as_ref();

        match self.collection {
            // The root element itself is never the card collection.
            Collection::NotFound if tag == b"cards" && depth > 1 => {
                self.collection = Collection::Inside { depth };
                return Ok(());
            }
            Collection::Inside { depth: cards_depth }
                if self.card.is_none() && tag == b"card" && depth == cards_depth + 1 =>
            {
                self.card = Some(CardBuilder::new(depth));
                return Ok(());
            }
            _ => {}
        }

        let Some(card) = self.card.as_mut() else {
            return Ok(());
        };

        if depth == card.depth + 1 {
            if tag == b"prop" {
                if !card.prop_seen {
                    card.prop_seen = true;
                    card.in_prop = true;
                }
                return Ok(());
            }
            if let Some(field) = Field::card_child(tag) {
                if field == Field::Set {
                    card.pending_pic_url = pic_url(e)?;
                }
                self.capture = Some((field, depth));
                self.text_buf.clear();
            }
        } else if card.in_prop && depth == card.depth + 2 {
            if let Some(field) = Field::prop_child(tag) {
                self.capture = Some((field, depth));
                self.text_buf.clear();
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), SourceError> {
        if self.depth == 0 {
            // Only whitespace may surround the document element.
            if !text.trim().is_empty() {
                let place = if self.saw_root { "after" } else { "before" };
                return Err(SourceError::invalid_xml(format!(
                    "text {place} document element"
                )));
            }
            return Ok(());
        }
        if matches!(self.capture, Some((_, depth)) if depth == self.depth) {
            self.text_buf.push_str(text);
        }
        Ok(())
    }

    fn close(&mut self) {
        let depth = self.depth;

        if let Some((field, capture_depth)) = self.capture {
            if capture_depth == depth {
                self.capture = None;
                let raw = std::mem::take(&mut self.text_buf);
                if let Some(card) = self.card.as_mut() {
                    card.commit(field, raw);
                }
            }
        }

        if let Some(card) = self.card.as_mut() {
            if card.in_prop && depth == card.depth + 1 {
                card.in_prop = false;
            }
            if depth == card.depth {
                if let Some(record) = self.card.take().and_then(CardBuilder::finish) {
                    self.tokens.push(record);
                }
            }
        }

        if self.collection == (Collection::Inside { depth }) {
            self.collection = Collection::Done;
        }

        self.depth = self.depth.saturating_sub(1);
    }
}

fn pic_url(e: &BytesStart<'_>) -> Result<Option<String>, SourceError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"picURL" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Extract every token card from a Cockatrice card database document.
///
/// A document without a `<cards>` collection yields no tokens. A document
/// that is not well-formed XML is an error.
pub fn parse_tokens<R: BufRead>(reader: R) -> Result<Vec<RawTokenRecord>, SourceError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut extractor = Extractor::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => extractor.open(e)?,
            Event::Empty(ref e) => {
                extractor.open(e)?;
                extractor.close();
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                extractor.text(&text)?;
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e);
                extractor.text(&text)?;
            }
            Event::End(_) => extractor.close(),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !extractor.saw_root {
        return Err(SourceError::invalid_xml("no root element found"));
    }
    if extractor.depth != 0 {
        return Err(SourceError::invalid_xml(format!(
            "document ended with {} unclosed element(s)",
            extractor.depth
        )));
    }
    if extractor.collection == Collection::NotFound {
        log::info!("No cards element found in XML");
    }

    Ok(extractor.tokens)
}

/// Extract tokens from an in-memory XML document.
pub fn parse_tokens_str(xml: &str) -> Result<Vec<RawTokenRecord>, SourceError> {
    parse_tokens(xml.as_bytes())
}

#[cfg(test)]
#[path = "tests/xml_tests.rs"]
mod tests;
