pub mod custom;
pub mod error;
pub mod fetch;
pub mod xml;

pub use custom::{CustomTokens, DEFAULT_CUSTOM_TOKENS_PATH, load_custom_tokens, read_custom_tokens};
pub use error::SourceError;
pub use fetch::{TOKENS_XML_URL, fetch_xml};
pub use xml::{parse_tokens, parse_tokens_str};
