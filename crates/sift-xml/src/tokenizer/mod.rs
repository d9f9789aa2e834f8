//! Tokenizer module.
//!
//! Splits an in-memory document into start tags, end tags and text runs in a
//! single forward pass. Comments, processing instructions and other `<!...>`
//! declarations are consumed without producing tokens.

/// Attribute parsing for the raw text of a start tag.
pub mod attributes;
/// Tokenizer state and the main scanning loop.
pub mod scanner;
/// Decoding of the predefined XML character entities.
pub mod entities;
/// Cursor and lookahead helpers for the tokenizer.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use attributes::{AttributeMap, parse_attributes};
pub use scanner::XmlTokenizer;
pub use entities::{decode_entities, lookup_entity};
pub use token::Token;
