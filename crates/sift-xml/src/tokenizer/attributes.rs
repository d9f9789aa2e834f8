//! Attribute parsing for start tags.
//!
//! The attribute grammar is deliberately small: the raw text is split on
//! whitespace, and every chunk containing `=` is read as `key="value"`.
//! Chunks without `=` are ignored. Quoted values containing whitespace are
//! therefore not supported.

use std::collections::HashMap;

/// Attribute name to attribute value for a single start tag.
///
/// Borrows from the document; when a name repeats, the last value wins.
pub type AttributeMap<'a> = HashMap<&'a str, &'a str>;

/// Parse the raw attribute text of a start tag.
///
/// The chunk is split at its first `=`; surrounding double quotes are stripped
/// from the value.
#[must_use]
pub fn parse_attributes(raw: &str) -> AttributeMap<'_> {
    let mut attributes = AttributeMap::new();
    for chunk in raw.split_whitespace() {
        if let Some((name, value)) = chunk.split_once('=') {
            let _ = attributes.insert(name, value.trim_matches('"'));
        }
    }
    attributes
}
