//! Predefined XML character entities.
//!
//! Only the five entities every XML processor must recognize are decoded.
//! Numeric references and anything else beginning with `&` pass through
//! unchanged.

use std::borrow::Cow;

/// Longest entity name including its trailing `;` (`apos;`, `quot;`).
const MAX_ENTITY_LEN: usize = 5;

/// Look up an entity by name, without the leading `&` but with the `;`.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<char> {
    match name {
        "lt;" => Some('<'),
        "gt;" => Some('>'),
        "amp;" => Some('&'),
        "apos;" => Some('\''),
        "quot;" => Some('"'),
        _ => None,
    }
}

/// Decode `&lt; &gt; &amp; &apos; &quot;` in one left-to-right pass.
///
/// Replacement text is never rescanned, so `&amp;lt;` decodes to `&lt;` and
/// not to `<`. Text without an `&` is returned borrowed.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let entity = after
            .bytes()
            .take(MAX_ENTITY_LEN)
            .position(|b| b == b';')
            .and_then(|semi| lookup_entity(&after[..=semi]).map(|c| (c, semi + 1)));
        match entity {
            Some((c, len)) => {
                decoded.push(c);
                rest = &after[len..];
            }
            None => {
                decoded.push('&');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}
