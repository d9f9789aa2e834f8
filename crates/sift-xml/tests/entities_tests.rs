//! Integration tests for entity decoding and attribute parsing.

use std::borrow::Cow;

use sift_xml::parse_attributes;
use sift_xml::tokenizer::{decode_entities, lookup_entity};

#[test]
fn test_lookup_predefined_entities() {
    assert_eq!(lookup_entity("lt;"), Some('<'));
    assert_eq!(lookup_entity("gt;"), Some('>'));
    assert_eq!(lookup_entity("amp;"), Some('&'));
    assert_eq!(lookup_entity("apos;"), Some('\''));
    assert_eq!(lookup_entity("quot;"), Some('"'));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("nbsp;"), None);
    assert_eq!(lookup_entity("lt"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_decode_without_ampersand_borrows() {
    assert!(matches!(decode_entities("150"), Cow::Borrowed("150")));
}

#[test]
fn test_decode_all_entities() {
    assert_eq!(
        decode_entities("&lt;a href=&quot;x&quot;&gt; &amp; &apos;"),
        "<a href=\"x\"> & '"
    );
}

#[test]
fn test_decode_is_single_level() {
    assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    assert_eq!(decode_entities("&amp;amp;"), "&amp;");
}

#[test]
fn test_unknown_entities_pass_through() {
    assert_eq!(decode_entities("&nbsp;&#60;&"), "&nbsp;&#60;&");
    assert_eq!(decode_entities("AT&T"), "AT&T");
    assert_eq!(decode_entities("&lt"), "&lt");
}

#[test]
fn test_decode_multibyte_neighbours() {
    assert_eq!(decode_entities("é&amp;ü&lt;"), "é&ü<");
}

#[test]
fn test_parse_attributes_basic() {
    let attributes = parse_attributes(r#"id="A1" status="open""#);
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes.get("id"), Some(&"A1"));
    assert_eq!(attributes.get("status"), Some(&"open"));
}

#[test]
fn test_parse_attributes_ignores_chunks_without_equals() {
    let attributes = parse_attributes(r#"checked id="A1" /"#);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("id"), Some(&"A1"));
}

#[test]
fn test_parse_attributes_splits_at_first_equals() {
    let attributes = parse_attributes(r#"expr="a=b""#);
    assert_eq!(attributes.get("expr"), Some(&"a=b"));
}

#[test]
fn test_parse_attributes_unquoted_value() {
    let attributes = parse_attributes("id=A1");
    assert_eq!(attributes.get("id"), Some(&"A1"));
}

#[test]
fn test_parse_attributes_last_duplicate_wins() {
    let attributes = parse_attributes(r#"id="first" id="second""#);
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes.get("id"), Some(&"second"));
}

#[test]
fn test_parse_attributes_single_quotes_are_kept() {
    let attributes = parse_attributes("id='A1'");
    assert_eq!(attributes.get("id"), Some(&"'A1'"));
}

#[test]
fn test_parse_attributes_empty() {
    assert!(parse_attributes("").is_empty());
    assert!(parse_attributes("   ").is_empty());
}
