//! Utility functions for TMX processing.
//!
//! This module provides helpers for:
//! - The fixed XML declaration of output documents
//! - Escaping attribute values and character data so that a conforming
//!   parser reads back exactly the characters that were written
//! - Byte slice to string conversion for element and attribute names
//!
//! # Examples
//!
//! ```
//! use tmx_sort::utils::{escape_attribute, escape_text};
//!
//! assert_eq!(escape_attribute("a\nb \"c\""), "a&#xA;b &quot;c&quot;");
//! assert_eq!(escape_text("Tom & \"Jerry\"\r\n"), "Tom &amp; \"Jerry\"&#xD;\n");
//! ```

use std::borrow::Cow;

/// XML declaration written in front of every output document.
///
/// TMX consumers expect the lowercase `utf-8` token byte-for-byte.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[inline]
pub fn string_from_slice(utf8: &[u8]) -> String {
    String::from_utf8_lossy(utf8).into_owned()
}

/// Escapes an attribute value.
///
/// Besides markup characters and quotes, tab, newline and carriage return are
/// written as character references: attribute value normalization would
/// otherwise turn them into spaces.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape_with(value, |ch| match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        '\t' => Some("&#x9;"),
        '\n' => Some("&#xA;"),
        '\r' => Some("&#xD;"),
        _ => None,
    })
}

/// Escapes character data.
///
/// Quotes stay literal. A carriage return is written as `&#xD;` because a
/// parser folds a raw `\r\n` into `\n`.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape_with(text, |ch| match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\r' => Some("&#xD;"),
        _ => None,
    })
}

fn escape_with(raw: &str, entity: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !raw.chars().any(|ch| entity(ch).is_some()) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match entity(ch) {
            Some(reference) => escaped.push_str(reference),
            None => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
