//! Blob-store key codec.
//!
//! Every triple is persisted as one key with an empty value:
//!
//! ```text
//! srcNS:srcInst:relation:tgtNS:tgtInst
//! ```
//!
//! A colon inside a field is written as `::`. Decoding tries a plain split
//! first and only falls back to the escape-aware scanner when that does not
//! produce five non-empty fields.

use crate::error::{DomainError, DomainResult};
use crate::model::Triple;

use super::binary::FIELD_COUNT;

const SEPARATOR: char = ':';
const ESCAPED_SEPARATOR: &str = "::";

/// Encodes a triple as a blob-store key.
pub fn encode_key(triple: &Triple) -> String {
    let fields = triple.fields();
    let mut key = String::with_capacity(fields.iter().map(|f| f.len() + 1).sum());
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            key.push(SEPARATOR);
        }
        if field.contains(SEPARATOR) {
            key.push_str(&field.replace(SEPARATOR, ESCAPED_SEPARATOR));
        } else {
            key.push_str(field);
        }
    }
    key
}

/// Decodes a blob-store key.
///
/// # Errors
///
/// Returns [`DomainError::MalformedKey`] if the key does not hold exactly five
/// non-empty fields after unescaping.
pub fn decode_key(key: &str) -> DomainResult<Triple> {
    let parts: Vec<&str> = key.split(SEPARATOR).collect();
    if let Ok(fields) = <[&str; FIELD_COUNT]>::try_from(parts.as_slice()) {
        if fields.iter().all(|f| !f.is_empty()) {
            return Ok(Triple::from_fields(fields));
        }
    }

    let fields = unescape_fields(key);
    let count = fields.len();
    match <[String; FIELD_COUNT]>::try_from(fields) {
        Ok(fields) if fields.iter().all(|f| !f.is_empty()) => Ok(Triple::from_fields(fields)),
        _ => Err(DomainError::MalformedKey {
            key: key.to_string(),
            fields: count,
        }),
    }
}

/// Splits on single colons, turning each `::` into a literal colon.
///
/// Scans left to right, so `a:::b` reads as `a:` followed by `b`.
fn unescape_fields(key: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        if c != SEPARATOR {
            current.push(c);
        } else if chars.peek() == Some(&SEPARATOR) {
            chars.next();
            current.push(SEPARATOR);
        } else {
            fields.push(std::mem::take(&mut current));
        }
    }
    fields.push(current);
    fields
}

/// Returns why `triple` cannot be persisted faithfully, if it cannot.
///
/// Empty fields are reserved for "don't care". A field starting with a colon
/// would follow the separator as `:::`, which reads back as a colon ending the
/// previous field.
pub(crate) fn unstorable_reason(triple: &Triple) -> Option<&'static str> {
    let fields = triple.fields();
    if fields.iter().any(|f| f.is_empty()) {
        return Some("fields cannot be empty");
    }
    if fields.iter().any(|f| f.starts_with(SEPARATOR)) {
        return Some("fields cannot start with ':'");
    }
    None
}
