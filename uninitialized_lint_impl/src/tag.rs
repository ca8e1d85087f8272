// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Field tag parsing.
//!
//! A tag is a sequence of space separated `key:"value"` pairs, the value being
//! a quoted string with backslash escapes. The first comma separated part of a
//! value is its name, the remainder its options: in `json:"id,omitempty"` the
//! name is `id` and the options are `[omitempty]`.

use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

/// Tag key that marks a field as mandatory
pub const REQUIRED_KEY: &str = "required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("bad syntax for struct tag key")]
    KeySyntax,
    #[error("bad syntax for struct tag pair")]
    PairSyntax,
    #[error("bad syntax for struct tag value")]
    ValueSyntax,
    #[error("bad escape sequence in quoted tag literal")]
    LiteralEscape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

/// A parsed tag, entries kept in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag {
    entries: Vec<TagEntry>,
}

impl StructTag {
    ///
    /// Parse undelimited tag text. Any syntax error fails the whole tag; there is
    /// no partial result.
    ///
    pub fn parse(tag: &str) -> Result<Self, TagError> {
        let mut entries = Vec::new();
        let mut rest = tag;

        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }

            let bytes = rest.as_bytes();
            let mut i = 0;
            while i < bytes.len()
                && bytes[i] > b' '
                && bytes[i] != b':'
                && bytes[i] != b'"'
                && bytes[i] != 0x7f
            {
                i += 1;
            }
            if i == 0 {
                return Err(TagError::KeySyntax);
            }
            if i + 1 >= bytes.len() || bytes[i] != b':' {
                return Err(TagError::PairSyntax);
            }
            if bytes[i + 1] != b'"' {
                return Err(TagError::ValueSyntax);
            }
            let key = &rest[..i];
            rest = &rest[i + 1..];

            // Scan the quoted value, stepping over escaped characters
            let bytes = rest.as_bytes();
            let mut i = 1;
            while i < bytes.len() && bytes[i] != b'"' {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= bytes.len() {
                return Err(TagError::ValueSyntax);
            }
            let value = unquote(&rest[1..i], '"').ok_or(TagError::ValueSyntax)?;
            rest = &rest[i + 1..];

            let mut parts = value.split(',');
            let name = parts.next().unwrap_or_default().to_string();
            let options = parts.map(str::to_string).collect();
            entries.push(TagEntry {
                key: key.to_string(),
                name,
                options,
            });
        }

        Ok(StructTag { entries })
    }

    /// First entry with the given key
    pub fn get(&self, key: &str) -> Option<&TagEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }
}

///
/// Remove the delimiters a front-end keeps around a tag literal. Back-quoted
/// literals are raw; double-quoted literals have their escapes decoded. Text
/// without delimiters is returned as is.
///
pub fn strip_delimiters(raw: &str) -> Result<Cow<'_, str>, TagError> {
    if raw.len() >= 2 && raw.starts_with('`') && raw.ends_with('`') {
        return Ok(Cow::Borrowed(&raw[1..raw.len() - 1]));
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unquote(&raw[1..raw.len() - 1], '"')
            .map(Cow::Owned)
            .ok_or(TagError::LiteralEscape);
    }
    Ok(Cow::Borrowed(raw))
}

///
/// Boolean parsing with the usual spellings: `1 t T TRUE true True` and
/// `0 f F FALSE false False`. Anything else is not a boolean.
///
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// The `required` flag of a raw, delimited tag literal
pub fn required_flag(raw_tag: &str) -> Result<bool, TagError> {
    let tag = StructTag::parse(&strip_delimiters(raw_tag)?)?;
    Ok(tag
        .get(REQUIRED_KEY)
        .and_then(|entry| parse_bool(&entry.name))
        .unwrap_or(false))
}

/// Whether a raw tag marks its field as required. Malformed tags never do.
pub fn is_required(raw_tag: &str) -> bool {
    match required_flag(raw_tag) {
        Ok(required) => required,
        Err(err) => {
            debug!(tag = raw_tag, %err, "ignoring malformed field tag");
            false
        }
    }
}

// Decode the body of a quoted string literal. Raw newlines and an unescaped
// closing quote are rejected, as are unknown escapes.
fn unquote(body: &str, quote: char) -> Option<String> {
    if !body.contains('\\') {
        if body.contains(quote) || body.contains('\n') {
            return None;
        }
        return Some(body.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == quote || c == '\n' {
            return None;
        }
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let escaped = chars.next()?;
        match escaped {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '"' if quote == '"' => out.push(b'"'),
            'x' => out.push(hex_value(&mut chars, 2)? as u8),
            'u' | 'U' => {
                let digits = if escaped == 'u' { 4 } else { 8 };
                let c = char::from_u32(hex_value(&mut chars, digits)?)?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            '0'..='7' => {
                let mut value = escaped.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                out.push(u8::try_from(value).ok()?);
            }
            _ => return None,
        }
    }

    String::from_utf8(out).ok()
}

fn hex_value(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
