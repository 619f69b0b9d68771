//! Lenient JSON decoding.
//!
//! The input is split into [`JsonTag`]s first, then a recursive descent
//! assembles the tree. The structural skeleton (brackets, colons, commas,
//! string quoting, UTF-8) must be well formed or the whole decode fails.
//! Inside a container, a literal that cannot be read as any JSON scalar is
//! dropped together with its key, and decoding carries on.
//!
//! Each literal is tried as `null`, then as a boolean, a number and a
//! string, in that order; the first interpretation that succeeds wins.

use std::io::Read;
use std::str::FromStr;

use tracing::{
    debug,
    trace,
};

use crate::error::DecodeError;
use crate::json_tag::JsonTag;
use crate::value::{
    Map,
    Value,
};

/// Decoder configuration, passed explicitly to each decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of arrays and objects; exceeding it fails the decode.
    pub max_depth: usize,
}

impl DecodeOptions {
    pub const fn lenient() -> Self {
        DecodeOptions { max_depth: 128 }
    }

    pub const fn strict() -> Self {
        DecodeOptions { max_depth: 32 }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions::lenient()
    }
}

/// Decodes one JSON document with default options.
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    decode_with(bytes, &DecodeOptions::default())
}

pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Value, DecodeError> {
    trace!(len = bytes.len(), "decoding JSON buffer");
    decode_reader(bytes, options)
}

/// Decodes one JSON document read to the end from `reader`.
///
/// The document is fully tokenized before any node is built.
pub fn decode_reader<R>(reader: R, options: &DecodeOptions) -> Result<Value, DecodeError>
    where R: Read
{
    let json_tags = JsonTag::parse(reader)?;
    if json_tags.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut node_reader = NodeReader {
        json_tags: &json_tags,
        pos: 0,
        max_depth: options.max_depth,
    };

    let root = match node_reader.read_node(0)? {
        Some(root) => root,
        None => {
            let literal = match &json_tags[0].1 {
                JsonTag::Literal(literal) => literal.clone(),
                _ => String::new(),
            };
            return Err(DecodeError::Undecodable { literal });
        }
    };

    if let Some((offset, _)) = json_tags.get(node_reader.pos) {
        return Err(DecodeError::TrailingContent { offset: *offset });
    }

    Ok(root)
}

impl FromStr for Value {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s.as_bytes())
    }
}

struct NodeReader<'a> {
    json_tags: &'a [(usize, JsonTag)],
    pos: usize,
    max_depth: usize,
}

impl<'a> NodeReader<'a> {
    fn peek(&self) -> Option<&'a JsonTag> {
        self.json_tags.get(self.pos).map(|(_, tag)| tag)
    }

    fn offset(&self) -> usize {
        match self.json_tags.get(self.pos) {
            Some((offset, _)) => *offset,
            None => self.json_tags.last().map_or(0, |(offset, _)| offset + 1),
        }
    }

    fn syntax_error(&self, message: &str) -> DecodeError {
        DecodeError::Syntax {
            offset: self.offset(),
            message: message.to_string(),
        }
    }

    fn next(&mut self) -> Result<&'a JsonTag, DecodeError> {
        match self.json_tags.get(self.pos) {
            Some((_, tag)) => {
                self.pos += 1;
                Ok(tag)
            }
            None => Err(self.syntax_error("unexpected end of input")),
        }
    }

    fn expect(&mut self, expected: JsonTag, message: &str) -> Result<(), DecodeError> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.syntax_error(message))
        }
    }

    /// `Ok(None)` means the node was consumed but has no JSON reading.
    fn read_node(&mut self, depth: usize) -> Result<Option<Value>, DecodeError> {
        match self.peek() {
            Some(JsonTag::Literal(literal)) => {
                self.pos += 1;
                Ok(decode_literal(literal))
            }
            Some(JsonTag::LeftCurly) => self.read_object(depth + 1).map(Some),
            Some(JsonTag::LeftSquare) => self.read_array(depth + 1).map(Some),
            Some(_) => Err(self.syntax_error("expected a value")),
            None => Err(self.syntax_error("unexpected end of input")),
        }
    }

    fn enter(&self, depth: usize) -> Result<(), DecodeError> {
        if depth > self.max_depth {
            Err(DecodeError::TooDeep { limit: self.max_depth })
        } else {
            Ok(())
        }
    }

    fn read_object(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.enter(depth)?;
        self.expect(JsonTag::LeftCurly, "expected '{'")?;

        let mut entries = Map::new();
        if self.peek() == Some(&JsonTag::RightCurly) {
            self.pos += 1;
            return Ok(Value::Object(entries));
        }

        loop {
            let key_offset = self.offset();
            let key = match self.next()? {
                JsonTag::Literal(literal) => decode_string(literal),
                _ => return Err(DecodeError::Syntax {
                    offset: key_offset,
                    message: "expected an object key".to_string(),
                }),
            };
            self.expect(JsonTag::Colon, "expected ':' after object key")?;
            let value = self.read_node(depth)?;

            match (key, value) {
                (Some(key), Some(value)) => {
                    entries.insert(key, value);
                }
                (key, _) => {
                    debug!(offset = key_offset, key = ?key, "dropping undecodable object entry");
                }
            }

            match self.next()? {
                JsonTag::Comma => continue,
                JsonTag::RightCurly => break,
                _ => {
                    self.pos -= 1;
                    return Err(self.syntax_error("expected ',' or '}'"));
                }
            }
        }

        Ok(Value::Object(entries))
    }

    fn read_array(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.enter(depth)?;
        self.expect(JsonTag::LeftSquare, "expected '['")?;

        let mut items = Vec::new();
        if self.peek() == Some(&JsonTag::RightSquare) {
            self.pos += 1;
            return Ok(Value::Array(items));
        }

        loop {
            let offset = self.offset();
            match self.read_node(depth)? {
                Some(item) => items.push(item),
                None => debug!(offset, index = items.len(), "dropping undecodable array element"),
            }

            match self.next()? {
                JsonTag::Comma => continue,
                JsonTag::RightSquare => break,
                _ => {
                    self.pos -= 1;
                    return Err(self.syntax_error("expected ',' or ']'"));
                }
            }
        }

        Ok(Value::Array(items))
    }
}

fn decode_literal(literal: &str) -> Option<Value> {
    if literal == "null" {
        return Some(Value::Null);
    }

    decode_bool(literal)
        .map(Value::Bool)
        .or_else(|| decode_number(literal).map(Value::Number))
        .or_else(|| decode_string(literal).map(Value::String))
}

fn decode_bool(literal: &str) -> Option<bool> {
    match literal {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Accepts the JSON number grammar only; out-of-range values fail.
fn decode_number(literal: &str) -> Option<f64> {
    let bytes = literal.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return None,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return None;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }

    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Unquotes and unescapes a JSON string literal.
pub(crate) fn decode_string(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return None,
            c if (c as u32) < 0x20 => return None,
            '\\' => {
                let unescaped = match chars.next()? {
                    '"' => '"',
                    '\\' => '\\',
                    '/' => '/',
                    'b' => '\u{08}',
                    'f' => '\u{0c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => decode_unicode_escape(&mut chars)?,
                    _ => return None,
                };
                decoded.push(unescaped);
            }
            c => decoded.push(c),
        }
    }

    Some(decoded)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}

/// Reads the `XXXX` after `\u`, pairing surrogates. Lone surrogates fail.
fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Option<char> {
    let high = read_hex4(chars)?;
    match high {
        0xD800..=0xDBFF => {
            if chars.next()? != '\\' || chars.next()? != 'u' {
                return None;
            }
            let low = read_hex4(chars)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
        }
        0xDC00..=0xDFFF => None,
        code => char::from_u32(code),
    }
}
