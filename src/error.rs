use std::io;

use thiserror::Error;

/// Terminal failure of a byte-level decode.
///
/// Raised once for the whole document. Individual entries or elements that
/// fail to decode are dropped instead and never surface here.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty JSON document")]
    Empty,

    #[error("invalid UTF-8 input: {0}")]
    InvalidEncoding(#[source] io::Error),

    #[error("malformed JSON at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("top-level literal {literal} is not a JSON value")]
    Undecodable { literal: String },

    #[error("unexpected content after the document at offset {offset}")]
    TrailingContent { offset: usize },
}

/// Failure to render a value tree as JSON text.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("number {value} at {path} cannot be represented in JSON")]
    NonFiniteNumber { path: String, value: f64 },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Failure to parse a path expression such as `$.a[0]`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("invalid path at position {position}: {message}")]
    Syntax { position: usize, message: String },
}
