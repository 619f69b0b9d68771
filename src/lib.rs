//! This library provides a self-describing JSON document value:
//! - Value: A recursive JSON node (object / array / string / number / boolean / null)
//! - Decoding: A lenient decoder which drops undecodable entries instead of failing the whole document
//! - Encoding: Canonical compact or pretty JSON text, with non-finite numbers reported as errors
//! - Access: Total get/set by key, index or JSONPath-style path, plus typed coercion of scalars
//!
//! Reads never fail. A missing key reads as `Null`, and the defaulting accessors
//! (`string_value`, `int_value`, ...) turn that into the type's zero value, so
//! `0` and "absent" look the same through them. Use the optional accessors
//! (`int`, `string`, ...) or `as_object` when the difference matters.
//!
//! ```
//! use plaindoc::{decode, encode, EncodeOptions};
//!
//! let movie = decode(br#"{"title":"Groundhog Day","id":1,"isFavorite":true}"#).unwrap();
//! assert_eq!(movie["title"].string_value(), "Groundhog Day");
//! assert_eq!(movie["id"].int_value(), 1);
//! assert!(movie["isFavorite"].bool_value());
//! assert_eq!(movie["missingField"].string_value(), "");
//!
//! let bytes = encode(&movie.with("id", 2), &EncodeOptions::compact()).unwrap();
//! assert_eq!(bytes, br#"{"id":2,"isFavorite":true,"title":"Groundhog Day"}"#.to_vec());
//! ```

mod peekable_codepoints;
mod json_tag;
mod value;
mod construction;
mod native;
mod accessor;
mod coercion;
mod decoder;
mod encoder;
mod json_path;
mod fields;
mod error;

pub use crate::json_tag::JsonTag;
pub use crate::value::{Map, Value};
pub use crate::coercion::Coerce;
pub use crate::decoder::{decode, decode_reader, decode_with, DecodeOptions};
pub use crate::encoder::{encode, encode_to_string, encode_to_writer, EncodeOptions};
pub use crate::json_path::{JsonPath, PathPart};
pub use crate::error::{DecodeError, EncodeError, PathError};
