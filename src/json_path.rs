use std::fmt;
use std::io;
use std::str::FromStr;

use crate::error::PathError;
use crate::peekable_codepoints::*;
use crate::value::Value;

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPart {
    Key(String),
    Index(usize),
}

/// A parsed path such as `$.movies[0].title` or `$['odd key']`.
///
/// The leading `$` is optional. Keys use dot notation or quoted bracket
/// notation, indexes use bracket notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    pub parts: Vec<PathPart>,
}

struct PathReader<'a> {
    peekable_cp: PeekableCodePoints<&'a [u8]>,
}

impl<'a> PathReader<'a> {
    fn error(&self, message: &str) -> PathError {
        PathError::Syntax {
            position: self.peekable_cp.offset(),
            message: message.to_string(),
        }
    }

    fn io_error(&self, e: io::Error) -> PathError {
        self.error(&e.to_string())
    }

    fn peek(&mut self) -> Result<Option<char>, PathError> {
        self.peekable_cp.peek_char(0).map_err(|e| self.io_error(e))
    }

    fn bump(&mut self) -> Result<Option<char>, PathError> {
        let c = self.peek()?;
        if c.is_some() {
            self.peekable_cp.skip(1).map_err(|e| self.io_error(e))?;
        }
        Ok(c)
    }

    fn read_dot_notation(&mut self) -> Result<PathPart, PathError> {
        let mut key = String::new();
        while let Some(c) = self.peek()? {
            if c == '.' || c == '[' {
                break;
            }
            if c == ']' {
                return Err(self.error("unexpected ']'"));
            }
            key.push(c);
            self.bump()?;
        }

        if key.is_empty() {
            return Err(self.error("expected a key"));
        }
        Ok(PathPart::Key(key))
    }

    fn read_square_notation(&mut self) -> Result<PathPart, PathError> {
        let part = match self.peek()? {
            Some(quote @ ('\'' | '"')) => {
                self.bump()?;
                let mut key = String::new();
                loop {
                    match self.bump()? {
                        None => return Err(self.error("unterminated quoted key")),
                        Some('\\') => match self.bump()? {
                            Some(c) => key.push(c),
                            None => return Err(self.error("unterminated quoted key")),
                        },
                        Some(c) if c == quote => break,
                        Some(c) => key.push(c),
                    }
                }
                PathPart::Key(key)
            }
            Some(c) if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(c) = self.peek()? {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    digits.push(c);
                    self.bump()?;
                }
                let index = digits.parse::<usize>().map_err(|_| self.error("index out of range"))?;
                PathPart::Index(index)
            }
            _ => return Err(self.error("expected an index or a quoted key")),
        };

        match self.bump()? {
            Some(']') => Ok(part),
            _ => Err(self.error("expected ']'")),
        }
    }

    fn read_part(&mut self) -> Result<Option<PathPart>, PathError> {
        match self.peek()? {
            None => Ok(None),
            Some('.') => {
                self.bump()?;
                self.read_dot_notation().map(Some)
            }
            Some('[') => {
                self.bump()?;
                self.read_square_notation().map(Some)
            }
            Some(_) => Err(self.error("expected '.' or '['")),
        }
    }
}

impl JsonPath {
    pub fn new(parts: Vec<PathPart>) -> Self {
        JsonPath {
            parts
        }
    }

    pub fn parse(path_str: &str) -> Result<Self, PathError> {
        if path_str.is_empty() {
            return Err(PathError::Empty);
        }

        let mut reader = PathReader {
            peekable_cp: PeekableCodePoints::new(path_str.as_bytes()),
        };
        let mut path_parts = Vec::new();
        match reader.peek()? {
            Some('$') => {
                reader.bump()?;
            }
            // A bare leading key, as in `a.b`.
            Some(c) if c != '.' && c != '[' => path_parts.push(reader.read_dot_notation()?),
            _ => (),
        }

        while let Some(part) = reader.read_part()? {
            path_parts.push(part);
        }

        Ok(JsonPath::new(path_parts))
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonPath::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for part in &self.parts {
            match part {
                PathPart::Index(index) => write!(f, "[{}]", index)?,
                PathPart::Key(key) if !key.is_empty() && !key.contains(['.', '[', ']', '\'', '\\']) => {
                    write!(f, ".{}", key)?
                }
                PathPart::Key(key) => write!(f, "['{}']", key.replace('\\', "\\\\").replace('\'', "\\'"))?,
            }
        }
        Ok(())
    }
}

impl Value {
    /// Follows `path`, reading `Null` wherever a step does not resolve.
    pub fn select(&self, path: &JsonPath) -> &Value {
        path.parts.iter().fold(self, |node, part| match part {
            PathPart::Key(key) => node.get(key),
            PathPart::Index(index) => node.get_index(*index),
        })
    }

    /// Like [`Value::select`] but parses `path` first; an invalid path reads as `Null`.
    pub fn get_path(&self, path: &str) -> &Value {
        match JsonPath::parse(path) {
            Ok(path) => self.select(&path),
            Err(_) => &crate::value::NULL,
        }
    }

    /// Applies [`Value::set`] or [`Value::set_index`] at the node `path` points to.
    ///
    /// Intermediate nodes are never created: if any step before the last
    /// does not resolve, nothing changes. An empty path replaces `self`.
    pub fn assign<V>(&mut self, path: &JsonPath, value: V)
        where V: Into<Value>
    {
        let Some((last, parents)) = path.parts.split_last() else {
            *self = value.into();
            return;
        };

        let mut node = self;
        for part in parents {
            let next = match part {
                PathPart::Key(key) => node.get_mut(key),
                PathPart::Index(index) => node.get_index_mut(*index),
            };
            match next {
                Some(next) => node = next,
                None => return,
            }
        }

        match last {
            PathPart::Key(key) => node.set(key.as_str(), value),
            PathPart::Index(index) => node.set_index(*index, value),
        }
    }

    /// Like [`Value::assign`] but parses `path` first; an invalid path is a no-op.
    pub fn set_path<V>(&mut self, path: &str, value: V)
        where V: Into<Value>
    {
        if let Ok(path) = JsonPath::parse(path) {
            self.assign(&path, value);
        }
    }
}

#[cfg(test)]
mod json_path_tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    fn key(k: &str) -> PathPart {
        PathPart::Key(k.to_string())
    }

    #[test_case("$", vec![]; "root")]
    #[test_case("$.a.b", vec![key("a"), key("b")]; "dot notation")]
    #[test_case("a.b", vec![key("a"), key("b")]; "without root")]
    #[test_case("$.movies[12].title", vec![key("movies"), PathPart::Index(12), key("title")]; "index")]
    #[test_case("$['odd key'][\"x\"]", vec![key("odd key"), key("x")]; "quoted keys")]
    #[test_case(r"$['it\'s']", vec![key("it's")]; "escaped quote")]
    #[test_case("[0][1]", vec![PathPart::Index(0), PathPart::Index(1)]; "leading bracket")]
    fn test_parse(path: &str, parts: Vec<PathPart>) -> anyhow::Result<()> {
        assert_eq!(JsonPath::parse(path)?, JsonPath::new(parts));
        Ok(())
    }

    #[test_case("$.", 2; "dangling dot")]
    #[test_case("$a", 1; "missing dot")]
    #[test_case("$[x]", 2; "bare bracket key")]
    #[test_case("$[1", 3; "unclosed bracket")]
    #[test_case("$['a]", 5; "unterminated quote")]
    #[test_case("$.a]", 3; "stray bracket")]
    fn test_parse_errors(path: &str, position: usize) {
        match JsonPath::parse(path) {
            Err(PathError::Syntax { position: actual, .. }) => assert_eq!(actual, position),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_reader_reports_invalid_encoding() {
        let bytes: &[u8] = &[b'a', 0xc3, 0x28];
        let mut reader = PathReader {
            peekable_cp: PeekableCodePoints::new(bytes),
        };
        assert_eq!(reader.bump(), Ok(Some('a')));
        assert!(matches!(reader.bump(), Err(PathError::Syntax { position: 1, .. })));
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(JsonPath::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn test_display() -> anyhow::Result<()> {
        let path: JsonPath = "a['b.c'][3]['it\\'s']".parse()?;
        assert_eq!(path.to_string(), r"$.a['b.c'][3]['it\'s']");
        assert_eq!(path.to_string().parse::<JsonPath>()?, path);
        Ok(())
    }

    #[test]
    fn test_get_path() {
        let value = Value::from(json!({"movies": [{"title": "Heat"}, {"title": "Ran"}]}));
        assert_eq!(value.get_path("$.movies[1].title").string_value(), "Ran");
        assert!(value.get_path("$.movies[2].title").is_null());
        assert!(value.get_path("$.movies.title").is_null());
        assert!(value.get_path("$[").is_null());
        assert_eq!(value.get_path("$"), &value);
    }

    #[test]
    fn test_set_path() {
        let mut value = Value::from(json!({"movies": [{"title": "Heat"}], "count": 1}));
        value.set_path("$.movies[0].year", 1995);
        value.set_path("$.movies[0].title", Value::Null);
        value.set_path("$.count", 2);
        assert_eq!(value, Value::from(json!({"movies": [{"year": 1995}], "count": 2})));
    }

    #[test]
    fn test_set_path_never_creates_intermediates() {
        let original = Value::from(json!({"movies": [{"title": "Heat"}]}));
        let mut value = original.clone();
        value.set_path("$.missing.title", "x");
        value.set_path("$.movies[3].title", "x");
        value.set_path("$.movies[1]", "x");
        value.set_path("$.movies.title", "x");
        value.set_path("$..", "x");
        assert_eq!(value, original);
    }

    #[test]
    fn test_assign_root() {
        let mut value = Value::from(1);
        value.assign(&JsonPath::new(vec![]), "replaced");
        assert_eq!(value, Value::from("replaced"));
    }
}
