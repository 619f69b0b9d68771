use std::io::Read;

use crate::error::DecodeError;
use crate::peekable_codepoints::*;

/// A lexical tag of a JSON document.
///
/// Structural punctuation gets its own tag. Everything between punctuation
/// and whitespace is a raw `Literal`, kept verbatim (quotes and escapes
/// included) so the decoder can attempt each scalar interpretation in turn.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum JsonTag {
    LeftCurly,
    RightCurly,
    LeftSquare,
    RightSquare,
    Colon,
    Comma,
    Literal(String),
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_punctuation(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | ',' | ':')
}

impl JsonTag {
    /// Reads the next tag together with the code point offset it starts at.
    pub(crate) fn read_json_tag<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<Option<(usize, JsonTag)>, DecodeError>
        where R: Read
    {
        loop {
            match peekable_cp.peek_char(0).map_err(DecodeError::InvalidEncoding)? {
                None => return Ok(None),
                Some(c) if is_json_whitespace(c) => {
                    peekable_cp.skip(1).map_err(DecodeError::InvalidEncoding)?;
                }
                Some(c) => {
                    let offset = peekable_cp.offset();
                    let json_tag = match c {
                        '{' => JsonTag::LeftCurly,
                        '}' => JsonTag::RightCurly,
                        '[' => JsonTag::LeftSquare,
                        ']' => JsonTag::RightSquare,
                        ',' => JsonTag::Comma,
                        ':' => JsonTag::Colon,
                        _ => {
                            let literal = JsonTag::read_literal(peekable_cp)?;
                            return Ok(Some((offset, JsonTag::Literal(literal))));
                        }
                    };

                    peekable_cp.skip(1).map_err(DecodeError::InvalidEncoding)?;
                    return Ok(Some((offset, json_tag)));
                }
            }
        }
    }

    fn read_literal<R>(peekable_cp: &mut PeekableCodePoints<R>) -> Result<String, DecodeError>
        where R: Read
    {
        let start = peekable_cp.offset();
        let mut end = 0;
        let mut in_string = false;
        let mut is_escape = false;
        loop {
            let c = match peekable_cp.peek_char(end).map_err(DecodeError::InvalidEncoding)? {
                None if in_string => return Err(DecodeError::UnterminatedString { offset: start }),
                None => break,
                Some(c) => c,
            };

            if in_string {
                if is_escape {
                    is_escape = false;
                } else if c == '\\' {
                    is_escape = true;
                } else if c == '"' {
                    in_string = false;
                }
            } else if c == '"' {
                in_string = true;
            } else if is_json_whitespace(c) || is_punctuation(c) {
                break;
            }

            end += 1;
        }

        peekable_cp.pop(end).map_err(DecodeError::InvalidEncoding)
    }

    pub fn parse<R>(reader: R) -> Result<Vec<(usize, JsonTag)>, DecodeError>
        where R: Read
    {
        let mut json_tag_list = Vec::new();
        let mut peekable_cp = PeekableCodePoints::new(reader);
        while let Some(json_tag) = JsonTag::read_json_tag(&mut peekable_cp)? {
            json_tag_list.push(json_tag);
        }

        Ok(json_tag_list)
    }
}

#[cfg(test)]
mod json_tag_tests {
    use super::*;

    fn tags(json: &str) -> Result<Vec<JsonTag>, DecodeError> {
        Ok(JsonTag::parse(json.as_bytes())?.into_iter().map(|(_, tag)| tag).collect())
    }

    fn lit(s: &str) -> JsonTag {
        JsonTag::Literal(String::from(s))
    }

    fn expected_document() -> Vec<JsonTag> {
        vec![
            // {
            JsonTag::LeftCurly,

            // "simple": 123
            lit(r#""simple""#), JsonTag::Colon, lit("123"),

            // ,
            JsonTag::Comma,

            // "array": ["a", "b", "c\""]
            lit(r#""array""#),
            JsonTag::Colon,
            JsonTag::LeftSquare,
            lit(r#""a""#), JsonTag::Comma, lit(r#""b""#), JsonTag::Comma, lit(r#""c\"""#),
            JsonTag::RightSquare,

            // ,
            JsonTag::Comma,

            // "object": {"prop": "{true]"}
            lit(r#""object""#),
            JsonTag::Colon,
            JsonTag::LeftCurly,
            lit(r#""prop""#), JsonTag::Colon, lit(r#""{true]""#),
            JsonTag::RightCurly,

            // }
            JsonTag::RightCurly,
        ]
    }

    #[test]
    fn test_one_line() -> anyhow::Result<()> {
        let json = r#"{"simple": 123, "array": ["a", "b", "c\""], "object": {"prop": "{true]"}}"#;
        assert_eq!(tags(json)?, expected_document());
        Ok(())
    }

    #[test]
    fn test_multi_line() -> anyhow::Result<()> {
        let json = r#"
{
    "simple": 123,
    "array": [
        "a",
        "b",
        "c\""
    ],
    "object": {
        "prop": "{true]"
    }
}"#;
        assert_eq!(tags(json)?, expected_document());
        Ok(())
    }

    #[test]
    fn test_offsets_count_code_points() -> anyhow::Result<()> {
        let tags = JsonTag::parse(r#"["é", 1]"#.as_bytes())?;
        let offsets: Vec<usize> = tags.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(offsets, vec![0, 1, 4, 6, 7]);
        Ok(())
    }

    #[test]
    fn test_bare_literals_kept_verbatim() -> anyhow::Result<()> {
        assert_eq!(
            tags("[true,nope , -1.5e3]")?,
            vec![
                JsonTag::LeftSquare,
                lit("true"), JsonTag::Comma, lit("nope"), JsonTag::Comma, lit("-1.5e3"),
                JsonTag::RightSquare,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_newline_inside_string_stays_in_literal() -> anyhow::Result<()> {
        let json = "{\"obj\n    ect\": 1}";
        assert_eq!(
            tags(json)?,
            vec![JsonTag::LeftCurly, lit("\"obj\n    ect\""), JsonTag::Colon, lit("1"), JsonTag::RightCurly]
        );
        Ok(())
    }

    #[test]
    fn test_unterminated_string() {
        let err = tags(r#"{"key": "value}"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnterminatedString { offset: 8 }));
    }

    #[test]
    fn test_invalid_encoding() {
        let bytes: &[u8] = &[b'[', b'"', 0xc3, 0x28, b'"', b']'];
        let err = JsonTag::parse(bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding(_)));
    }
}
