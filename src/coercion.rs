//! Typed reads with lenient conversion between scalar variants.
//!
//! Every scalar type has an optional accessor (`string`, `int`, `double`,
//! `bool`) returning `None` when no conversion applies, and a defaulting
//! accessor (`string_value`, ...) returning the type's zero value instead.
//! Objects and arrays never convert to a scalar. Surrounding whitespace is
//! ignored when a string is read as a number or a boolean.
//!
//! | from \ to | String            | Int / Double        | Bool                         |
//! |-----------|-------------------|---------------------|------------------------------|
//! | Number    | decimal text      | itself (Int truncs) | `0` is false, else true      |
//! | String    | itself            | parsed decimal      | true/t/yes/y/1, false/f/no/n/0 |
//! | Bool      | `"true"/"false"`  | `1` / `0`           | itself                       |

use crate::value::{
    exact_integer,
    Map,
    Value,
    EMPTY_OBJECT,
};

/// A scalar type a [`Value`] can be coerced into.
pub trait Coerce: Sized + Default {
    fn coerce(value: &Value) -> Option<Self>;

    fn coerce_or_default(value: &Value) -> Self {
        Self::coerce(value).unwrap_or_default()
    }
}

fn format_number(n: f64) -> String {
    if let Some(i) = exact_integer(n) {
        return i.to_string();
    }
    match serde_json::Number::from_f64(n) {
        Some(number) => number.to_string(),
        None => n.to_string(),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn truncate(n: f64) -> Option<i64> {
    if n.is_finite() {
        Some(n as i64)
    } else {
        None
    }
}

impl Coerce for String {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Coerce for i64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => truncate(*n),
            Value::String(s) => s.trim().parse::<i64>().ok().or_else(|| parse_number(s).and_then(truncate)),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }
}

impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_number(s),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl Coerce for bool {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(*n != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" => Some(true),
                "false" | "f" | "no" | "n" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Value {
    /// Coerces into any [`Coerce`] type.
    pub fn coerce<T: Coerce>(&self) -> Option<T> {
        T::coerce(self)
    }

    pub fn coerce_or_default<T: Coerce>(&self) -> T {
        T::coerce_or_default(self)
    }

    pub fn string(&self) -> Option<String> {
        self.coerce()
    }

    pub fn string_value(&self) -> String {
        self.coerce_or_default()
    }

    pub fn int(&self) -> Option<i64> {
        self.coerce()
    }

    pub fn int_value(&self) -> i64 {
        self.coerce_or_default()
    }

    pub fn double(&self) -> Option<f64> {
        self.coerce()
    }

    pub fn double_value(&self) -> f64 {
        self.coerce_or_default()
    }

    pub fn bool(&self) -> Option<bool> {
        self.coerce()
    }

    pub fn bool_value(&self) -> bool {
        self.coerce_or_default()
    }

    /// Elements of an array; empty for every other variant.
    pub fn array(&self) -> &[Value] {
        match self {
            Value::Array(items) => items,
            _ => &[],
        }
    }

    /// Entries of an object; empty for every other variant.
    pub fn dict(&self) -> &Map {
        match self {
            Value::Object(entries) => entries,
            _ => &EMPTY_OBJECT,
        }
    }
}

#[cfg(test)]
mod coercion_tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_null_defaults() {
        assert_eq!(Value::Null.string_value(), "");
        assert_eq!(Value::Null.int_value(), 0);
        assert_eq!(Value::Null.double_value(), 0.0);
        assert!(!Value::Null.bool_value());
        assert_eq!(Value::Null.string(), None);
        assert_eq!(Value::Null.int(), None);
        assert_eq!(Value::Null.double(), None);
        assert_eq!(Value::Null.bool(), None);
    }

    #[test_case(Value::from(42), Some("42"); "integral number")]
    #[test_case(Value::from(-2.5), Some("-2.5"); "fractional number")]
    #[test_case(Value::from(1e300), Some("1e300"); "huge number")]
    #[test_case(Value::from(1.5e-7), Some("1.5e-7"); "tiny number")]
    #[test_case(Value::from(true), Some("true"); "bool true")]
    #[test_case(Value::from(false), Some("false"); "bool false")]
    #[test_case(Value::from("s"), Some("s"); "string")]
    #[test_case(Value::from(vec![1]), None; "array")]
    #[test_case(Value::empty_object(), None; "object")]
    fn test_string(value: Value, expected: Option<&str>) {
        assert_eq!(value.string().as_deref(), expected);
        assert_eq!(value.string_value(), expected.unwrap_or(""));
    }

    #[test_case(Value::from(7.9), Some(7); "truncates")]
    #[test_case(Value::from(-7.9), Some(-7); "truncates toward zero")]
    #[test_case(Value::Number(f64::NAN), None; "nan")]
    #[test_case(Value::from(false), Some(0); "bool false")]
    #[test_case(Value::from(true), Some(1); "bool true")]
    #[test_case(Value::from(" 12 "), Some(12); "padded string")]
    #[test_case(Value::from("9007199254740993"), Some(9_007_199_254_740_993); "exact large string")]
    #[test_case(Value::from("3.5"), Some(3); "decimal string")]
    #[test_case(Value::from("twelve"), None; "non numeric string")]
    #[test_case(Value::from(json!({"a": 1})), None; "object")]
    fn test_int(value: Value, expected: Option<i64>) {
        assert_eq!(value.int(), expected);
        assert_eq!(value.int_value(), expected.unwrap_or(0));
    }

    #[test_case(Value::from(1.25), Some(1.25); "number")]
    #[test_case(Value::from("1e3"), Some(1000.0); "exponent string")]
    #[test_case(Value::from("nan"), None; "nan string")]
    #[test_case(Value::from(true), Some(1.0); "bool true")]
    #[test_case(Value::from(vec![1.0]), None; "array")]
    fn test_double(value: Value, expected: Option<f64>) {
        assert_eq!(value.double(), expected);
        assert_eq!(value.double_value(), expected.unwrap_or(0.0));
    }

    #[test_case(Value::from(0), Some(false); "zero")]
    #[test_case(Value::from(-0.1), Some(true); "nonzero")]
    #[test_case(Value::from("YES"), Some(true); "yes any case")]
    #[test_case(Value::from("t"), Some(true); "t")]
    #[test_case(Value::from("1"), Some(true); "one")]
    #[test_case(Value::from("N"), Some(false); "n")]
    #[test_case(Value::from("False"), Some(false); "false any case")]
    #[test_case(Value::from("0"), Some(false); "zero string")]
    #[test_case(Value::from(" true "), Some(true); "padded true")]
    #[test_case(Value::from("\tno\n"), Some(false); "padded no")]
    #[test_case(Value::from("maybe"), None; "unrecognized")]
    #[test_case(Value::from(vec![true]), None; "array")]
    fn test_bool(value: Value, expected: Option<bool>) {
        assert_eq!(value.bool(), expected);
        assert_eq!(value.bool_value(), expected.unwrap_or(false));
    }

    #[test]
    fn test_containers_default_to_empty() {
        assert!(Value::Null.array().is_empty());
        assert!(Value::from("s").array().is_empty());
        assert!(Value::from(vec![1]).dict().is_empty());
        assert!(Value::Null.dict().is_empty());
        assert_eq!(Value::from(vec![1, 2]).array().len(), 2);
        assert_eq!(Value::from(json!({"a": 1})).dict().len(), 1);
    }

    #[test]
    fn test_zero_is_indistinguishable_from_absent() {
        let value = Value::from(json!({"count": 0}));
        assert_eq!(value["count"].int_value(), value["missing"].int_value());
        assert_eq!(value["count"].int(), Some(0));
        assert_eq!(value["missing"].int(), None);
    }

    #[test]
    fn test_native_round_trip() {
        let value = Value::from(json!({"name": "n", "mixed": [1, "two", true, 4.5, null]}));
        let mixed = value.dict()["mixed"].array();
        assert_eq!(value.dict().len(), 2);
        assert_eq!(mixed.len(), 5);
        assert_eq!(mixed[0].int(), Some(1));
        assert_eq!(mixed[1].string(), Some("two".to_string()));
        assert_eq!(mixed[2].bool(), Some(true));
        assert_eq!(mixed[3].double(), Some(4.5));
        assert!(mixed[4].is_null());
    }
}
