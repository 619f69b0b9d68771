//! Total get/set by key or index.
//!
//! Reads never fail: a missing key, an out-of-range index or a node of the
//! wrong variant all read as [`Value::Null`]. Writes that cannot apply are
//! silent no-ops. Consequently a read cannot tell an absent key from a key
//! explicitly holding `null`, and the defaulting coercions cannot tell either
//! from a key holding the type's zero value.

use std::ops::Index;

use crate::value::{
    Value,
    NULL,
};

impl Value {
    /// Returns the entry under `key`, or `Null` when absent or not an object.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Object(entries) => entries.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Returns the element at `index`, or `Null` when out of range or not an array.
    pub fn get_index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }

    /// Inserts or overwrites `key` on an object; a `Null` value removes it.
    ///
    /// No-op on any other variant.
    pub fn set<K, V>(&mut self, key: K, value: V)
        where K: Into<String>, V: Into<Value>
    {
        if let Value::Object(entries) = self {
            let key = key.into();
            match value.into() {
                Value::Null => {
                    entries.remove(&key);
                }
                value => {
                    entries.insert(key, value);
                }
            }
        }
    }

    /// Replaces the element at `index` of an array.
    ///
    /// No-op when out of range or on any other variant; arrays never grow here.
    pub fn set_index<V>(&mut self, index: usize, value: V)
        where V: Into<Value>
    {
        if let Value::Array(items) = self {
            if let Some(slot) = items.get_mut(index) {
                *slot = value.into();
            }
        }
    }

    /// Consuming form of [`Value::set`].
    pub fn with<K, V>(mut self, key: K, value: V) -> Value
        where K: Into<String>, V: Into<Value>
    {
        self.set(key, value);
        self
    }

    /// Consuming form of [`Value::set_index`].
    pub fn with_index<V>(mut self, index: usize, value: V) -> Value
        where V: Into<Value>
    {
        self.set_index(index, value);
        self
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(entries) => entries.get_mut(key),
            _ => None,
        }
    }

    pub(crate) fn get_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::Array(items) => items.get_mut(index),
            _ => None,
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index)
    }
}

#[cfg(test)]
mod accessor_tests {
    use serde_json::json;

    use super::*;

    fn fixture() -> Value {
        Value::from(json!({"a": 1, "b": {"c": [10, 20]}, "n": null}))
    }

    #[test]
    fn test_get_missing_is_null() {
        let value = fixture();
        let before = value.clone();
        for _ in 0..3 {
            assert!(value["x"]["y"]["z"].is_null());
            assert!(value.get("a").get("b").is_null());
            assert!(value["b"]["c"][5].is_null());
        }
        assert_eq!(value, before);
    }

    #[test]
    fn test_get_on_wrong_variant() {
        assert!(Value::from("s").get("a").is_null());
        assert!(Value::from(3).get_index(0).is_null());
        assert!(fixture().get_index(0).is_null());
        assert!(Value::from(vec![1]).get("0").is_null());
    }

    #[test]
    fn test_explicit_null_reads_like_absent() {
        let value = fixture();
        assert!(value.get("n").is_null());
        assert_eq!(value.get("n"), value.get("never_set"));
        assert!(value.as_object().is_some_and(|o| o.contains_key("n")));
    }

    #[test]
    fn test_set_inserts_and_overwrites() {
        let mut value = fixture();
        value.set("a", "one");
        value.set("d", true);
        assert_eq!(value["a"], Value::from("one"));
        assert_eq!(value["d"], Value::Bool(true));
    }

    #[test]
    fn test_set_null_removes() {
        let mut value = fixture();
        value.set("a", Value::Null);
        assert!(value.get("a").is_null());
        assert!(value.as_object().is_some_and(|o| !o.contains_key("a")));
        assert_eq!(value["b"]["c"][1].int_value(), 20);
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn test_set_on_non_object_is_noop() {
        let mut value = Value::from(vec![1, 2]);
        value.set("a", 1);
        assert_eq!(value, Value::from(vec![1, 2]));

        let mut scalar = Value::from("s");
        scalar.set("a", 1);
        assert_eq!(scalar, Value::from("s"));
    }

    #[test]
    fn test_set_index_bounds() {
        let mut value = Value::from(vec![1, 2]);
        value.set_index(1, "two");
        assert_eq!(value[1], Value::from("two"));

        let before = value.clone();
        value.set_index(2, 3);
        value.set_index(usize::MAX, 3);
        assert_eq!(value, before);
        assert!(value[2].is_null());
    }

    #[test]
    fn test_set_index_null_keeps_slot() {
        let value = Value::from(vec![1, 2]).with_index(0, Value::Null);
        assert_eq!(value.len(), 2);
        assert!(value[0].is_null());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let original = fixture();
        let changed = original.clone().with("a", 2).with("b", Value::Null);
        assert_eq!(original["a"].int_value(), 1);
        assert!(original["b"].is_object());
        assert_eq!(changed["a"].int_value(), 2);
        assert!(changed["b"].is_null());
    }
}
