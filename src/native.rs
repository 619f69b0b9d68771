//! A serde `Serializer` that builds a [`Value`] directly.
//!
//! Failures are contained to the node they occur at: an element, field or
//! map value that cannot be represented becomes `Null` while its siblings
//! are kept. A map whose keys are not strings, integers, chars or booleans
//! becomes `Null` as a whole, but only at that map.

use std::fmt::Display;

use serde::ser::{
    self,
    Serialize,
    SerializeMap,
    SerializeSeq,
    SerializeStruct,
    SerializeStructVariant,
    SerializeTuple,
    SerializeTupleStruct,
    SerializeTupleVariant,
    Serializer,
};
use thiserror::Error;
use tracing::debug;

use crate::value::{
    Map,
    Value,
};

#[derive(Debug, Error)]
#[error("{0}")]
pub(crate) struct Unrepresentable(String);

impl ser::Error for Unrepresentable {
    fn custom<T: Display>(msg: T) -> Self {
        Unrepresentable(msg.to_string())
    }
}

/// Serializes one node, degrading it to `Null` on failure.
pub(crate) fn wrap_node<T>(native: &T) -> Value
    where T: ?Sized + Serialize
{
    native.serialize(ValueSerializer).unwrap_or_else(|e| {
        debug!(error = %e, "native data has no JSON shape, wrapping as null");
        Value::Null
    })
}

fn object_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        key @ (Value::Number(_) | Value::Bool(_)) => key.string(),
        _ => None,
    }
}

pub(crate) struct ValueSerializer;

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Unrepresentable;

    type SerializeSeq = SerializeArray;
    type SerializeTuple = SerializeArray;
    type SerializeTupleStruct = SerializeArray;
    type SerializeTupleVariant = SerializeVariantArray;
    type SerializeMap = SerializeObject;
    type SerializeStruct = SerializeObject;
    type SerializeStructVariant = SerializeVariantObject;

    fn serialize_bool(self, v: bool) -> Result<Value, Self::Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Self::Error> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Self::Error> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Self::Error> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Self::Error> {
        if v.is_finite() {
            Ok(Value::Number(v))
        } else {
            Err(ser::Error::custom(format_args!("number {} cannot be represented in JSON", v)))
        }
    }

    fn serialize_char(self, v: char) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Self::Error> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Self::Error> {
        Ok(v.iter().copied().collect())
    }

    fn serialize_none(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, Self::Error>
        where T: ?Sized + Serialize
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str) -> Result<Value, Self::Error> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value, Self::Error>
        where T: ?Sized + Serialize
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(self, _name: &'static str, _variant_index: u32, variant: &'static str, value: &T) -> Result<Value, Self::Error>
        where T: ?Sized + Serialize
    {
        let mut entries = Map::new();
        entries.insert(variant.to_string(), wrap_node(value));
        Ok(Value::Object(entries))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(SerializeArray {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, len: usize) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(SerializeVariantArray {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(SerializeObject {
            entries: Map::new(),
            next_key: None,
            bad_key: false,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct, Self::Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(self, _name: &'static str, _variant_index: u32, variant: &'static str, _len: usize) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(SerializeVariantObject {
            variant,
            entries: Map::new(),
        })
    }
}

pub(crate) struct SerializeArray {
    items: Vec<Value>,
}

impl SerializeSeq for SerializeArray {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        self.items.push(wrap_node(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Array(self.items))
    }
}

impl SerializeTuple for SerializeArray {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for SerializeArray {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        SerializeSeq::end(self)
    }
}

pub(crate) struct SerializeVariantArray {
    variant: &'static str,
    items: Vec<Value>,
}

impl SerializeTupleVariant for SerializeVariantArray {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        self.items.push(wrap_node(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        let mut entries = Map::new();
        entries.insert(self.variant.to_string(), Value::Array(self.items));
        Ok(Value::Object(entries))
    }
}

pub(crate) struct SerializeObject {
    entries: Map,
    next_key: Option<String>,
    bad_key: bool,
}

impl SerializeMap for SerializeObject {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        self.next_key = object_key(wrap_node(key));
        if self.next_key.is_none() {
            self.bad_key = true;
        }
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        if let Some(key) = self.next_key.take() {
            self.entries.insert(key, wrap_node(value));
        }
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        if self.bad_key {
            return Err(ser::Error::custom("map keys must be strings, integers, chars or booleans"));
        }
        Ok(Value::Object(self.entries))
    }
}

impl SerializeStruct for SerializeObject {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        self.entries.insert(key.to_string(), wrap_node(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Object(self.entries))
    }
}

pub(crate) struct SerializeVariantObject {
    variant: &'static str,
    entries: Map,
}

impl SerializeStructVariant for SerializeVariantObject {
    type Ok = Value;
    type Error = Unrepresentable;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
        where T: ?Sized + Serialize
    {
        self.entries.insert(key.to_string(), wrap_node(value));
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        let mut entries = Map::new();
        entries.insert(self.variant.to_string(), Value::Object(self.entries));
        Ok(Value::Object(entries))
    }
}

#[cfg(test)]
mod native_tests {
    use std::collections::{
        BTreeMap,
        HashMap,
    };

    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Segment(i32, i32),
        Rect { w: u8, h: u8 },
    }

    #[test]
    fn test_enum_shapes() {
        let shapes = vec![Shape::Point, Shape::Circle(1.5), Shape::Segment(1, 2), Shape::Rect { w: 3, h: 4 }];
        assert_eq!(
            wrap_node(&shapes),
            Value::from(json!(["Point", {"Circle": 1.5}, {"Segment": [1, 2]}, {"Rect": {"w": 3, "h": 4}}]))
        );
    }

    #[test]
    fn test_non_string_keys() {
        let mut by_id = BTreeMap::new();
        by_id.insert(7u32, "seven");
        by_id.insert(8u32, "eight");
        assert_eq!(wrap_node(&by_id), Value::from(json!({"7": "seven", "8": "eight"})));

        let mut by_pair = HashMap::new();
        by_pair.insert((1u8, 2u8), 3u8);
        assert_eq!(wrap_node(&by_pair), Value::Null);
    }

    #[test]
    fn test_non_finite_degrades_per_element() {
        let items = vec![1.0, f64::INFINITY, f64::NAN, 2.0];
        assert_eq!(
            wrap_node(&items),
            Value::from(vec![Value::from(1), Value::Null, Value::Null, Value::from(2)])
        );
    }

    #[test]
    fn test_chars_and_tuples() {
        assert_eq!(wrap_node(&'x'), Value::from("x"));
        assert_eq!(wrap_node(&(1u8, Some("a"), None::<u8>)), Value::from(json!([1, "a", null])));
    }
}
