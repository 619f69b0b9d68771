//! Building values from native data.
//!
//! Every entry point here is total: shapes that have no JSON counterpart
//! degrade to [`Value::Null`] instead of failing.

use serde::Serialize;

use crate::native::wrap_node;
use crate::value::{
    Map,
    Value,
};

impl Value {
    /// Wraps any serializable native data.
    ///
    /// Map-like data becomes an `Object`, sequences become an `Array`, and
    /// strings, booleans and numbers map to their scalar variant.
    ///
    /// A node with no JSON shape becomes `Null` in place and its siblings are
    /// kept: a non-finite float, a map keyed by anything other than strings,
    /// integers, chars or booleans, or a failing `Serialize` impl. Wrapping a
    /// `Value` therefore returns an equal value, with any non-finite number
    /// replaced by `Null`.
    pub fn wrap<T>(native: &T) -> Value
        where T: Serialize + ?Sized
    {
        wrap_node(native)
    }

    /// Builds an object by handing an empty `Object` to `populate`.
    ///
    /// ```
    /// use plaindoc::Value;
    ///
    /// let movie = Value::build(|m| {
    ///     m.set("title", "Groundhog Day");
    ///     m.set("id", 1);
    /// });
    /// assert_eq!(movie.get("id").int_value(), 1);
    /// ```
    pub fn build<F>(populate: F) -> Value
        where F: FnOnce(&mut Value)
    {
        let mut value = Value::empty_object();
        populate(&mut value);
        value
    }

    /// Projects this tree onto the `serde_json` model.
    ///
    /// Returns `None` when a number in the tree is not finite.
    pub fn to_native(&self) -> Option<serde_json::Value> {
        Some(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(crate::encoder::json_number(*n)?),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items.iter().map(Value::to_native).collect::<Option<_>>()?,
            ),
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| Some((k.clone(), v.to_native()?)))
                    .collect::<Option<_>>()?,
            ),
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Without arbitrary_precision every serde_json number has an f64 view.
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => Value::Object(
                entries.into_iter().map(|(k, v)| (k, Value::from(v))).collect::<Map>(),
            ),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Value {
    fn from(entries: serde_json::Map<String, serde_json::Value>) -> Self {
        Value::from(serde_json::Value::Object(entries))
    }
}
