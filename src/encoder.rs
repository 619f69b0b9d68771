use std::io::Write;

use tracing::trace;

use crate::error::EncodeError;
use crate::value::{
    exact_integer,
    Value,
};

/// Encoder configuration, passed explicitly to each encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    pub pretty: bool,
}

impl EncodeOptions {
    pub const fn compact() -> Self {
        EncodeOptions { pretty: false }
    }

    pub const fn pretty() -> Self {
        EncodeOptions { pretty: true }
    }
}

/// Converts a finite number, keeping exact integers integral.
pub(crate) fn json_number(n: f64) -> Option<serde_json::Number> {
    match exact_integer(n) {
        Some(i) => Some(serde_json::Number::from(i)),
        None => serde_json::Number::from_f64(n),
    }
}

/// Projects `value` onto the `serde_json` model, naming the first
/// non-finite number by its path.
fn project(value: &Value, path: &mut String) -> Result<serde_json::Value, EncodeError> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => match json_number(*n) {
            Some(number) => serde_json::Value::Number(number),
            None => return Err(EncodeError::NonFiniteNumber {
                path: path.clone(),
                value: *n,
            }),
        },
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => {
            let mut projected = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let len = path.len();
                path.push_str(&format!("[{}]", i));
                projected.push(project(item, path)?);
                path.truncate(len);
            }
            serde_json::Value::Array(projected)
        }
        Value::Object(entries) => {
            let mut projected = serde_json::Map::new();
            for (key, item) in entries {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                projected.insert(key.clone(), project(item, path)?);
                path.truncate(len);
            }
            serde_json::Value::Object(projected)
        }
    })
}

/// Encodes `value` as JSON text.
///
/// Object keys come out sorted. Pretty output indents by two spaces.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    encode_to_writer(&mut buffer, value, options)?;
    Ok(buffer)
}

fn project_root(value: &Value, options: &EncodeOptions) -> Result<serde_json::Value, EncodeError> {
    let native = project(value, &mut String::from("$"))?;
    trace!(pretty = options.pretty, kind = value.type_name(), "encoding JSON value");
    Ok(native)
}

pub fn encode_to_string(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    let native = project_root(value, options)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&native)?
    } else {
        serde_json::to_string(&native)?
    };
    Ok(text)
}

pub fn encode_to_writer<W>(writer: W, value: &Value, options: &EncodeOptions) -> Result<(), EncodeError>
    where W: Write
{
    let native = project_root(value, options)?;
    if options.pretty {
        serde_json::to_writer_pretty(writer, &native)?;
    } else {
        serde_json::to_writer(writer, &native)?;
    }
    Ok(())
}
