//! JSON conversion for the `%j`/`%J` directives, plus the lenient parser.

use serde::Serialize;
use serde_json::Value as Json;

use crate::value::object::PropertyValue;
use crate::value::{Value, ValueId};

/// Why a value could not be converted to JSON. The template formatter
/// swallows both cases into the cycle marker, matching the source runtime's
/// catch-all around `JSON.stringify`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonError {
    Circular,
    Unserializable,
}

/// Convert a value to JSON. `Ok(None)` means the value has no JSON form at
/// the top level (`undefined`, functions, symbols); inside an object such
/// members are omitted, inside an array they become `null`.
pub fn to_json(value: &Value) -> Result<Option<Json>, JsonError> {
    let mut seen = Vec::new();
    convert(value, &mut seen)
}

fn convert(value: &Value, seen: &mut Vec<ValueId>) -> Result<Option<Json>, JsonError> {
    match value {
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => Ok(None),
        Value::Null => Ok(Some(Json::Null)),
        Value::Bool(b) => Ok(Some(Json::Bool(*b))),
        Value::Int(i) => Ok(Some(Json::from(*i))),
        Value::Float(f) => Ok(Some(
            serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
        )),
        Value::BigInt(_) => Err(JsonError::Unserializable),
        Value::Str(s) => Ok(Some(Json::String(s.to_string()))),
        Value::Date(d) => Ok(Some(Json::String(d.repr.to_string()))),
        Value::Map(_)
        | Value::Set(_)
        | Value::WeakMap
        | Value::WeakSet
        | Value::RegExp(_)
        | Value::Iterator(_) => Ok(Some(Json::Object(serde_json::Map::new()))),
        Value::Error(_) => Ok(Some(Json::Object(serde_json::Map::new()))),
        Value::Bytes(b) => {
            let mut map = serde_json::Map::new();
            for (i, byte) in b.data.iter().enumerate() {
                map.insert(i.to_string(), Json::from(*byte));
            }
            Ok(Some(Json::Object(map)))
        }
        Value::Array(items) => enter(value, seen, |seen| {
            let items = match items.try_borrow() {
                Ok(items) => items,
                Err(_) => return Ok(Some(Json::Array(Vec::new()))),
            };
            let mut out = Vec::with_capacity(items.len());
            for item in items.iter() {
                out.push(convert(item, seen)?.unwrap_or(Json::Null));
            }
            Ok(Some(Json::Array(out)))
        }),
        Value::Arguments(items) => enter(value, seen, |seen| {
            let items = match items.try_borrow() {
                Ok(items) => items,
                Err(_) => return Ok(Some(Json::Object(serde_json::Map::new()))),
            };
            let mut map = serde_json::Map::new();
            for (i, item) in items.iter().enumerate() {
                if let Some(json) = convert(item, seen)? {
                    map.insert(i.to_string(), json);
                }
            }
            Ok(Some(Json::Object(map)))
        }),
        Value::Object(obj) => enter(value, seen, |seen| {
            let obj = match obj.try_borrow() {
                Ok(obj) => obj,
                Err(_) => return Ok(Some(Json::Object(serde_json::Map::new()))),
            };
            let mut map = serde_json::Map::new();
            for (key, prop) in obj.properties.iter() {
                if !prop.enumerable {
                    continue;
                }
                if let PropertyValue::Data(v) = &prop.value {
                    if let Some(json) = convert(v, seen)? {
                        map.insert(key.to_string(), json);
                    }
                }
            }
            Ok(Some(Json::Object(map)))
        }),
    }
}

fn enter<F>(value: &Value, seen: &mut Vec<ValueId>, f: F) -> Result<Option<Json>, JsonError>
where
    F: FnOnce(&mut Vec<ValueId>) -> Result<Option<Json>, JsonError>,
{
    let id = match value.identity() {
        Some(id) => id,
        None => return f(seen),
    };
    if seen.contains(&id) {
        return Err(JsonError::Circular);
    }
    seen.push(id);
    let out = f(seen);
    seen.pop();
    out
}

/// Serialize with a single-space indent, the `%J` pretty form.
pub fn to_json_string_pretty(json: &Json) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if json.serialize(&mut ser).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// Lenient JSON parsing: repairs lone backslashes (as produced by
/// unescaped path strings) before parsing, falls back to a plain parse,
/// and yields `None` when neither succeeds.
pub fn parse_json(input: &str) -> Option<Json> {
    if input.contains('\\') {
        let repaired = double_lone_backslashes(input);
        if let Ok(parsed) = serde_json::from_str(&repaired) {
            return Some(parsed);
        }
    }
    serde_json::from_str(input).ok()
}

/// Double every backslash not already preceded by one.
fn double_lone_backslashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut prev = None;
    for c in input.chars() {
        if c == '\\' && prev != Some('\\') {
            out.push_str("\\\\");
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
