use crate::error::DecodingError;
use serde_json::Value;
use std::collections::BTreeMap;

/// A value as the record store models it.
///
/// Numbers keep the decimal string the store handed out; nothing here interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedValue {
    String(String),
    Number(String),
    Bool(bool),
    Null,
    List(Vec<Self>),
    Map(BTreeMap<String, Self>),
}

const TAG_STRING: &str = "S";
const TAG_NUMBER: &str = "N";
const TAG_BOOL: &str = "BOOL";
const TAG_NULL: &str = "NULL";
const TAG_LIST: &str = "L";
const TAG_MAP: &str = "M";

impl TaggedValue {
    /// Decode the store's wire form, a single-key object whose key is the tag.
    ///
    /// `path` names the attribute being decoded and is only used for error reporting.
    pub fn decode(path: &str, wire: &Value) -> Result<Self, DecodingError> {
        let Value::Object(fields) = wire else {
            return Err(DecodingError::new(path, format!("expected a tagged object, found {}", kind_of(wire))));
        };

        let mut entries = fields.iter();
        let (tag, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => return Err(DecodingError::new(path, "no type tag present")),
            (Some(_), Some(_)) => {
                let tags: Vec<&str> = fields.keys().map(String::as_str).collect();
                return Err(DecodingError::new(path, format!("expected exactly one type tag, found {}", tags.join(", "))));
            }
        };

        match tag.as_str() {
            TAG_STRING => expect_str(path, tag, payload).map(Self::String),
            TAG_NUMBER => expect_str(path, tag, payload).map(Self::Number),
            TAG_BOOL => payload
                .as_bool()
                .map(Self::Bool)
                .ok_or_else(|| payload_error(path, tag, "a boolean", payload)),
            TAG_NULL => match payload {
                Value::Bool(true) => Ok(Self::Null),
                other => Err(payload_error(path, tag, "true", other)),
            },
            TAG_LIST => {
                let Value::Array(items) = payload else {
                    return Err(payload_error(path, tag, "an array", payload));
                };
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| Self::decode(&format!("{path}[{index}]"), item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::List)
            }
            TAG_MAP => {
                let Value::Object(members) = payload else {
                    return Err(payload_error(path, tag, "an object", payload));
                };
                decode_members(Some(path), members).map(Self::Map)
            }
            unknown => Err(DecodingError::new(path, format!("unrecognized type tag '{unknown}'"))),
        }
    }

    /// Encode back to the wire form. Used by stores and fixtures that build items in code.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        let (tag, payload) = match self {
            Self::String(s) => (TAG_STRING, Value::String(s.clone())),
            Self::Number(n) => (TAG_NUMBER, Value::String(n.clone())),
            Self::Bool(b) => (TAG_BOOL, Value::Bool(*b)),
            Self::Null => (TAG_NULL, Value::Bool(true)),
            Self::List(items) => (TAG_LIST, Value::Array(items.iter().map(Self::to_wire).collect())),
            Self::Map(members) => (
                TAG_MAP,
                Value::Object(members.iter().map(|(k, v)| (k.clone(), v.to_wire())).collect()),
            ),
        };

        let mut wire = serde_json::Map::with_capacity(1);
        let _ = wire.insert(tag.to_string(), payload);
        Value::Object(wire)
    }

    /// The string payload of a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Decode the attributes of a stored item (or of a nested `M` value).
pub fn decode_members(
    parent: Option<&str>,
    members: &serde_json::Map<String, Value>,
) -> Result<BTreeMap<String, TaggedValue>, DecodingError> {
    members
        .iter()
        .map(|(key, wire)| {
            let path = parent.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
            TaggedValue::decode(&path, wire).map(|value| (key.clone(), value))
        })
        .collect()
}

fn expect_str(path: &str, tag: &str, payload: &Value) -> Result<String, DecodingError> {
    payload
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| payload_error(path, tag, "a string", payload))
}

fn payload_error(path: &str, tag: &str, expected: &str, found: &Value) -> DecodingError {
    DecodingError::new(path, format!("expected {expected} payload for tag '{tag}', found {}", kind_of(found)))
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
