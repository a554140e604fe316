use super::TaggedValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Convert a tagged value into a plain JSON value tree.
///
/// Numbers stay strings: `Number("5")` becomes `"5"`, so a numeric attribute and a string
/// attribute holding the same digits look identical afterwards.
#[must_use]
pub fn normalize(value: &TaggedValue) -> Value {
    match value {
        TaggedValue::String(s) | TaggedValue::Number(s) => Value::String(s.clone()),
        TaggedValue::Bool(b) => Value::Bool(*b),
        TaggedValue::Null => Value::Null,
        TaggedValue::List(items) => Value::Array(items.iter().map(normalize).collect()),
        TaggedValue::Map(members) => Value::Object(normalize_members(members)),
    }
}

/// Normalize every attribute of an item, keeping keys verbatim.
#[must_use]
pub fn normalize_members(members: &BTreeMap<String, TaggedValue>) -> Map<String, Value> {
    members.iter().map(|(key, value)| (key.clone(), normalize(value))).collect()
}
