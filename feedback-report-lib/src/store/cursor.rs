use super::{ATTR_CREATED_AT, ATTR_FEEDBACK_ID, ATTR_PARTITION, RawItem, wire_str};
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Continuation token for a paginated range query.
///
/// Mirrors the last key the store evaluated: the partition key, the item key and, when
/// the store reports it, the index sort key. Callers hand it back untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageCursor {
    pub pk: String,

    #[serde(rename = "feedbackId")]
    pub feedback_id: String,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PageCursor {
    /// Build the cursor pointing at `item`, if it carries its key attributes.
    #[must_use]
    pub fn for_item(item: &RawItem) -> Option<Self> {
        Some(Self {
            pk: wire_str(item, ATTR_PARTITION)?.to_string(),
            feedback_id: wire_str(item, ATTR_FEEDBACK_ID)?.to_string(),
            created_at: wire_str(item, ATTR_CREATED_AT).map(str::to_string),
        })
    }

    /// Parse a cursor supplied by a caller as a JSON object.
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        Self::deserialize(value).map_err(|e| InputError::Malformed(format!("invalid nextToken: {e}")))
    }

    /// Parse a cursor supplied as JSON text (query strings and command-line arguments).
    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        serde_json::from_str(text).map_err(|e| InputError::Malformed(format!("invalid nextToken: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_without_absent_sort_key() {
        let cursor = PageCursor {
            pk: "FEEDBACK".into(),
            feedback_id: "fb-789".into(),
            created_at: None,
        };
        assert_eq!(serde_json::to_value(&cursor).unwrap(), json!({"pk": "FEEDBACK", "feedbackId": "fb-789"}));
    }

    #[test]
    fn test_round_trips_with_sort_key() {
        let value = json!({"pk": "FEEDBACK", "feedbackId": "fb-1", "createdAt": "2026-01-08T10:00:00Z"});
        let cursor = PageCursor::from_json(&value).unwrap();
        assert_eq!(cursor.created_at.as_deref(), Some("2026-01-08T10:00:00Z"));
        assert_eq!(serde_json::to_value(&cursor).unwrap(), value);
    }

    #[test]
    fn test_rejects_missing_item_key() {
        let err = PageCursor::from_json(&json!({"pk": "FEEDBACK"})).unwrap_err();
        assert!(matches!(err, InputError::Malformed(ref m) if m.contains("feedbackId")));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = PageCursor::from_json(&json!({"pk": "FEEDBACK", "feedbackId": "x", "offset": 3}));
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(PageCursor::from_json_str("\"fb-1\"").is_err());
        assert!(PageCursor::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_for_item_reads_wire_attributes() {
        let item = json!({
            "pk": {"S": "FEEDBACK"},
            "feedbackId": {"S": "fb-9"},
            "createdAt": {"S": "2026-01-09T12:00:00Z"},
            "nota": {"N": "5"}
        });
        let cursor = PageCursor::for_item(item.as_object().unwrap()).unwrap();
        assert_eq!(cursor.feedback_id, "fb-9");
        assert_eq!(cursor.created_at.as_deref(), Some("2026-01-09T12:00:00Z"));
    }
}
