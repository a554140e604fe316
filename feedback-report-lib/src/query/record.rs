use crate::error::DecodingError;
use crate::store::RawItem;
use crate::values::{decode_members, normalize_members};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A feedback item after normalization.
///
/// No attribute is guaranteed to exist. The accessors know the field names the write path
/// has used over time and fall back to the older Portuguese names when the current one
/// is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackRecord(Map<String, Value>);

impl FeedbackRecord {
    /// Decode and normalize one stored item.
    pub fn from_raw(item: &RawItem) -> Result<Self, DecodingError> {
        let members = decode_members(None, item)?;
        Ok(Self(normalize_members(&members)))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn feedback_id(&self) -> Option<&str> {
        self.get_str("feedbackId")
    }

    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.get_str("createdAt")
    }

    /// The raw rating value, `rating` first and then `nota`.
    #[must_use]
    pub fn rating(&self) -> Option<&Value> {
        self.get("rating").or_else(|| self.get("nota"))
    }

    /// The raw urgency text, `urgency` first and then `urgencia`.
    #[must_use]
    pub fn urgency(&self) -> Option<&str> {
        self.get("urgency").or_else(|| self.get("urgencia")).and_then(Value::as_str)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for FeedbackRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
