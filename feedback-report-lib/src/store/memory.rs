use super::{
    ATTR_CREATED_AT, ATTR_FEEDBACK_ID, ATTR_PARTITION, ATTR_URGENCY, ATTR_URGENCY_ALIAS, FeedbackStore, PageCursor, RangeQuery,
    RangeQueryPage, RawItem, wire_str,
};
use crate::error::StoreError;
use std::sync::RwLock;

/// An in-process record store holding wire-form items.
#[derive(Debug)]
pub struct MemoryFeedbackStore {
    table: String,
    items: RwLock<Vec<RawItem>>,
}

impl MemoryFeedbackStore {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-populated with `items`.
    pub fn with_items(table: impl Into<String>, items: impl IntoIterator<Item = RawItem>) -> Result<Self, StoreError> {
        let store = Self::new(table);
        for item in items {
            store.insert(item)?;
        }

        Ok(store)
    }

    /// Add an item. Items must carry their `feedbackId` key as a string attribute.
    pub fn insert(&self, item: RawItem) -> Result<(), StoreError> {
        if wire_str(&item, ATTR_FEEDBACK_ID).is_none() {
            return Err(StoreError::backend("item is missing its 'feedbackId' key attribute"));
        }

        self.items
            .write()
            .map_err(|_poisoned| StoreError::backend("memory store lock poisoned"))?
            .push(item);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().map_or(0, |items| items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FeedbackStore for MemoryFeedbackStore {
    async fn query_range(&self, query: &RangeQuery) -> Result<RangeQueryPage, StoreError> {
        if query.table != self.table {
            return Err(StoreError::TableNotFound(query.table.clone()));
        }

        let items = self.items.read().map_err(|_poisoned| StoreError::backend("memory store lock poisoned"))?;
        run_range_query(&items, query)
    }
}

/// Evaluate a range query over a set of wire-form items.
///
/// Items outside the partition, or without a `createdAt` string, are not part of the index
/// and never match. Matches are ordered by `createdAt` then `feedbackId`, which makes the
/// order total and lets a cursor resume without skipping or repeating items.
pub fn run_range_query(items: &[RawItem], query: &RangeQuery) -> Result<RangeQueryPage, StoreError> {
    let mut matches: Vec<(&str, &str, &RawItem)> = items
        .iter()
        .filter(|item| wire_str(item, ATTR_PARTITION) == Some(query.partition_key.as_str()))
        .filter_map(|item| {
            let created_at = wire_str(item, ATTR_CREATED_AT)?;
            let feedback_id = wire_str(item, ATTR_FEEDBACK_ID)?;
            Some((created_at, feedback_id, item))
        })
        .filter(|(created_at, _, _)| *created_at >= query.start.as_str() && *created_at <= query.end.as_str())
        .filter(|(_, _, item)| query.urgency.as_deref().is_none_or(|wanted| urgency_of(item) == Some(wanted)))
        .collect();

    matches.sort_unstable_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    let start = match &query.exclusive_start_key {
        None => 0,
        Some(cursor) => resume_position(&matches, cursor, &query.partition_key)?,
    };

    let remaining = matches.get(start..).unwrap_or_default();
    let page_len = remaining.len().min(query.limit.max(1));
    let page = remaining.get(..page_len).unwrap_or_default();

    let last_evaluated_key = if remaining.len() > page_len {
        page.last().and_then(|(_, _, item)| PageCursor::for_item(item))
    } else {
        None
    };

    Ok(RangeQueryPage {
        items: page.iter().map(|(_, _, item)| (*item).clone()).collect(),
        last_evaluated_key,
    })
}

fn urgency_of(item: &RawItem) -> Option<&str> {
    wire_str(item, ATTR_URGENCY).or_else(|| wire_str(item, ATTR_URGENCY_ALIAS))
}

fn resume_position(matches: &[(&str, &str, &RawItem)], cursor: &PageCursor, partition_key: &str) -> Result<usize, StoreError> {
    if cursor.pk != partition_key {
        return Err(StoreError::InvalidStartKey(format!(
            "cursor partition '{}' does not match '{partition_key}'",
            cursor.pk
        )));
    }

    if let Some(created_at) = cursor.created_at.as_deref() {
        let key = (created_at, cursor.feedback_id.as_str());
        return Ok(matches.partition_point(|(c, f, _)| (*c, *f) <= key));
    }

    matches
        .iter()
        .position(|(_, f, _)| *f == cursor.feedback_id)
        .map(|index| index + 1)
        .ok_or_else(|| StoreError::InvalidStartKey(format!("no item with feedbackId '{}'", cursor.feedback_id)))
}
