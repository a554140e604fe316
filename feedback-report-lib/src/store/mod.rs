//! Access to the feedback record store
//!
//! The store is treated as a black box that answers one kind of request: a range query
//! over the `createdAt` index of a single partition, optionally filtered by urgency, one
//! page at a time. [`FeedbackStore`] is that capability; [`QueryPaginator`] and the
//! reporting workflow receive an implementation explicitly.
//!
//! Items are returned in the store's wire form ([`RawItem`]) and are only decoded by the
//! caller, so malformed attributes surface as decoding failures rather than store
//! failures.
//!
//! [`QueryPaginator`]: crate::query::QueryPaginator

mod cursor;
mod file;
mod memory;

pub use cursor::PageCursor;
pub use file::FileFeedbackStore;
pub use memory::{MemoryFeedbackStore, run_range_query};

use crate::error::StoreError;
use serde_json::Value;

/// One stored item, attribute name to wire-form tagged value.
pub type RawItem = serde_json::Map<String, Value>;

pub const ATTR_PARTITION: &str = "pk";
pub const ATTR_FEEDBACK_ID: &str = "feedbackId";
pub const ATTR_CREATED_AT: &str = "createdAt";
pub const ATTR_URGENCY: &str = "urgency";
pub const ATTR_URGENCY_ALIAS: &str = "urgencia";

/// A page request against the `createdAt` index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub table: String,
    pub partition_key: String,

    /// Inclusive lower bound on `createdAt`.
    pub start: String,

    /// Inclusive upper bound on `createdAt`.
    pub end: String,

    /// Exact, case-sensitive match on the item's urgency.
    pub urgency: Option<String>,
    pub limit: usize,
    pub exclusive_start_key: Option<PageCursor>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeQueryPage {
    pub items: Vec<RawItem>,

    /// Present only when more matching items follow this page.
    pub last_evaluated_key: Option<PageCursor>,
}

/// The range-query capability of the record store.
pub trait FeedbackStore: Send + Sync {
    fn query_range(&self, query: &RangeQuery) -> impl Future<Output = Result<RangeQueryPage, StoreError>> + Send;
}

impl<S: FeedbackStore> FeedbackStore for &S {
    fn query_range(&self, query: &RangeQuery) -> impl Future<Output = Result<RangeQueryPage, StoreError>> + Send {
        (**self).query_range(query)
    }
}

/// Read the string payload of a wire-form `S` attribute.
#[must_use]
pub fn wire_str<'a>(item: &'a RawItem, attribute: &str) -> Option<&'a str> {
    item.get(attribute)?.get("S")?.as_str()
}
