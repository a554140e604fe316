use super::FeedbackRecord;
use crate::config::Config;
use crate::error::{FeedbackResult, StoreError};
use crate::store::{FeedbackStore, PageCursor, RangeQuery};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lower bound used when a request gives no start date.
pub const DEFAULT_START_DATE: &str = "2020-01-01T00:00:00Z";

/// Upper bound used when a request gives no end date.
pub const DEFAULT_END_DATE: &str = "2030-12-31T23:59:59Z";

/// Parameters of one page request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub urgency: Option<String>,

    #[serde(default)]
    pub next_token: Option<PageCursor>,
}

impl QueryRequest {
    fn effective_start(&self) -> &str {
        non_empty(self.start_date.as_deref()).unwrap_or(DEFAULT_START_DATE)
    }

    fn effective_end(&self) -> &str {
        non_empty(self.end_date.as_deref()).unwrap_or(DEFAULT_END_DATE)
    }

    fn effective_urgency(&self) -> Option<&str> {
        non_empty(self.urgency.as_deref())
    }
}

/// One page of normalized records and the window that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub items: Vec<FeedbackRecord>,
    pub count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<PageCursor>,
    pub start_date: String,
    pub end_date: String,

    /// Echoed only when the request carried a filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
}

/// Runs windowed, filtered range queries against a [`FeedbackStore`] one page at a time.
#[derive(Debug, Clone)]
pub struct QueryPaginator<S> {
    store: S,
    table: String,
    partition_key: String,
    page_size: usize,
}

impl<S: FeedbackStore> QueryPaginator<S> {
    pub fn new(store: S, table: impl Into<String>, partition_key: impl Into<String>, page_size: usize) -> Self {
        Self {
            store,
            table: table.into(),
            partition_key: partition_key.into(),
            page_size: page_size.max(1),
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store, &config.table_name, &config.partition_key, config.default_page_size)
    }

    /// Fetch the page described by `request`.
    ///
    /// Store failures are returned as they come; nothing is retried.
    pub async fn query(&self, request: &QueryRequest) -> FeedbackResult<QueryResponse> {
        let range = RangeQuery {
            table: self.table.clone(),
            partition_key: self.partition_key.clone(),
            start: request.effective_start().to_string(),
            end: request.effective_end().to_string(),
            urgency: request.effective_urgency().map(str::to_string),
            limit: self.page_size,
            exclusive_start_key: request.next_token.clone(),
        };

        log::debug!(
            "querying '{}' from {} to {} (urgency: {}, resuming: {})",
            range.table,
            range.start,
            range.end,
            range.urgency.as_deref().unwrap_or("any"),
            range.exclusive_start_key.is_some()
        );

        let page = self.store.query_range(&range).await?;
        let items = page.items.iter().map(FeedbackRecord::from_raw).collect::<Result<Vec<_>, _>>()?;

        log::debug!("received {} item(s), more pending: {}", items.len(), page.last_evaluated_key.is_some());

        Ok(QueryResponse {
            count: items.len(),
            items,
            next_token: page.last_evaluated_key,
            start_date: range.start,
            end_date: range.end,
            urgency: range.urgency,
        })
    }

    /// Follow the cursor from `request` until the store reports no further pages.
    ///
    /// A store that hands back a cursor it already returned would loop forever, so that is
    /// reported as a store failure.
    pub async fn query_all(&self, request: &QueryRequest) -> FeedbackResult<Vec<FeedbackRecord>> {
        let mut request = request.clone();
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut pages = 0_usize;

        loop {
            let response = self.query(&request).await?;
            pages += 1;
            records.extend(response.items);

            let Some(cursor) = response.next_token else {
                break;
            };

            if !seen.insert(cursor.clone()) {
                return Err(StoreError::backend(format!("store returned cursor for '{}' twice", cursor.feedback_id)).into());
            }

            request.next_token = Some(cursor);
        }

        log::debug!("collected {} record(s) over {pages} page(s)", records.len());
        Ok(records)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
