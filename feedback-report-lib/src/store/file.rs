use super::{ATTR_FEEDBACK_ID, FeedbackStore, RangeQuery, RangeQueryPage, RawItem, run_range_query, wire_str};
use crate::error::StoreError;
use camino::Utf8PathBuf;
use serde_json::Value;
use std::io;

/// A record store backed by JSON table files.
///
/// The table `T` lives in `<root>/T.json` as an array of wire-form items. The file is read
/// on every query, so each call sees the table as it currently is on disk.
#[derive(Debug, Clone)]
pub struct FileFeedbackStore {
    root: Utf8PathBuf,
}

impl FileFeedbackStore {
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn table_path(&self, table: &str) -> Utf8PathBuf {
        self.root.join(format!("{table}.json"))
    }

    async fn load_table(&self, table: &str) -> Result<Vec<RawItem>, StoreError> {
        let path = self.table_path(table);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::TableNotFound(table.to_string())),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(StoreError::PermissionDenied(format!("reading '{path}': {e}")));
            }
            Err(e) => return Err(StoreError::backend(format!("reading '{path}': {e}"))),
        };

        let Value::Array(entries) =
            serde_json::from_str::<Value>(&text).map_err(|e| StoreError::backend(format!("parsing table file '{path}': {e}")))?
        else {
            return Err(StoreError::backend(format!("table file '{path}' must contain a JSON array of items")));
        };

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::Object(item) if wire_str(&item, ATTR_FEEDBACK_ID).is_some() => Ok(item),
                Value::Object(_) => Err(StoreError::backend(format!(
                    "item {index} in '{path}' is missing its 'feedbackId' key attribute"
                ))),
                _ => Err(StoreError::backend(format!("item {index} in '{path}' is not an object"))),
            })
            .collect()
    }
}

impl FeedbackStore for FileFeedbackStore {
    async fn query_range(&self, query: &RangeQuery) -> Result<RangeQueryPage, StoreError> {
        let items = self.load_table(&query.table).await?;
        log::debug!("loaded {} item(s) from table '{}'", items.len(), query.table);
        run_range_query(&items, query)
    }
}
