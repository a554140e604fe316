//! Windowed, paginated reads of normalized feedback records

pub mod http;
mod paginator;
mod record;

pub use paginator::{DEFAULT_END_DATE, DEFAULT_START_DATE, QueryPaginator, QueryRequest, QueryResponse};
pub use record::FeedbackRecord;
