//! Statistics over a complete set of feedback records
//!
//! The aggregator assumes it receives every record of the reporting window. Feeding it a
//! single page silently understates the totals; it has no way to notice.

mod aggregate;
mod urgency;

pub use aggregate::{ReportStatistics, aggregate, parse_rating, utc_date};
pub use urgency::{Urgency, UrgencyDistribution};
