use super::{Urgency, UrgencyDistribution};
use crate::query::FeedbackRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Aggregate view of a complete set of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportStatistics {
    pub total: usize,

    /// Records whose rating parsed as a finite number.
    pub rated: usize,

    /// Mean of the parsed ratings, `0.0` when nothing was rated.
    pub average_rating: f64,
    pub urgency: UrgencyDistribution,

    /// Records per UTC calendar day, ascending.
    pub per_day: BTreeMap<NaiveDate, usize>,

    /// Records without a usable `createdAt`.
    pub undated: usize,
}

impl ReportStatistics {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Compute statistics over `records`.
///
/// Bad field values never fail the aggregation: an unusable rating is left out of the
/// average, an unknown urgency counts as `baixa`, and an unusable date leaves the record
/// out of the per-day buckets. Every record still counts towards the total.
#[must_use]
pub fn aggregate(records: &[FeedbackRecord]) -> ReportStatistics {
    let mut stats = ReportStatistics {
        total: records.len(),
        ..ReportStatistics::default()
    };
    let mut rating_sum = 0.0;

    for record in records {
        if let Some(rating) = record.rating().and_then(parse_rating) {
            rating_sum += rating;
            stats.rated += 1;
        }

        stats.urgency.record(Urgency::classify(record.urgency()));

        match record.created_at().and_then(utc_date) {
            Some(day) => *stats.per_day.entry(day).or_default() += 1,
            None => stats.undated += 1,
        }
    }

    if stats.rated > 0 {
        #[expect(clippy::cast_precision_loss, reason = "record counts are far below 2^52")]
        let rated = stats.rated as f64;
        stats.average_rating = rating_sum / rated;
    }

    stats
}

/// Read a rating held as a decimal string or a JSON number.
#[must_use]
pub fn parse_rating(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Number(number) => number.as_f64()?,
        _ => return None,
    };

    rating.is_finite().then_some(rating)
}

/// The UTC calendar day of an ISO-8601 timestamp or date.
///
/// Timestamps without an offset are taken as UTC.
#[must_use]
pub fn utc_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return Some(timestamp.date());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
