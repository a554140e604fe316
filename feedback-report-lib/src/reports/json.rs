use super::text::artifact_name;
use crate::Result;
use crate::stats::ReportStatistics;
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt::Write;
use serde_json::{Value, json};

/// The statistics as a JSON document.
#[must_use]
pub fn to_value(stats: &ReportStatistics, generated_at: DateTime<Utc>) -> Value {
    let per_day: Vec<_> = stats
        .per_day
        .iter()
        .map(|(day, count)| json!({ "date": day.format("%Y-%m-%d").to_string(), "count": count }))
        .collect();

    json!({
        "generatedAt": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "artifactName": artifact_name(generated_at),
        "total": stats.total,
        "rated": stats.rated,
        "averageRating": stats.average_rating,
        "urgency": {
            "alta": stats.urgency.alta,
            "media": stats.urgency.media,
            "baixa": stats.urgency.baixa,
        },
        "perDay": per_day,
        "undated": stats.undated,
    })
}

pub fn generate<W: Write>(stats: &ReportStatistics, generated_at: DateTime<Utc>, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(&to_value(stats, generated_at))?)?;
    Ok(())
}
