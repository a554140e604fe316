use crate::Result;
use crate::stats::{ReportStatistics, Urgency};
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt::Write;
use strum::IntoEnumIterator;

pub const HEADER: &str = "=== RELATÓRIO SEMANAL DE FEEDBACKS ===";
pub const EMPTY_NOTICE: &str = "Nenhum feedback encontrado";
pub const NO_DATES_NOTICE: &str = "Nenhuma data válida encontrada";

/// A rendered report and the name it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub artifact_name: String,
}

impl Report {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Name of the stored artifact for a report generated at `generated_at`.
#[must_use]
pub fn artifact_name(generated_at: DateTime<Utc>) -> String {
    format!("weekly-report-{}.txt", generated_at.format("%Y-%m-%d"))
}

/// Render `stats` into the weekly report.
#[must_use]
pub fn format(stats: &ReportStatistics, generated_at: DateTime<Utc>) -> Report {
    Report {
        text: lines(stats, generated_at).join("\n"),
        artifact_name: artifact_name(generated_at),
    }
}

/// Write the weekly report for `stats` to `writer`, one line at a time.
pub fn generate<W: Write>(stats: &ReportStatistics, generated_at: DateTime<Utc>, writer: &mut W) -> Result<()> {
    for line in lines(stats, generated_at) {
        writeln!(writer, "{line}")?;
    }

    Ok(())
}

/// Round half away from zero to one decimal, so an average of 2.25 reads `2.3`.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

fn lines(stats: &ReportStatistics, generated_at: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![
        HEADER.to_string(),
        format!("Gerado em: {}", generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        String::new(),
        format!("Total de feedbacks encontrados: {}", stats.total),
        format!("Média geral das notas: {}", one_decimal(stats.average_rating)),
        String::new(),
        "DISTRIBUIÇÃO POR URGÊNCIA".to_string(),
    ];

    lines.extend(Urgency::iter().map(|urgency| format!("{}: {}", urgency.label(), stats.urgency.count(urgency))));
    lines.push(String::new());
    lines.push("QUANTIDADE DE AVALIAÇÕES POR DIA".to_string());

    if stats.is_empty() {
        lines.push(EMPTY_NOTICE.to_string());
    } else if stats.per_day.is_empty() {
        lines.push(NO_DATES_NOTICE.to_string());
    } else {
        lines.extend(stats.per_day.iter().map(|(day, count)| format!("{}: {count}", day.format("%Y-%m-%d"))));
    }

    lines
}
