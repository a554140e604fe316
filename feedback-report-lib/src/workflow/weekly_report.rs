use crate::delivery::ReportStore;
use crate::error::FeedbackResult;
use crate::query::{FeedbackRecord, QueryPaginator, QueryRequest};
use crate::reports::{self, Report};
use crate::stats::{ReportStatistics, aggregate};
use crate::store::FeedbackStore;
use chrono::{DateTime, Utc};

/// Outcome of a weekly report run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReport {
    pub report: Report,
    pub statistics: ReportStatistics,
    pub generated_at: DateTime<Utc>,
}

/// Query everything, aggregate, render and store the weekly report.
#[derive(Debug)]
pub struct WeeklyReport<S, R> {
    paginator: QueryPaginator<S>,
    reports: R,
    bucket: String,
}

impl<S: FeedbackStore, R: ReportStore> WeeklyReport<S, R> {
    pub fn new(paginator: QueryPaginator<S>, reports: R, bucket: impl Into<String>) -> Self {
        Self {
            paginator,
            reports,
            bucket: bucket.into(),
        }
    }

    pub async fn generate(&self, now: DateTime<Utc>) -> FeedbackResult<GeneratedReport> {
        log::info!("Iniciando geração do relatório semanal");

        let records = self.paginator.query_all(&QueryRequest::default()).await.inspect_err(|e| {
            log::error!("Erro ao buscar feedbacks: {e}");
        })?;

        log::info!("Total de feedbacks recuperados: {}", records.len());
        records.iter().for_each(warn_incomplete);

        let statistics = aggregate(&records);
        let report = reports::format(&statistics, now);
        for line in report.lines() {
            log::info!("{line}");
        }

        self.ensure_bucket().await;

        self.reports
            .put_object(&self.bucket, &report.artifact_name, &report.text)
            .await
            .inspect_err(|e| log::error!("Erro ao salvar relatório '{}': {e}", report.artifact_name))?;

        log::info!("Relatório salvo em {}/{}", self.bucket, report.artifact_name);

        Ok(GeneratedReport {
            report,
            statistics,
            generated_at: now,
        })
    }

    /// Make sure the bucket exists, creating it when missing.
    ///
    /// Never fails; the upload that follows reports any real problem.
    async fn ensure_bucket(&self) {
        match self.reports.head_bucket(&self.bucket).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                log::info!("Bucket '{}' não encontrado, criando", self.bucket);
                if let Err(e) = self.reports.create_bucket(&self.bucket).await {
                    log::warn!("AVISO: não foi possível criar o bucket '{}': {e}", self.bucket);
                }
            }
            Err(e) => log::warn!("AVISO: não foi possível verificar o bucket '{}': {e}", self.bucket),
        }
    }
}

fn warn_incomplete(record: &FeedbackRecord) {
    let missing: Vec<_> = [
        ("nota", record.rating().is_none()),
        ("urgência", record.urgency().is_none()),
        ("data", record.created_at().is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    if !missing.is_empty() {
        log::warn!(
            "AVISO: feedback {} sem {}",
            record.feedback_id().unwrap_or("<sem id>"),
            missing.join(", ")
        );
    }
}
