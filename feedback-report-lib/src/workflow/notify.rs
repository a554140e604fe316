use crate::config::Config;
use crate::delivery::{EmailMessage, Notifier, ReportStore};
use crate::error::{FeedbackResult, InputError};
use serde_json::Value;

const CATEGORY: &str = "weekly-report";

/// Fetch a stored report and mail it to the configured recipient.
#[derive(Debug)]
pub struct ReportNotifier<R, N> {
    reports: R,
    notifier: N,
    bucket: String,
    recipient: String,
    source_email: String,
    source_name: String,
}

impl<R: ReportStore, N: Notifier> ReportNotifier<R, N> {
    pub fn from_config(reports: R, notifier: N, config: &Config) -> Self {
        Self {
            reports,
            notifier,
            bucket: config.reports_bucket.clone(),
            recipient: config.recipient_email.clone(),
            source_email: config.source_email.clone(),
            source_name: config.source_name.clone(),
        }
    }

    /// Send the report stored under `report_key`.
    ///
    /// A missing or empty key is rejected before the store is touched.
    pub async fn notify(&self, report_key: Option<&str>) -> FeedbackResult<String> {
        let key = report_key.filter(|k| !k.is_empty()).ok_or(InputError::MissingField("reportKey"))?;

        log::info!("RECIPIENT_EMAIL: {}", self.recipient);
        log::info!("SOURCE_EMAIL: {}", self.source_email);
        log::info!("BUCKET: {}", self.bucket);

        let body = self
            .reports
            .get_object(&self.bucket, key)
            .await
            .inspect_err(|e| log::error!("Erro ao buscar relatório '{key}': {e}"))?;

        let message = EmailMessage {
            from_email: self.source_email.clone(),
            from_name: self.source_name.clone(),
            to: vec![self.recipient.clone()],
            subject: format!("Relatório semanal de feedbacks - {key}"),
            text: body,
            category: CATEGORY.to_string(),
        };

        self.notifier
            .send(&message)
            .await
            .inspect_err(|e| log::error!("Erro ao enviar e-mail: {e}"))?;

        log::info!("Relatório enviado para {}", self.recipient);
        Ok(format!("Relatório {key} enviado com sucesso para {}", self.recipient))
    }
}

/// Read `reportKey` from an invocation event.
pub fn report_key_from_event(event: &Value) -> Result<Option<&str>, InputError> {
    match event.get("reportKey") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(key)) => Ok(Some(key)),
        Some(other) => Err(InputError::Malformed(format!("reportKey must be a string, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeliveryError, FeedbackError, StoreError};
    use crate::workflow::test_support::{FakeReportStore, RecordingNotifier};
    use serde_json::json;

    fn config() -> Config {
        Config {
            reports_bucket: "test-reports-bucket".into(),
            recipient_email: "test@example.com".into(),
            source_email: "no-reply@example.com".into(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_sends_stored_report() {
        let key = "weekly-report-2026-01-08.txt";
        let content = "=== RELATÓRIO SEMANAL ===\nTotal de feedbacks: 10\nMédia: 4.5";
        let reports = FakeReportStore::with_object("test-reports-bucket", key, content);
        let notifier = RecordingNotifier::default();

        let result = ReportNotifier::from_config(&reports, &notifier, &config()).notify(Some(key)).await.unwrap();
        assert_eq!(result, "Relatório weekly-report-2026-01-08.txt enviado com sucesso para test@example.com");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Relatório semanal de feedbacks - weekly-report-2026-01-08.txt");
        assert_eq!(sent[0].text, content);
        assert_eq!(sent[0].to, ["test@example.com"]);
        assert_eq!(sent[0].from_email, "no-reply@example.com");
    }

    #[tokio::test]
    async fn test_nested_and_empty_reports() {
        let key = "reports/2026/01/weekly-report.txt";
        let reports = FakeReportStore::with_object("test-reports-bucket", key, "");
        let notifier = RecordingNotifier::default();

        let result = ReportNotifier::from_config(&reports, &notifier, &config()).notify(Some(key)).await.unwrap();
        assert!(result.contains("enviado com sucesso"));
        assert_eq!(notifier.sent.lock().unwrap()[0].text, "");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_store_access() {
        let reports = FakeReportStore::default();
        let notifier = RecordingNotifier::default();
        let workflow = ReportNotifier::from_config(&reports, &notifier, &config());

        for key in [None, Some("")] {
            let err = workflow.notify(key).await.unwrap_err();
            assert_eq!(err, FeedbackError::Input(InputError::MissingField("reportKey")));
            assert_eq!(err.to_string(), "reportKey is required");
        }
        assert!(reports.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_object_is_store_error() {
        let reports = FakeReportStore::with_bucket("test-reports-bucket");
        let notifier = RecordingNotifier::default();

        let err = ReportNotifier::from_config(&reports, &notifier, &config())
            .notify(Some("non-existent-report.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedbackError::Store(StoreError::ObjectNotFound { .. })));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_returned() {
        let reports = FakeReportStore::with_object("test-reports-bucket", "r.txt", "Relatório de teste");
        let notifier = RecordingNotifier {
            fail: Some(DeliveryError::Rejected {
                status: 403,
                body: "Email not verified".into(),
            }),
            ..RecordingNotifier::default()
        };

        let err = ReportNotifier::from_config(&reports, &notifier, &config()).notify(Some("r.txt")).await.unwrap_err();
        assert!(matches!(err, FeedbackError::Delivery(DeliveryError::Rejected { status: 403, .. })));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_report_key_from_event() {
        assert_eq!(report_key_from_event(&json!({"reportKey": "a.txt"})).unwrap(), Some("a.txt"));
        assert_eq!(report_key_from_event(&json!({"reportKey": null})).unwrap(), None);
        assert_eq!(report_key_from_event(&json!({})).unwrap(), None);
        assert!(report_key_from_event(&json!({"reportKey": 7})).is_err());
    }
}
