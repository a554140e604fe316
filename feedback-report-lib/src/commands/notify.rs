use super::Host;
use super::common::{Common, CommonArgs, read_event};
use crate::Result;
use crate::delivery::MailApiNotifier;
use crate::workflow::{ReportNotifier, report_key_from_event};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::io::Write;

#[derive(Parser, Debug)]
pub struct NotifyArgs {
    /// Key of the stored report to send, e.g. `weekly-report-2026-01-12.txt`
    #[arg(long, value_name = "KEY")]
    pub report_key: Option<String>,

    /// Read `reportKey` from an event JSON file instead, or from stdin with `-`
    #[arg(long, value_name = "PATH", conflicts_with = "report_key")]
    pub event: Option<Utf8PathBuf>,

    /// Mail API token
    #[arg(long, value_name = "TOKEN", env = "MAIL_API_TOKEN", hide_env_values = true)]
    pub mail_token: Option<String>,
}

pub async fn notify_report<H: Host>(host: &mut H, common_args: &CommonArgs, args: &NotifyArgs) -> Result<()> {
    let common = Common::new(common_args)?;

    let Some(token) = args.mail_token.as_deref() else {
        bail!("a mail API token is required (use --mail-token or set MAIL_API_TOKEN)");
    };

    let notifier = MailApiNotifier::new(&common.config.mail_api_url, token)?;
    let workflow = ReportNotifier::from_config(common.report_store(), notifier, &common.config);

    let event = match &args.event {
        Some(path) => Some(read_event(host, path)?),
        None => None,
    };

    let report_key = match &event {
        Some(event) => report_key_from_event(event).into_app_err("reading reportKey from event")?,
        None => args.report_key.as_deref(),
    };

    let message = workflow
        .notify(report_key)
        .await
        .into_app_err("sending weekly report")?;

    let _ = writeln!(host.output(), "{message}");
    Ok(())
}
