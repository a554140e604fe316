use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::generate_json;
use crate::workflow::WeeklyReport;
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Also write the statistics as JSON to this file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Print the rendered report after the artifact name
    #[arg(long, help_heading = "Report Output")]
    pub print: bool,
}

pub async fn generate_report<H: Host>(host: &mut H, common_args: &CommonArgs, args: &ReportArgs) -> Result<()> {
    let common = Common::new(common_args)?;
    let workflow = WeeklyReport::new(common.paginator(), common.report_store(), &common.config.reports_bucket);

    let generated = workflow.generate(Utc::now()).await.into_app_err("generating weekly report")?;

    if let Some(path) = &args.json {
        let mut json_output = String::new();
        generate_json(&generated.statistics, generated.generated_at, &mut json_output)?;
        fs::write(path, json_output).into_app_err_with(|| format!("writing statistics to '{path}'"))?;
    }

    let _ = writeln!(host.output(), "{}", generated.report.artifact_name);
    if args.print {
        let _ = writeln!(host.output(), "{}", generated.report.text);
    }

    Ok(())
}
