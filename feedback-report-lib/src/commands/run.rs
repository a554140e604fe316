//! Command dispatch logic for feedback-report

use super::common::CommonArgs;
use super::{
    InitArgs, InvokeArgs, ListArgs, NotifyArgs, ReportArgs, generate_report, init_config, invoke_query, list_feedbacks, notify_report,
    validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "feedback-report", version, author, long_about = None)]
#[command(about = "Query stored feedback records and build the weekly feedback report")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of feedback records, or all of them
    List(ListArgs),
    /// Serve a query event in direct or HTTP gateway form
    Invoke(InvokeArgs),
    /// Generate and store the weekly report
    Report(ReportArgs),
    /// Mail a stored report to the configured recipient
    Notify(NotifyArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate the configuration
    Validate,
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        Command::List(list_args) => list_feedbacks(host, &cli.common, list_args).await,
        Command::Invoke(invoke_args) => invoke_query(host, &cli.common, invoke_args).await,
        Command::Report(report_args) => generate_report(host, &cli.common, report_args).await,
        Command::Notify(notify_args) => notify_report(host, &cli.common, notify_args).await,
        Command::Init(init_args) => init_config(host, &cli.common, init_args),
        Command::Validate => validate_config(host, &cli.common),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["feedback-report", "list", "--data-dir", "/tmp/data", "--urgency", "alta"]).unwrap();
        assert_eq!(cli.common.data_dir.as_deref().map(camino::Utf8Path::as_str), Some("/tmp/data"));
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.urgency.as_deref(), Some("alta"));
    }

    #[test]
    fn test_all_conflicts_with_next_token() {
        let result = Cli::try_parse_from(["feedback-report", "list", "--all", "--next-token", "{}"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_notify_event_conflicts_with_report_key() {
        let result = Cli::try_parse_from(["feedback-report", "notify", "--event", "e.json", "--report-key", "k.txt"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["feedback-report", "notify", "--event", "-"]).unwrap();
        let Command::Notify(args) = cli.command else {
            panic!("expected notify command");
        };
        assert_eq!(args.event.as_deref().map(camino::Utf8Path::as_str), Some("-"));
    }
}
