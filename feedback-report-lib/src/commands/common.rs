//! Setup shared by every command: logging, data directory and configuration.

use super::Host;
use crate::Result;
use crate::config::Config;
use crate::delivery::FsReportStore;
use crate::query::QueryPaginator;
use crate::store::FileFeedbackStore;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::{IntoAppError, app_err};
use serde_json::Value;
use std::fs;
use std::io::Read;

/// Directory name used under the platform data directory
const APP_DIR_NAME: &str = "feedback-report";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments accepted by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `feedback.toml` in the data directory)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Directory holding the table files and report buckets
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Resolved configuration and local collaborators for a command run
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub data_dir: Utf8PathBuf,
}

impl Common {
    /// Initialize logging, then resolve the data directory and load the configuration
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let data_dir = resolve_data_dir(args.data_dir.as_ref())?;
        let config = Config::load(&data_dir, args.config.as_ref())?;
        log::debug!("using data directory '{data_dir}' and table '{}'", config.table_name);

        Ok(Self { config, data_dir })
    }

    #[must_use]
    pub fn feedback_store(&self) -> FileFeedbackStore {
        FileFeedbackStore::new(self.data_dir.clone())
    }

    #[must_use]
    pub fn report_store(&self) -> FsReportStore {
        FsReportStore::new(self.data_dir.join("buckets"))
    }

    #[must_use]
    pub fn paginator(&self) -> QueryPaginator<FileFeedbackStore> {
        QueryPaginator::from_config(self.feedback_store(), &self.config)
    }
}

/// Use the explicit directory when given, else the platform data directory
pub fn resolve_data_dir(explicit: Option<&Utf8PathBuf>) -> Result<Utf8PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.clone());
    }

    let path = BaseDirs::new()
        .into_app_err("could not determine data directory")?
        .data_dir()
        .join(APP_DIR_NAME);

    Utf8PathBuf::from_path_buf(path).map_err(|p| app_err!("data directory '{}' is not valid UTF-8", p.display()))
}

/// Read an event JSON document from `path`, or from the host's input when `path` is `-`
pub fn read_event<H: Host>(host: &mut H, path: &Utf8Path) -> Result<Value> {
    let text = if path.as_str() == "-" {
        let mut text = String::new();
        let _ = host.input().read_to_string(&mut text).into_app_err("reading event from stdin")?;
        text
    } else {
        fs::read_to_string(path).into_app_err_with(|| format!("reading event file '{path}'"))?
    };

    serde_json::from_str(&text).into_app_err("parsing event JSON")
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a second command run in the same process keeps the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
