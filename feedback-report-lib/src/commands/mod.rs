//! Command-line interface for feedback-report
//!
//! Every command builds its collaborators from the same place: `common` resolves the data
//! directory, loads and validates the configuration and initializes logging, then hands
//! out the file-backed record store, the directory-backed report store and a paginator.
//!
//! ## Commands
//!
//! - **list**: one page of normalized records (or all of them with `--all`)
//! - **invoke**: serve a query event in direct or HTTP gateway form
//! - **report**: run the weekly report job and store the artifact
//! - **notify**: mail a stored report through the mail API
//! - **init**: write the default configuration file
//! - **validate**: load and check the configuration

mod common;
mod host;
mod init;
mod invoke;
mod list;
mod notify;
mod report;
mod run;
mod validate;

pub use common::{Common, CommonArgs, LogLevel, resolve_data_dir};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use invoke::{InvokeArgs, invoke_query};
pub use list::{ListArgs, list_feedbacks};
pub use notify::{NotifyArgs, notify_report};
pub use report::{ReportArgs, generate_report};
pub use run::run;
pub use validate::validate_config;
