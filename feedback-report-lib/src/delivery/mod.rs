//! Collaborators that take a finished report somewhere else
//!
//! [`ReportStore`] persists and retrieves report artifacts; [`Notifier`] sends them out.
//! Both are traits so the workflows can be driven by in-process fakes, with
//! [`FsReportStore`] and [`MailApiNotifier`] as the implementations the CLI uses.

mod mail;
mod report_store;

pub use mail::{EmailMessage, MailApiNotifier, Notifier};
pub use report_store::{FsReportStore, ReportStore};
