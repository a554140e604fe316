//! The two scheduled jobs: building the weekly report and mailing a stored one

mod notify;
mod weekly_report;

#[cfg(test)]
mod test_support;

pub use notify::{ReportNotifier, report_key_from_event};
pub use weekly_report::{GeneratedReport, WeeklyReport};
