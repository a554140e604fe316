#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for feedback-report
//!
//! Reads feedback records from a key-value store, normalizes their tagged attribute
//! values, pages through them by creation date, and summarizes a full window into the
//! weekly report.
//!
//! # Module Organization
//!
//! - [`values`]: the tagged wire values and their normalization
//! - [`store`]: the range-query capability and its file and memory backends
//! - [`query`]: the paginator and its direct/HTTP invocation envelopes
//! - [`stats`]: aggregation of a complete record set
//! - [`reports`]: text and JSON rendering of the statistics
//! - [`delivery`]: report storage and mail notification
//! - [`workflow`]: the weekly report and notification jobs
//! - [`commands`]: command-line interface
//! - [`config`], [`error`]: settings and typed failures

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod config;
pub mod delivery;
pub mod error;
pub mod query;
pub mod reports;
pub mod stats;
pub mod store;
pub mod values;
pub mod workflow;

pub use crate::commands::{Host, run};
