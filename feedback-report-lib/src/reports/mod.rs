//! Rendering of report statistics
//!
//! The text form is the weekly report that gets stored and mailed; the JSON form carries
//! the same numbers for machine consumption. Both are pure: persisting or sending the
//! result is the caller's business.

mod json;
mod text;

pub use json::{generate as generate_json, to_value as json_value};
pub use text::{EMPTY_NOTICE, HEADER, NO_DATES_NOTICE, Report, artifact_name, format, generate as generate_text};
