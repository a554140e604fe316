//! Validates the embedded default configuration file (`default_config.toml`).

use ohno::{IntoAppError, app_err};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

const REQUIRED_KEYS: &[&str] = &[
    "table_name",
    "partition_key",
    "reports_bucket",
    "default_page_size",
    "recipient_email",
    "source_email",
    "source_name",
    "mail_api_url",
];

fn main() {
    match inner_main() {
        Ok(()) => {
            println!("cargo:rerun-if-changed=default_config.toml");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("unable to load default_config.toml: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let config_path = PathBuf::from(manifest_dir).join("default_config.toml");

    let text = fs::read_to_string(&config_path).into_app_err("reading default_config.toml")?;
    let table: toml::Table = toml::from_str(&text).into_app_err("parsing default_config.toml")?;

    for key in REQUIRED_KEYS {
        if !table.contains_key(*key) {
            return Err(app_err!("default_config.toml is missing '{key}'"));
        }
    }

    Ok(())
}
