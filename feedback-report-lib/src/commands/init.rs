use super::Host;
use super::common::{CommonArgs, resolve_data_dir};
use crate::Result;
use crate::config::{CONFIG_FILE_NAME, Config};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `feedback.toml` in the data directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, common_args: &CommonArgs, args: &InitArgs) -> Result<()> {
    let output = if let Some(path) = &args.output {
        path.clone()
    } else {
        let data_dir = resolve_data_dir(common_args.data_dir.as_ref())?;
        fs::create_dir_all(&data_dir).into_app_err_with(|| format!("creating data directory '{data_dir}'"))?;
        data_dir.join(CONFIG_FILE_NAME)
    };

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}
