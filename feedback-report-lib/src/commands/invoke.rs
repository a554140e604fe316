use super::Host;
use super::common::{Common, CommonArgs, read_event};
use crate::Result;
use crate::query::http;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InvokeArgs {
    /// Event JSON file, or `-` to read the event from stdin
    #[arg(value_name = "PATH", default_value = "-")]
    pub event: Utf8PathBuf,
}

pub async fn invoke_query<H: Host>(host: &mut H, common_args: &CommonArgs, args: &InvokeArgs) -> Result<()> {
    let event = read_event(host, &args.event)?;

    let common = Common::new(common_args)?;
    let paginator = common.paginator();
    let response = http::invoke(&paginator, &event).await.into_app_err("serving query event")?;

    let _ = writeln!(host.output(), "{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
