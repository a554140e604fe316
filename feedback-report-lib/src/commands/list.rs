use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::query::QueryRequest;
use crate::store::PageCursor;
use clap::Parser;
use ohno::IntoAppError;
use serde_json::json;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Earliest `createdAt` to include (default 2020-01-01T00:00:00Z)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Latest `createdAt` to include (default 2030-12-31T23:59:59Z)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Only list records with exactly this urgency
    #[arg(long, value_name = "URGENCY")]
    pub urgency: Option<String>,

    /// Resume after the `nextToken` printed by a previous page
    #[arg(long, value_name = "JSON")]
    pub next_token: Option<String>,

    /// Follow every page and print all matching records at once
    #[arg(long, conflicts_with = "next_token")]
    pub all: bool,
}

pub async fn list_feedbacks<H: Host>(host: &mut H, common_args: &CommonArgs, args: &ListArgs) -> Result<()> {
    let next_token = args
        .next_token
        .as_deref()
        .map(PageCursor::from_json_str)
        .transpose()
        .into_app_err("parsing --next-token")?;

    let request = QueryRequest {
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        urgency: args.urgency.clone(),
        next_token,
    };

    let common = Common::new(common_args)?;
    let paginator = common.paginator();

    let output = if args.all {
        let items = paginator.query_all(&request).await.into_app_err("listing feedback records")?;
        json!({ "items": items, "count": items.len() })
    } else {
        let response = paginator.query(&request).await.into_app_err("listing feedback records")?;
        serde_json::to_value(&response)?
    };

    let _ = writeln!(host.output(), "{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
