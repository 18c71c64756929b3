//! Record get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Entity set name (e.g., accounts)
    pub entity_set: String,

    /// Record id, or a key already wrapped in parentheses
    pub key: String,

    /// Comma-separated fields to return
    #[arg(long)]
    pub select: Option<String>,
}

pub async fn run(connection: &ConnectionArgs, args: GetArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    let record = client
        .get(&args.entity_set, &args.key, args.select.as_deref())
        .await
        .context("Failed to get record")?;

    output::json_pretty(&record)?;

    Ok(())
}
