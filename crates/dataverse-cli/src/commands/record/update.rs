//! Record update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::commands::input;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entity set name (e.g., accounts)
    pub entity_set: String,

    /// Record id, or a key already wrapped in parentheses
    pub key: String,

    /// JSON file with the fields to change (use - for stdin)
    #[arg(long)]
    pub json: String,
}

pub async fn run(connection: &ConnectionArgs, args: UpdateArgs) -> Result<()> {
    let record = input::into_record(input::read_json(&args.json)?)?;
    let client = profile::client(connection).await?;

    let updated = client
        .update(&args.entity_set, &args.key, &record)
        .await
        .context("Failed to update record")?;

    output::json_pretty(&updated)?;

    Ok(())
}
