//! Record delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entity set name (e.g., accounts)
    pub entity_set: String,

    /// Record id, or a key already wrapped in parentheses
    pub key: String,
}

pub async fn run(connection: &ConnectionArgs, args: DeleteArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    client
        .delete(&args.entity_set, &args.key)
        .await
        .context("Failed to delete record")?;

    output::success(&format!("Deleted {}({})", args.entity_set, args.key.trim_matches(['(', ')'])));

    Ok(())
}
