//! Table delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Table name or schema name
    pub name: String,
}

pub async fn run(connection: &ConnectionArgs, args: DeleteArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    client
        .delete_table(&args.name)
        .await
        .context("Failed to delete table")?;

    output::success(&format!("Deleted table {}", args.name));

    Ok(())
}
