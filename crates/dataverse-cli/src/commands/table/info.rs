//! Table info command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::cli::ConnectionArgs;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Table name or schema name
    pub name: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(connection: &ConnectionArgs, args: InfoArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    let Some(info) = client
        .get_table_info(&args.name)
        .await
        .context("Failed to look up table")?
    else {
        bail!("Table '{}' not found", args.name);
    };

    if args.json {
        output::json_pretty(&info)?;
    } else {
        super::print_info(&info);
    }

    Ok(())
}
