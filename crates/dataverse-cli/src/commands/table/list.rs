//! Table list command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ConnectionArgs;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct ListArgs {}

pub async fn run(connection: &ConnectionArgs, _args: ListArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    let tables = client.list_tables().await.context("Failed to list tables")?;

    if tables.is_empty() {
        eprintln!("{}", "No tables found.".dimmed());
        return Ok(());
    }

    for table in &tables {
        output::json(table)?;
    }

    Ok(())
}
