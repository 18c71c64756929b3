//! Query command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ConnectionArgs;
use crate::output;
use crate::profile;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// SQL text, e.g. "SELECT name FROM account"
    pub sql: String,
}

pub async fn run(connection: &ConnectionArgs, args: QueryArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    let rows = client.query_sql(&args.sql).await.context("Query failed")?;

    if rows.is_empty() {
        eprintln!("{}", "No rows.".dimmed());
        return Ok(());
    }

    for row in &rows {
        output::json(row)?;
    }

    Ok(())
}
