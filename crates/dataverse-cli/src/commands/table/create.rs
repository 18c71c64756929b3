//! Table create command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ConnectionArgs;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Table name; a name without a prefix gets `new_`
    pub name: String,

    /// Column as name:type (string, int, decimal, float, datetime, bool)
    #[arg(long = "column", short = 'c', value_parser = parse_column)]
    pub columns: Vec<(String, String)>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_column(value: &str) -> std::result::Result<(String, String), String> {
    match value.split_once(':') {
        Some((name, column_type)) if !name.trim().is_empty() && !column_type.trim().is_empty() => {
            Ok((name.trim().to_string(), column_type.trim().to_string()))
        }
        _ => Err(format!("expected name:type, got '{}'", value)),
    }
}

pub async fn run(connection: &ConnectionArgs, args: CreateArgs) -> Result<()> {
    let client = profile::client(connection).await?;

    eprintln!("{}", "Creating table...".dimmed());

    let info = client
        .create_table(&args.name, args.columns)
        .await
        .context("Failed to create table")?;

    if args.json {
        output::json_pretty(&info)?;
    } else {
        output::success(&format!("Table {} is ready", info.schema_name));
        super::print_info(&info);
    }

    Ok(())
}
