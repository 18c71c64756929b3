//! dataverse - CLI tool for a Dataverse environment.
//!
//! A thin wrapper over `dataverse-webapi` for provisioning tables, editing
//! records and running SQL queries from scripts or a terminal.

mod cli;
mod commands;
mod output;
mod profile;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{record, table};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let connection = &cli.connection;
    match cli.command {
        Commands::Connect(args) => commands::connect::run(connection, args).await,
        Commands::Disconnect(args) => commands::disconnect::run(args).await,
        Commands::Table(cmd) => table::handle(connection, cmd).await,
        Commands::Record(cmd) => record::handle(connection, cmd).await,
        Commands::Query(args) => commands::query::run(connection, args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout carries command output
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
