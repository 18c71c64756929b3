//! Table subcommand implementations.

mod create;
mod delete;
mod info;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use dataverse_core::schema::TableInfo;

use crate::cli::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct TableCommand {
    #[command(subcommand)]
    pub command: TableSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TableSubcommand {
    /// Create a table and wait until it is ready
    Create(create::CreateArgs),

    /// Show a table's derived names
    Info(info::InfoArgs),

    /// List public tables
    List(list::ListArgs),

    /// Delete a table
    Delete(delete::DeleteArgs),
}

pub async fn handle(connection: &ConnectionArgs, cmd: TableCommand) -> Result<()> {
    match cmd.command {
        TableSubcommand::Create(args) => create::run(connection, args).await,
        TableSubcommand::Info(args) => info::run(connection, args).await,
        TableSubcommand::List(args) => list::run(connection, args).await,
        TableSubcommand::Delete(args) => delete::run(connection, args).await,
    }
}

fn print_info(info: &TableInfo) {
    output::field("Schema name", &info.schema_name);
    output::field("Logical name", &info.logical_name);
    output::field("Entity set", &info.entity_set_name);
    output::field("Metadata id", &info.metadata_id);
    if !info.columns_created.is_empty() {
        output::field("Columns", &info.columns_created.join(", "));
    }
}
