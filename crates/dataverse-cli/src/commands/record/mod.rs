//! Record subcommand implementations.

mod create;
mod delete;
mod get;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::ConnectionArgs;

#[derive(Args, Debug)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordSubcommand {
    /// Create one record, or a batch from a JSON array
    Create(create::CreateArgs),

    /// Fetch a single record
    Get(get::GetArgs),

    /// Update a record
    Update(update::UpdateArgs),

    /// Delete a record
    Delete(delete::DeleteArgs),
}

pub async fn handle(connection: &ConnectionArgs, cmd: RecordCommand) -> Result<()> {
    match cmd.command {
        RecordSubcommand::Create(args) => create::run(connection, args).await,
        RecordSubcommand::Get(args) => get::run(connection, args).await,
        RecordSubcommand::Update(args) => update::run(connection, args).await,
        RecordSubcommand::Delete(args) => delete::run(connection, args).await,
    }
}
