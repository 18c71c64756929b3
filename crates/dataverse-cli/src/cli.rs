//! CLI argument definitions.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{connect, disconnect, query, record, table};

/// Dataverse CLI for tables, records and SQL queries.
#[derive(Parser, Debug)]
#[command(name = "dataverse")]
#[command(author, version = env!("DATAVERSE_CLI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect. Flags and environment override the saved profile.
#[derive(Args, Clone)]
pub struct ConnectionArgs {
    /// Environment URL, e.g. https://contoso.crm.dynamics.com
    #[arg(long, env = "DATAVERSE_URL", global = true)]
    pub url: Option<String>,

    /// Bearer token for the environment
    #[arg(long, env = "DATAVERSE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// JSON file with client settings (timeouts, retries, readiness delays)
    #[arg(long, env = "DATAVERSE_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

impl fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionArgs")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("config", &self.config)
            .finish()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the environment URL and token as the default profile
    Connect(connect::ConnectArgs),

    /// Remove the saved profile
    Disconnect(disconnect::DisconnectArgs),

    /// Table provisioning
    Table(table::TableCommand),

    /// Record operations
    Record(record::RecordCommand),

    /// Run a read-only SQL query
    Query(query::QueryArgs),
}
