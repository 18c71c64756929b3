//! Subcommand implementations.

pub mod connect;
pub mod disconnect;
mod input;
pub mod query;
pub mod record;
pub mod table;
