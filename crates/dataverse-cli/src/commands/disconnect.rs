//! Disconnect command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::profile::storage;

#[derive(Args, Debug)]
pub struct DisconnectArgs {}

pub async fn run(_args: DisconnectArgs) -> Result<()> {
    let removed = storage::clear_profile()
        .await
        .context("Failed to remove profile")?;

    if removed {
        output::success("Profile removed");
    } else {
        output::warning("No saved profile");
    }

    Ok(())
}
