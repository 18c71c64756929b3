//! Connect command implementation.

use anyhow::{Context, Result};
use clap::Args;

use dataverse_core::OrgUrl;

use crate::cli::ConnectionArgs;
use crate::output;
use crate::profile::{self, Profile, storage};

#[derive(Args, Debug)]
pub struct ConnectArgs {}

pub async fn run(connection: &ConnectionArgs, _args: ConnectArgs) -> Result<()> {
    let url = connection
        .url
        .as_deref()
        .context("--url (or DATAVERSE_URL) is required")?;
    let token = connection
        .token
        .clone()
        .context("--token (or DATAVERSE_TOKEN) is required")?;

    let org = OrgUrl::new(url).context("Invalid environment URL")?;
    let config = profile::load_config(connection.config.as_deref())?;

    let profile = Profile {
        url: org.base().to_string(),
        token,
    };
    storage::save_profile(&profile)
        .await
        .context("Failed to save profile")?;

    output::success("Profile saved");
    output::field("URL", &profile.url);
    output::field("Web API", &org.api_url(&config.api_version));

    Ok(())
}
