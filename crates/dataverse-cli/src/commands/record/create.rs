//! Record create command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use crate::cli::ConnectionArgs;
use crate::commands::input::{self, Records};
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Entity set name (e.g., accounts)
    pub entity_set: String,

    /// JSON file with an object or an array of objects (use - for stdin)
    #[arg(long)]
    pub json: String,

    /// Print only the created ids
    #[arg(long)]
    pub ids_only: bool,
}

pub async fn run(connection: &ConnectionArgs, args: CreateArgs) -> Result<()> {
    let records = input::into_records(input::read_json(&args.json)?)?;
    let client = profile::client(connection).await?;

    match records {
        Records::One(record) => {
            if args.ids_only {
                let id = client
                    .create_id(&args.entity_set, &record)
                    .await
                    .context("Failed to create record")?;
                println!("{}", id);
            } else {
                let created = client
                    .create(&args.entity_set, &record)
                    .await
                    .context("Failed to create record")?;
                output::json_pretty(&created)?;
            }
        }
        Records::Many(records) => {
            // One line per input record, null where creation failed
            let lines: Vec<Value> = if args.ids_only {
                client
                    .create_many_ids(&args.entity_set, &records)
                    .await
                    .context("Failed to create records")?
                    .into_iter()
                    .map(|id| id.map_or(Value::Null, |id| Value::String(id.to_string())))
                    .collect()
            } else {
                client
                    .create_from(&args.entity_set, &records)
                    .await
                    .context("Failed to create records")?
                    .into_iter()
                    .map(|created| created.map_or(Value::Null, Value::Object))
                    .collect()
            };

            for line in &lines {
                output::json(line)?;
            }

            let failed = lines.iter().filter(|line| line.is_null()).count();
            if failed > 0 {
                bail!("{} of {} records were not created", failed, lines.len());
            }
            output::success(&format!("Created {} records", lines.len()));
        }
    }

    Ok(())
}
