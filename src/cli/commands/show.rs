//! `stockbook show` command - fetch one entity by id

use miette::{IntoDiagnostic, Result};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Entity, StockbookClient};
use crate::entities::EntityType;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Entity type (e.g. product, counterparty, customerorder)
    pub entity_type: EntityType,

    /// Entity id
    pub id: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let client = StockbookClient::new(&config).into_diagnostic()?;

    let entity = Entity::by_id(&client, args.entity_type, &args.id).into_diagnostic()?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&entity).into_diagnostic()?
            );
        }
        _ => {
            print!("{}", serde_yml::to_string(&entity).into_diagnostic()?);
        }
    }
    Ok(())
}
