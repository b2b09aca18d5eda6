//! `stockbook update` command - write field and link changes back

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::parse_assignment;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Entity, LinkConfig, StockbookClient};
use crate::entities::EntityType;

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Entity type (e.g. product, counterparty, customerorder)
    pub entity_type: EntityType,

    /// Entity id
    pub id: String,

    /// Field assignment as key=value (value parsed as JSON when possible)
    #[arg(long, short = 's')]
    pub set: Vec<String>,

    /// Link assignment as name=json (merged over a same-named field)
    #[arg(long, short = 'l')]
    pub link: Vec<String>,
}

pub fn run(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    if args.set.is_empty() && args.link.is_empty() {
        return Err(miette::miette!(
            "nothing to update: pass at least one --set or --link"
        ));
    }

    let config = Config::load();
    let client = StockbookClient::new(&config).into_diagnostic()?;

    let mut entity = Entity::by_id(&client, args.entity_type, &args.id).into_diagnostic()?;

    for raw in &args.set {
        let (key, value) = parse_assignment(raw).map_err(|e| miette::miette!("{}", e))?;
        entity.set_field(key, value);
    }
    for raw in &args.link {
        let (name, value) = parse_assignment(raw).map_err(|e| miette::miette!("{}", e))?;
        entity.link(value, LinkConfig::new(name));
    }

    let updated = entity.update().into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Updated {} {}",
            style("✓").green(),
            args.entity_type,
            style(&args.id).cyan()
        );
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&updated).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&updated).into_diagnostic()?);
        }
        _ => {}
    }
    Ok(())
}
