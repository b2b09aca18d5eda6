//! `stockbook list` command - list and filter entities

use chrono::NaiveDateTime;
use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Entity, FilterExpr, QueryParams, StockbookClient};
use crate::entities::EntityType;

/// Columns to display in list output
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ListColumn {
    Id,
    Name,
    Code,
    Type,
    Updated,
}

impl ListColumn {
    fn key(&self) -> &'static str {
        match self {
            ListColumn::Id => "id",
            ListColumn::Name => "name",
            ListColumn::Code => "code",
            ListColumn::Type => "type",
            ListColumn::Updated => "updated",
        }
    }
}

impl std::fmt::Display for ListColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 38),
    ColumnDef::new("name", "NAME", 40),
    ColumnDef::new("code", "CODE", 16),
    ColumnDef::new("type", "TYPE", 14),
    ColumnDef::new("updated", "UPDATED", 17),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Entity type to list (e.g. product, counterparty, customerorder)
    pub entity_type: EntityType,

    /// Filter term as key=value (can specify multiple; terms are ANDed)
    #[arg(long, short = 'F')]
    pub filter: Vec<String>,

    /// Pagination window size for the first request
    #[arg(long)]
    pub limit: Option<u64>,

    /// Pagination offset for the first request
    #[arg(long)]
    pub offset: Option<u64>,

    /// Extra query option as key=value (passed through verbatim)
    #[arg(long = "param")]
    pub params: Vec<String>,

    /// Columns to display (can specify multiple)
    #[arg(long, value_delimiter = ',', default_values_t = vec![
        ListColumn::Id,
        ListColumn::Name,
        ListColumn::Code,
        ListColumn::Updated,
    ])]
    pub columns: Vec<ListColumn>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let client = StockbookClient::new(&config).into_diagnostic()?;

    let mut params = QueryParams::new();
    if let Some(limit) = args.limit {
        params = params.with_limit(limit);
    }
    if let Some(offset) = args.offset {
        params = params.with_offset(offset);
    }
    for raw in &args.params {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| miette::miette!("expected key=value, got '{}'", raw))?;
        params = params.with_param(key, value);
    }

    let entities = if args.filter.is_empty() {
        Entity::list(&client, args.entity_type, Some(params))
    } else {
        let expr = FilterExpr::from_terms(&args.filter);
        Entity::filter(&client, args.entity_type, &expr, Some(params))
    }
    .into_diagnostic()?;

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&entities).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&entities).into_diagnostic()?);
        }
        format => {
            let visible: Vec<&str> = args.columns.iter().map(|c| c.key()).collect();
            let rows: Vec<TableRow> = entities.iter().map(to_row).collect();
            let mut formatter = TableFormatter::new(COLUMNS, args.entity_type.as_str());
            if global.quiet {
                formatter = formatter.without_summary();
            }
            match format {
                OutputFormat::Csv => formatter.output_csv(&rows, &visible),
                OutputFormat::Md => formatter.output_md(&rows, &visible),
                OutputFormat::Id => formatter.output_ids(&rows),
                _ => formatter.output_tsv(&rows, &visible),
            }
        }
    }

    Ok(())
}

fn to_row(entity: &Entity) -> TableRow {
    let id = entity
        .field("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| entity.fields().meta().and_then(|m| m.id()).map(|u| u.to_string()))
        .unwrap_or_else(|| "-".to_string());

    TableRow::new(id.clone())
        .cell("id", CellValue::Id(id))
        .cell("name", text_cell(entity.field("name")))
        .cell("code", text_cell(entity.field("code")))
        .cell(
            "type",
            match entity.fields().meta() {
                Some(meta) => CellValue::Type(meta.entity_type),
                None => CellValue::Type(entity.entity_type().to_string()),
            },
        )
        .cell("updated", moment_cell(entity.field("updated")))
}

fn text_cell(value: Option<&Value>) -> CellValue {
    match value.and_then(Value::as_str) {
        Some(s) => CellValue::Text(s.to_string()),
        None => CellValue::Empty,
    }
}

/// Server timestamps come back as "2024-05-01 13:37:00.123"
fn moment_cell(value: Option<&Value>) -> CellValue {
    value
        .and_then(Value::as_str)
        .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok())
        .map(CellValue::Moment)
        .unwrap_or(CellValue::Empty)
}
