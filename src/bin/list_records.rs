//! Run the list pipeline over a JSON or CSV snapshot and print the page as JSON

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quantdesk::config::ConsoleConfig;
use quantdesk::listing::{ListQuery, Record, SearchScope, SortSpec, TabularListController};
use quantdesk::records::{load_records, Commission, CsvRow, LogEntry, Order, Profit, User, WithdrawalRequest};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Entity the snapshot holds; `any` keeps rows as untyped JSON objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Any,
    Users,
    Orders,
    Commissions,
    Profits,
    Withdrawals,
    Logs,
}

#[derive(Debug, Parser)]
#[command(name = "list_records", about = "Filter, search, sort and page a record snapshot")]
struct Args {
    /// Snapshot file (.json or .csv)
    #[arg(long)]
    input: PathBuf,

    /// Entity type of the snapshot rows
    #[arg(long, value_enum, default_value_t = Kind::Any)]
    kind: Kind,

    /// Case-insensitive search text
    #[arg(long, default_value = "")]
    search: String,

    /// Equality filter as field=value; repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Sort as field, field:asc or field:desc
    #[arg(long)]
    sort: Option<SortSpec>,

    /// 0-based page index
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    size: Option<usize>,

    /// Search every field instead of the configured ones
    #[arg(long, conflicts_with = "fields")]
    all_fields: bool,

    /// Searchable fields, comma separated
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// JSON config file (defaults to $QUANTDESK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected field=value, got '{}'", raw))
}

/// Load the snapshot as `T` and render the requested page
fn list_page<T>(input: &Path, controller: &TabularListController, query: &ListQuery) -> Result<Value>
where
    T: Record + CsvRow + Serialize,
{
    let records: Vec<T> = load_records(input).with_context(|| format!("loading {}", input.display()))?;
    let page = controller.visible_page(&records, query)?;
    Ok(json!({
        "records": page.records,
        "totalMatched": page.total_matched,
        "pageCount": page.page_count(query.page.size),
        "page": query.page,
    }))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConsoleConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConsoleConfig::from_env().context("loading config")?,
    };

    let mut controller = TabularListController::from_settings(&config.listing)?;
    if args.all_fields {
        controller = controller.with_scope(SearchScope::AllFields);
    } else if !args.fields.is_empty() {
        controller = controller.with_scope(SearchScope::Fields(args.fields.clone()));
    }

    let mut query = controller.initial_query();
    if let Some(size) = args.size {
        query.set_page_size(size)?;
    }
    for (field, value) in &args.filters {
        query.set_filter(field.as_str(), value.as_str());
    }
    query.set_search(args.search.as_str());
    query.set_sort(args.sort.clone());
    query.set_page(args.page);

    let output = match args.kind {
        Kind::Any => list_page::<Value>(&args.input, &controller, &query)?,
        Kind::Users => list_page::<User>(&args.input, &controller, &query)?,
        Kind::Orders => list_page::<Order>(&args.input, &controller, &query)?,
        Kind::Commissions => list_page::<Commission>(&args.input, &controller, &query)?,
        Kind::Profits => list_page::<Profit>(&args.input, &controller, &query)?,
        Kind::Withdrawals => list_page::<WithdrawalRequest>(&args.input, &controller, &query)?,
        Kind::Logs => list_page::<LogEntry>(&args.input, &controller, &query)?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
