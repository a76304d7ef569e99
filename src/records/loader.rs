//! Record snapshots from JSON or CSV fixtures
//!
//! JSON input may be a bare array or the API's `{ "data": [...] }` envelope.
//! CSV input has a header row naming each column.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use super::entities::{Commission, LogEntry, Order, Profit, User, WithdrawalRequest};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open records: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON records: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed CSV records: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported record file '{0}' (expected .json or .csv)")]
    UnknownFormat(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot<T> {
    Bare(Vec<T>),
    Envelope { data: Vec<T> },
}

/// A row type that can be read from a CSV snapshot
pub trait CsvRow: DeserializeOwned {
    fn from_csv_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> Result<Self, csv::Error> {
        row.deserialize(Some(headers))
    }
}

/// Untyped rows become JSON objects keyed by header. Cells that read as
/// JSON numbers become numbers and empty cells become null.
impl CsvRow for Value {
    fn from_csv_row(headers: &csv::StringRecord, row: &csv::StringRecord) -> Result<Self, csv::Error> {
        let object: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.to_string(), csv_cell(cell)))
            .collect();
        Ok(Value::Object(object))
    }
}

impl CsvRow for User {}
impl CsvRow for Order {}
impl CsvRow for Commission {}
impl CsvRow for Profit {}
impl CsvRow for WithdrawalRequest {}
impl CsvRow for LogEntry {}

fn csv_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match cell.parse::<Number>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(cell.to_string()),
    }
}

pub fn load_json_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, LoadError> {
    let snapshot: Snapshot<T> = serde_json::from_reader(reader)?;
    Ok(match snapshot {
        Snapshot::Bare(records) => records,
        Snapshot::Envelope { data } => data,
    })
}

pub fn load_csv_from_reader<T: CsvRow, R: Read>(reader: R) -> Result<Vec<T>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for row in rdr.records() {
        records.push(T::from_csv_row(&headers, &row?)?);
    }
    Ok(records)
}

/// Load a snapshot, picking the format from the file extension
pub fn load_records<T: CsvRow, P: AsRef<Path>>(path: P) -> Result<Vec<T>, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let records = match extension.as_deref() {
        Some("json") => load_json_from_reader(BufReader::new(File::open(path)?))?,
        Some("csv") => load_csv_from_reader(BufReader::new(File::open(path)?))?,
        _ => return Err(LoadError::UnknownFormat(path.display().to_string())),
    };
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
