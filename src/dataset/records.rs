//! Loosely-typed record normalization
//!
//! Upstream extraction produces rows as JSON objects whose cells may be numbers,
//! numeric strings, blanks, or junk. This is the only place such rows are coerced;
//! everything past [`ItemDataset`] works on validated numbers.

use serde_json::{Map, Value};

use crate::dataset::item::{Item, ItemDataset};
use crate::error::DatasetError;

/// Keys accepted for each column, in lookup order
const NAME_KEYS: &[&str] = &["name", "item", "工程項目"];
const UNIT_PRICE_KEYS: &[&str] = &["unit_price", "price", "單價"];
const QUANTITY_KEYS: &[&str] = &["quantity", "qty", "數量"];
const CARBON_KEYS: &[&str] = &["carbon_intensity", "gwp"];
const ETA_KEYS: &[&str] = &["eta"];

/// A raw record as received from the extraction layer
pub type RawRecord = Map<String, Value>;

/// Outcome of reading a single cell
#[derive(Clone, Copy, Debug, PartialEq)]
enum Cell {
    Number(f64),
    Blank,
    Unreadable,
}

fn read_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Blank,
        Value::Number(n) => match n.as_f64() {
            Some(x) if x.is_finite() => Cell::Number(x),
            _ => Cell::Unreadable,
        },
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ',')
                .collect();
            if cleaned.is_empty() {
                return Cell::Blank;
            }
            match cleaned.parse::<f64>() {
                Ok(x) if x.is_finite() => Cell::Number(x),
                _ => Cell::Unreadable,
            }
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Cell::Unreadable,
    }
}

fn lookup<'a>(record: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| record.get(*k))
}

/// Read a numeric column, coercing unreadable or blank cells to 0
fn numeric(record: &RawRecord, row: usize, field: &'static str, keys: &[&str], absent: f64) -> f64 {
    let Some(value) = lookup(record, keys) else {
        return absent;
    };

    match read_cell(value) {
        Cell::Number(x) => x,
        Cell::Blank => {
            tracing::warn!(row, field, "blank cell coerced to 0");
            0.0
        }
        Cell::Unreadable => {
            tracing::warn!(row, field, value = %value, "non-numeric cell coerced to 0");
            0.0
        }
    }
}

fn name(record: &RawRecord, row: usize) -> String {
    match lookup(record, NAME_KEYS) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("item-{row}"),
    }
}

/// Convert one raw record into an [`Item`]
///
/// Absent `eta` is 0 and absent quantity is 1. Any present cell that cannot be read
/// as a number becomes 0 and is reported with a warning.
pub fn normalize_record(row: usize, record: &RawRecord) -> Item {
    Item {
        id: row,
        name: name(record, row),
        unit_price: numeric(record, row, "unit_price", UNIT_PRICE_KEYS, 0.0),
        quantity: numeric(record, row, "quantity", QUANTITY_KEYS, 1.0),
        carbon_intensity: numeric(record, row, "carbon_intensity", CARBON_KEYS, 0.0),
        eta: numeric(record, row, "eta", ETA_KEYS, 0.0),
    }
}

impl ItemDataset {
    /// Normalize and validate a list of raw records
    pub fn from_records(records: &[RawRecord]) -> Result<Self, DatasetError> {
        let items = records
            .iter()
            .enumerate()
            .map(|(row, record)| normalize_record(row, record))
            .collect();
        Self::new(items)
    }

    /// Parse a JSON array of record objects, then normalize and validate it
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(rows) = value else {
            return Err(DatasetError::Shape("expected an array of objects".to_string()));
        };

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                Value::Object(map) => Ok(map),
                _ => Err(DatasetError::Shape(format!("row {row} is not an object"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(&records)
    }
}
