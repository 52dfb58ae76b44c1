use crate::error::IngestError;
use csv::ReaderBuilder;
use serde_json::Value;
use triage_core::record::RawRow;

/// Parse CSV text into rows keyed by the header names. RFC 4180 dialect:
/// first row is the header, quoted fields may hold commas and newlines,
/// blank lines are skipped. Ragged rows are a structural failure.
pub(crate) fn csv_rows(content: &str) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = ReaderBuilder::new().from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::MalformedCsv { source })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| IngestError::MalformedCsv { source })?;
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), cell.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Parse JSON text into rows. The document must be an array of objects;
/// scalar values are stringified, `null` means the field is absent.
pub(crate) fn json_rows(content: &str) -> Result<Vec<RawRow>, IngestError> {
    let value: Value =
        serde_json::from_str(content).map_err(|source| IngestError::MalformedJson { source })?;

    let items = match value {
        Value::Array(items) => items,
        _ => {
            return Err(IngestError::InvalidShape {
                reason: "JSON content must be an array of incident objects".to_string(),
            })
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let object = match item {
            Value::Object(map) => map,
            other => {
                return Err(IngestError::InvalidShape {
                    reason: format!("element {} is not an object ({})", index, kind(&other)),
                })
            }
        };

        let mut row = RawRow::new();
        for (key, val) in object {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    row.insert(key, s);
                }
                other => {
                    row.insert(key, other.to_string());
                }
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
