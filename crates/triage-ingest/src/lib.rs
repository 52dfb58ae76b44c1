pub mod error;
pub mod format;
mod parse;

pub use error::*;
pub use format::*;

use tracing::{debug, warn};
use triage_core::record::{normalize, Incident, RawRow};

/// Parse raw uploaded text into a normalized incident dataset.
///
/// Either the full sequence comes back or the whole ingestion fails;
/// partial success is not supported, so callers keep their previous
/// snapshot until this returns `Ok`.
pub fn ingest(content: &str, format: SourceFormat) -> Result<Vec<Incident>, IngestError> {
    let rows = match format {
        SourceFormat::Csv => parse::csv_rows(content)?,
        SourceFormat::Json => parse::json_rows(content)?,
    };
    debug!("parsed {} rows from {:?} upload", rows.len(), format);

    let mut incidents = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        validate_row(index, row)?;
        let incident = normalize(row);
        if incident.created_date.is_none() && !incident.created.is_empty() {
            warn!("row {}: unparseable Created value '{}'", index, incident.created);
        }
        incidents.push(incident);
    }

    debug!("ingested {} incidents", incidents.len());
    Ok(incidents)
}

/// Like [`ingest`], with the parse path picked from the uploaded file's
/// name.
pub fn ingest_named(file_name: &str, content: &str) -> Result<Vec<Incident>, IngestError> {
    let format = SourceFormat::from_file_name(file_name)?;
    ingest(content, format)
}

/// Every accepted record must carry a non-empty `Number`; rejecting here
/// lets the rest of the system treat the key as always present.
fn validate_row(index: usize, row: &RawRow) -> Result<(), IngestError> {
    match row.get("Number") {
        Some(number) if !number.is_empty() => Ok(()),
        _ => Err(IngestError::InvalidShape {
            reason: format!("row {} is missing the required Number field", index),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::aggregate::{by_category, by_day, DayCount, LabelCount};

    #[test]
    fn test_csv_ingest_feeds_aggregations() -> anyhow::Result<()> {
        let content = "Number,Created,Category\nINC001,2024-01-05,Network\nINC002,2024-01-06,Network";
        let incidents = ingest(content, SourceFormat::Csv)?;
        assert_eq!(incidents.len(), 2);

        assert_eq!(
            by_day(&incidents),
            vec![
                DayCount { date: "2024-01-05".to_string(), count: 1 },
                DayCount { date: "2024-01-06".to_string(), count: 1 },
            ]
        );
        assert_eq!(
            by_category(&incidents),
            vec![LabelCount { name: "Network".to_string(), value: 2 }]
        );
        Ok(())
    }

    #[test]
    fn test_json_ingest_normalizes_durations() -> anyhow::Result<()> {
        let content = r#"[
            {"Number": "INC001", "State": "Closed", "Business duration": "7200"},
            {"Number": "INC002", "State": "New", "Business duration": ""}
        ]"#;
        let incidents = ingest(content, SourceFormat::Json)?;
        assert_eq!(incidents[0].business_duration_hours, 2.0);
        assert_eq!(incidents[1].business_duration_hours, 0.0);
        Ok(())
    }

    #[test]
    fn test_json_syntax_error() {
        let err = ingest("{not valid", SourceFormat::Json).unwrap_err();
        assert!(matches!(err, IngestError::MalformedJson { .. }));
    }

    #[test]
    fn test_json_row_without_number_fails_whole_ingest() {
        let err = ingest(r#"[{"Category":"X"}]"#, SourceFormat::Json).unwrap_err();
        assert!(matches!(err, IngestError::InvalidShape { .. }));

        // A bad row anywhere fails everything, not just that row
        let err = ingest(
            r#"[{"Number":"INC001"},{"Category":"X"}]"#,
            SourceFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidShape { .. }));
    }

    #[test]
    fn test_csv_row_with_empty_number_fails() {
        let err = ingest("Number,Category\n,Network\n", SourceFormat::Csv).unwrap_err();
        assert!(matches!(err, IngestError::InvalidShape { .. }));
    }

    #[test]
    fn test_empty_json_array_is_an_empty_dataset() -> anyhow::Result<()> {
        let incidents = ingest("[]", SourceFormat::Json)?;
        assert!(incidents.is_empty());
        Ok(())
    }

    #[test]
    fn test_ingest_named_rejects_unknown_extension() {
        let err = ingest_named("incidents.xlsx", "").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_ingest_named_routes_by_extension() -> anyhow::Result<()> {
        let incidents = ingest_named("upload.csv", "Number\nINC001\n")?;
        assert_eq!(incidents[0].number, "INC001");

        let incidents = ingest_named("upload.json", r#"[{"Number":"INC002"}]"#)?;
        assert_eq!(incidents[0].number, "INC002");
        Ok(())
    }
}
