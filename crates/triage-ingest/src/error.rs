use thiserror::Error;

/// Terminal ingestion failures. No partial dataset is ever returned; the
/// caller keeps its previous snapshot until an ingest succeeds.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file format `.{extension}`: upload a CSV or JSON file")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse CSV content: {source}")]
    MalformedCsv {
        #[source]
        source: csv::Error,
    },

    #[error("invalid JSON syntax: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected data shape: {reason}")]
    InvalidShape { reason: String },
}
