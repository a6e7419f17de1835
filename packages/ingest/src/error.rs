use thiserror::Error;

/// Failures surfaced by the ingestion pipeline.
///
/// Format and validation errors are detected synchronously and carry no
/// side effects; callers decide how to map them onto their boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The declared extension is outside the supported set; checked
    /// before any parsing work.
    #[error("invalid file format: .{0} (only csv, xlsx and xls are supported)")]
    UnsupportedFormat(String),

    /// Every parsed row failed validation, or the file had no data rows.
    #[error("no valid data found in file")]
    NoValidData,

    #[error("failed to parse delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no sheets")]
    EmptyWorkbook,
}
