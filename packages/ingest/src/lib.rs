//! Spreadsheet ingestion: turns uploaded CSV/XLSX/XLS exports into
//! validated sales rows ready for bulk insertion.
//!
//! The pipeline is deliberately forgiving about numbers and strict about
//! labels: numeric cells that fail to parse coerce to zero, while a row
//! missing any of `date`, `product`, `category` or `region` is rejected.

mod csv;
mod excel;

pub mod error;
pub mod row;

pub use error::IngestError;
pub use row::{RawRow, SalesRow};

/// File extensions accepted at the upload boundary.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Result of ingesting one uploaded file.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Rows that passed validation, in file order.
    pub rows: Vec<SalesRow>,
    pub accepted: usize,
    pub rejected: usize,
}

/// Parses a whole uploaded file into validated rows.
///
/// The extension decides the decoder before any bytes are touched; a
/// leading dot and casing are tolerated. Fails with
/// [`IngestError::NoValidData`] when nothing survives validation, so an
/// empty upload never reaches storage.
pub fn ingest(bytes: &[u8], extension: &str) -> Result<IngestOutcome, IngestError> {
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();

    let raw_rows = match extension.as_str() {
        "csv" => csv::parse(bytes)?,
        "xlsx" | "xls" => excel::parse(bytes)?,
        other => return Err(IngestError::UnsupportedFormat(other.to_string())),
    };

    let mut rows = Vec::with_capacity(raw_rows.len());
    let mut rejected = 0usize;
    for raw in raw_rows {
        let row = raw.coerce();
        if row.has_required_fields() {
            rows.push(row);
        } else {
            rejected += 1;
        }
    }

    if rows.is_empty() {
        return Err(IngestError::NoValidData);
    }

    let accepted = rows.len();
    tracing::debug!(accepted, rejected, "parsed upload");

    Ok(IngestOutcome {
        rows,
        accepted,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A file where every row carries the four label fields is accepted
    /// in full.
    #[test]
    fn accepts_every_complete_row() {
        let data = b"date,product,category,region,quantity,price,revenue\n\
            2024-01-05,A,X,East,2,100,200\n\
            2024-01-20,B,Y,West,3,100,300";
        let outcome = ingest(data, "csv").unwrap();
        assert_eq!(outcome.accepted, 2);
        assert_eq!(outcome.rejected, 0);
        assert_eq!(outcome.rows[0].date, "2024-01-05");
        assert_eq!(outcome.rows[1].revenue, 300.0);
    }

    /// Rows missing a label are skipped but do not fail the file.
    #[test]
    fn counts_rejected_rows() {
        let data = b"date,product,category,region,quantity,price,revenue\n\
            2024-01-05,A,X,East,2,100,200\n\
            2024-01-20,,Y,West,3,100,300";
        let outcome = ingest(data, "csv").unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.rejected, 1);
    }

    /// A file where no row validates is a hard failure.
    #[test]
    fn rejects_file_without_valid_rows() {
        let data = b"date,product,category,region\n,,,\n,,,";
        let err = ingest(data, "csv").unwrap_err();
        assert!(matches!(err, IngestError::NoValidData));
    }

    /// Header-only and fully empty files behave like all-invalid ones.
    #[test]
    fn rejects_empty_file() {
        let err = ingest(b"date,product,category,region", "csv").unwrap_err();
        assert!(matches!(err, IngestError::NoValidData));
    }

    /// Unsupported extensions fail before any parsing work.
    #[test]
    fn rejects_unknown_extension() {
        let err = ingest(b"anything", "pdf").unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(ext) if ext == "pdf"));
    }

    /// Extension matching tolerates a leading dot and upper case.
    #[test]
    fn normalizes_extension() {
        let data = b"date,product,category,region,quantity,price,revenue\n\
            2024-01-05,A,X,East,2,100,200";
        assert!(ingest(data, ".CSV").is_ok());
    }

    /// Unparseable numeric cells coerce to zero instead of rejecting the
    /// row.
    #[test]
    fn coerces_bad_numbers_to_zero() {
        let data = b"date,product,category,region,quantity,price,revenue\n\
            2024-01-05,A,X,East,abc,100,200";
        let outcome = ingest(data, "csv").unwrap();
        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.rows[0].quantity, 0.0);
    }
}
