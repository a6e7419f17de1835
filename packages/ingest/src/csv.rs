use crate::error::IngestError;
use crate::row::{COLUMNS, RawRow};

/// Parses comma-delimited text with a required header row.
///
/// Headers and cells are decoded lossily so a stray non-UTF-8 byte does
/// not fail the file; records that cannot be decoded at all are skipped
/// with a warning rather than aborting the upload.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|header| String::from_utf8_lossy(header).to_string())
        .collect();
    let mapping = column_mapping(&headers);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("skipping malformed csv record: {err}");
                continue;
            }
        };

        let mut raw = RawRow::default();
        for (index, column) in mapping.iter().enumerate() {
            if let (Some(column), Some(value)) = (column, record.get(index)) {
                raw.set(column, String::from_utf8_lossy(value).to_string());
            }
        }
        rows.push(raw);
    }

    Ok(rows)
}

/// Maps each header position onto a recognized column, if any.
pub(crate) fn column_mapping(headers: &[String]) -> Vec<Option<&'static str>> {
    headers
        .iter()
        .map(|header| {
            let header = header.trim();
            COLUMNS.iter().copied().find(|column| *column == header)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recognized columns map by exact name, everything else is dropped.
    #[test]
    fn maps_known_headers() {
        let headers = vec![
            "date".to_string(),
            "discount".to_string(),
            " revenue ".to_string(),
        ];
        let mapping = column_mapping(&headers);
        assert_eq!(mapping, vec![Some("date"), None, Some("revenue")]);
    }

    /// Column order in the file is irrelevant; mapping is by name.
    #[test]
    fn parses_reordered_columns() {
        let data = b"revenue,region,category,product,date\n150,East,X,A,2024-02-01";
        let rows = parse(data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.as_deref(), Some("2024-02-01"));
        assert_eq!(rows[0].revenue.as_deref(), Some("150"));
        assert_eq!(rows[0].quantity, None);
    }

    /// Quoted cells keep embedded delimiters.
    #[test]
    fn honors_quoting() {
        let data = b"date,product,category,region\n2024-02-01,\"Desk, small\",X,East";
        let rows = parse(data).unwrap();
        assert_eq!(rows[0].product.as_deref(), Some("Desk, small"));
    }

    /// Short records leave the remaining fields unset instead of
    /// failing the file.
    #[test]
    fn tolerates_short_records() {
        let data = b"date,product,category,region\n2024-02-01,A";
        let rows = parse(data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, None);
    }

    /// Header matching is case-sensitive by convention.
    #[test]
    fn header_match_is_case_sensitive() {
        let data = b"Date,product,category,region\n2024-02-01,A,X,East";
        let rows = parse(data).unwrap();
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].product.as_deref(), Some("A"));
    }
}
