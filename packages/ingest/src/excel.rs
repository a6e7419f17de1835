use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::csv::column_mapping;
use crate::error::IngestError;
use crate::row::RawRow;

/// Parses the first sheet of an XLSX/XLS workbook, first row as header.
///
/// The workbook kind is sniffed from the bytes, so a mislabeled but
/// well-formed file still opens. Rows with no content at all are
/// dropped before validation so trailing blank lines in a sheet do not
/// inflate the rejected count.
pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::EmptyWorkbook)?;
    let range: Range<Data> = workbook.worksheet_range(&sheet)?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Ok(Vec::new()),
    };
    let mapping = column_mapping(&headers);

    let mut rows = Vec::new();
    for row in rows_iter {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut raw = RawRow::default();
        for (index, column) in mapping.iter().enumerate() {
            if let (Some(column), Some(cell)) = (column, row.get(index)) {
                raw.set(column, cell_to_string(cell));
            }
        }
        rows.push(raw);
    }

    Ok(rows)
}

/// Renders a cell the way it would appear in the equivalent CSV export:
/// integral floats without a trailing `.0`, booleans as `TRUE`/`FALSE`,
/// date serials as ISO strings.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => float_to_string(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::DateTime(serial) => serial_to_iso(serial.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR:{:?}", e),
    }
}

fn float_to_string(f: f64) -> String {
    // 2^53: beyond this, {:.0} would print digits the float cannot hold
    if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// Converts an Excel 1900-epoch date serial to an ISO string.
///
/// Serial 60 is the phantom 1900-02-29, so later serials shift back one
/// day. Date-only serials render as `YYYY-MM-DD`; a fractional part
/// appends the time component.
fn serial_to_iso(serial: f64) -> String {
    if serial < 0.0 {
        return serial.to_string();
    }

    let days = serial.floor() as i64;
    let secs = ((serial - serial.floor()) * 86_400.0).round() as i64;

    let base = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
    let adjusted = if days >= 60 { days - 1 } else { days };
    let date = base + Days::new(adjusted as u64);

    let secs_norm = ((secs % 86_400) + 86_400) % 86_400;
    if secs_norm == 0 {
        return date.format("%Y-%m-%d").to_string();
    }

    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs_norm as u32, 0).unwrap();
    NaiveDateTime::new(date, time)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Integral floats lose the trailing `.0` so quantities round-trip
    /// as the integers they were typed as.
    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(float_to_string(2.0), "2");
        assert_eq!(float_to_string(2.5), "2.5");
        assert_eq!(float_to_string(-3.0), "-3");
    }

    /// Known anchors of the 1900 serial system, including the phantom
    /// leap day.
    #[test]
    fn serial_conversion_matches_1900_epoch() {
        assert_eq!(serial_to_iso(1.0), "1900-01-01");
        assert_eq!(serial_to_iso(59.0), "1900-02-28");
        assert_eq!(serial_to_iso(61.0), "1900-03-01");
        assert_eq!(serial_to_iso(45366.0), "2024-03-15");
    }

    /// A fractional serial keeps its time-of-day component.
    #[test]
    fn serial_with_time_keeps_time_part() {
        assert_eq!(serial_to_iso(45366.5), "2024-03-15T12:00:00");
    }

    /// Non-date cell kinds stringify like a CSV export would.
    #[test]
    fn cells_stringify_like_csv() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("East".to_string())), "East");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Float(150.0)), "150");
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
    }
}
