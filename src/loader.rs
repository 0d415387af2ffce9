use std::collections::BTreeSet;

use crate::error::ParseError;
use crate::model::{CellValue, Column, ColumnType, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an uploaded CSV byte stream into a [`Table`].
///
/// Layout: a header row with the column names, then one record per row.
/// Column types are inferred per-column across the whole file: a column is
/// [`ColumnType::Numeric`] when every non-missing cell parses as a number,
/// [`ColumnType::Text`] otherwise. Empty cells become [`CellValue::Missing`].
///
/// Fails with [`ParseError`] on: an empty body, non-UTF-8 bytes, duplicate
/// or all-blank header names, and records whose field count differs from the
/// header's.
pub fn load(bytes: &[u8]) -> Result<Table, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut reader = csv::Reader::from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(map_csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ParseError::EmptyHeader);
    }

    let mut seen = BTreeSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateColumn(name.clone()));
        }
    }

    // Collect raw cells column-wise; type inference needs whole columns.
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result.map_err(map_csv_error)?;
        for (idx, field) in record.iter().enumerate() {
            raw[idx].push(field.to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| build_column(name, cells))
        .collect();

    let table = Table { columns };
    log::debug!(
        "loaded table: {} rows x {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Infer the column type and convert its raw cells.
fn build_column(name: String, cells: Vec<String>) -> Column {
    let numeric = cells
        .iter()
        .filter(|c| !c.is_empty())
        .all(|c| c.trim().parse::<f64>().is_ok());

    let ty = if numeric {
        ColumnType::Numeric
    } else {
        ColumnType::Text
    };

    let values = cells
        .into_iter()
        .map(|cell| {
            if cell.is_empty() {
                CellValue::Missing
            } else if numeric {
                // parse cannot fail: checked for the whole column above
                CellValue::Number(cell.trim().parse().unwrap_or(f64::NAN))
            } else {
                CellValue::Text(cell)
            }
        })
        .collect();

    Column { name, ty, values }
}

/// Fold `csv::Error` into the upload error taxonomy.
fn map_csv_error(err: csv::Error) -> ParseError {
    if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) {
        return ParseError::Encoding;
    }
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return ParseError::RaggedRow {
            row: pos.as_ref().map_or(0, |p| p.record()),
            expected: *expected_len,
            found: *len,
        };
    }
    ParseError::Csv(err)
}
