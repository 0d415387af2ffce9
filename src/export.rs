use crate::error::ExportError;
use crate::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Re-serialize a table to CSV bytes: the header row, then one record per
/// row, with the same delimiter and quoting conventions the loader accepts
/// and no index column. Missing cells become empty fields; numbers print in
/// `f64`'s shortest round-trip form, so `load(to_csv_bytes(t))` reproduces
/// `t`'s column names, row order, and cell values.
///
/// The returned buffer is owned by the caller; nothing is shared or cached.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.columns.iter().map(|c| c.name.as_str()))?;

    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|col| field_for(&col.values[row]))
            .collect();
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Finish(e.to_string()))
}

fn field_for(value: &CellValue) -> String {
    match value {
        CellValue::Number(n) => n.to_string(),
        CellValue::Text(s) => s.clone(),
        CellValue::Missing => String::new(),
    }
}
