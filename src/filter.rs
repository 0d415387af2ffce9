use serde::Serialize;

use crate::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Filter predicate: one column, one value, exact equality
// ---------------------------------------------------------------------------

/// Equality predicate over one column. The boundary layer constructs these
/// from a [`ColumnDescriptor`](crate::model::ColumnDescriptor)'s
/// `distinct_values`, so the column exists and the value is a member by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterPredicate {
    pub column: String,
    pub value: CellValue,
}

/// Select the rows where `predicate.column`'s cell equals `predicate.value`.
///
/// Numbers compare numerically, text by exact string match, and missing
/// cells never match any concrete value. The view keeps the source's column
/// set, order, and inferred types; zero matching rows is valid output, not
/// an error. An unknown column also yields zero rows rather than failing.
pub fn apply(table: &Table, predicate: &FilterPredicate) -> Table {
    let keep: Vec<usize> = match table.column(&predicate.column) {
        Some(col) => col
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_missing() && **v == predicate.value)
            .map(|(i, _)| i)
            .collect(),
        None => Vec::new(),
    };

    let columns = table
        .columns
        .iter()
        .map(|col| Column {
            name: col.name.clone(),
            // the view carries the types inferred at load time
            ty: col.ty,
            values: keep.iter().map(|&i| col.values[i].clone()).collect(),
        })
        .collect();

    let view = Table { columns };
    log::debug!(
        "filter {}={}: {} of {} rows match",
        predicate.column,
        predicate.value,
        view.row_count(),
        table.row_count()
    );
    view
}
