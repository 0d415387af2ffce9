use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{ColumnDescriptor, Table};

// ---------------------------------------------------------------------------
// Summary structures
// ---------------------------------------------------------------------------

/// Descriptive statistics for one numeric column, over its non-missing
/// values. Mirrors the classic describe() block: count, mean, std, min,
/// quartiles, max.
///
/// `std` is the *sample* standard deviation (ddof = 1); it is `NaN` when
/// fewer than two values are present. Quartiles use linear interpolation on
/// the sorted values (index `p * (n - 1)`).
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Everything the boundary layer renders after an upload: key metrics,
/// per-numeric-column statistics, and per-column descriptors for populating
/// filter and axis selection widgets.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub row_count: usize,
    pub column_count: usize,
    /// Total missing-value markers across all cells.
    pub missing_count: usize,
    /// Statistics per numeric column; text columns are excluded, as are
    /// numeric columns with zero non-missing values.
    pub stats: BTreeMap<String, ColumnStats>,
    pub descriptors: BTreeMap<String, ColumnDescriptor>,
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Derive the schema summary for a loaded table. Pure function; recomputed
/// whenever the table is replaced.
pub fn inspect(table: &Table) -> TableSummary {
    let mut missing_count = 0;
    let mut stats = BTreeMap::new();
    let mut descriptors = BTreeMap::new();

    for column in &table.columns {
        missing_count += column.values.iter().filter(|v| v.is_missing()).count();

        if column.is_numeric() {
            let values: Vec<f64> = column.values.iter().filter_map(|v| v.as_f64()).collect();
            if let Some(s) = column_stats(&values) {
                stats.insert(column.name.clone(), s);
            }
        }

        descriptors.insert(column.name.clone(), ColumnDescriptor::from_column(column));
    }

    TableSummary {
        row_count: table.row_count(),
        column_count: table.column_count(),
        missing_count,
        stats,
        descriptors,
    }
}

/// Compute the describe() block for one column's non-missing values.
/// Returns `None` when there is nothing to describe.
fn column_stats(values: &[f64]) -> Option<ColumnStats> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let std = if count < 2 {
        f64::NAN
    } else {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(ColumnStats {
        count,
        mean,
        std,
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Linearly-interpolated quantile of an already-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
