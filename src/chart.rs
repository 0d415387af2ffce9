use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ChartError;
use crate::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Chart request
// ---------------------------------------------------------------------------

/// Which projection to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Pie,
    Bar,
}

/// Axis and kind selection made by the boundary layer, applied to a
/// (possibly filtered) view. The y column must be numeric for every kind;
/// the pie projection only uses the y column's value distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRequest {
    pub x_column: String,
    pub y_column: String,
    pub kind: ChartKind,
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// One pie slice: a distinct y value and how many rows carry it. The
/// consumer renders percentages as `count / total`, so fractions sum to 1
/// across the slice set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub value: CellValue,
    pub count: usize,
}

impl PieSlice {
    /// This slice's share of the whole, given the total row count.
    pub fn fraction(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 / total as f64
        }
    }
}

/// Kind-specific, render-ready projection of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartData {
    /// `(x, y)` pairs in the view's row order; duplicate x values pass
    /// through untouched.
    Line(Vec<(CellValue, f64)>),
    /// Slices ordered by descending count, ties broken by value.
    Pie(Vec<PieSlice>),
    /// Same shape as `Line`, intended for categorical x rendering; no
    /// aggregation across repeated x values.
    Bar(Vec<(CellValue, f64)>),
}

impl ChartData {
    /// Whether the projection holds no points at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Line(points) | ChartData::Bar(points) => points.is_empty(),
            ChartData::Pie(slices) => slices.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project a view into chart-ready data.
///
/// Validation order: both selected columns must exist in the view, then the
/// y column must be numeric. An empty view yields an empty projection for
/// any kind; that is a valid terminal state, not an error.
pub fn project(view: &Table, request: &ChartRequest) -> Result<ChartData, ChartError> {
    let x = view
        .column(&request.x_column)
        .ok_or_else(|| ChartError::InvalidSelection(request.x_column.clone()))?;
    let y = view
        .column(&request.y_column)
        .ok_or_else(|| ChartError::InvalidSelection(request.y_column.clone()))?;

    if !y.is_numeric() {
        return Err(ChartError::NonNumericY(request.y_column.clone()));
    }

    Ok(match request.kind {
        ChartKind::Line => ChartData::Line(xy_pairs(x, y)),
        ChartKind::Bar => ChartData::Bar(xy_pairs(x, y)),
        ChartKind::Pie => ChartData::Pie(value_counts(y)),
    })
}

/// Zip the x and y columns row by row, keeping the view's row order.
/// Rows without a numeric y cell are skipped (nothing to plot); a missing
/// x cell passes through as-is.
fn xy_pairs(x: &Column, y: &Column) -> Vec<(CellValue, f64)> {
    x.values
        .iter()
        .zip(&y.values)
        .filter_map(|(xv, yv)| yv.as_f64().map(|n| (xv.clone(), n)))
        .collect()
}

/// Occurrence counts of the column's non-missing values, ordered by
/// descending count then by value.
fn value_counts(column: &Column) -> Vec<PieSlice> {
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for value in column.values.iter().filter(|v| !v.is_missing()) {
        *counts.entry(value).or_default() += 1;
    }

    let mut slices: Vec<PieSlice> = counts
        .into_iter()
        .map(|(value, count)| PieSlice {
            value: value.clone(),
            count,
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    slices
}
