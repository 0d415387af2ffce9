use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Using `BTreeSet` for distinct-value indices downstream so `CellValue`
/// must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    /// Absent cell; distinct from any valid scalar. Serializes as `null`.
    Missing,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Number(_) => 1,
                Text(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Number(n) => n.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this cell is the missing-value marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// ColumnType – per-column classification, inferred once at load time
// ---------------------------------------------------------------------------

/// Column classification computed by the loader and carried on the column
/// from then on; never re-inferred at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    /// Every non-missing cell parses as a number.
    Numeric,
    /// Anything else.
    Text,
}

// ---------------------------------------------------------------------------
// Column / Table – the in-memory dataset
// ---------------------------------------------------------------------------

/// One named column of uniformly-typed cells.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        self.ty == ColumnType::Numeric
    }

    /// The set of unique non-missing values observed in this column.
    pub fn distinct_values(&self) -> BTreeSet<CellValue> {
        self.values
            .iter()
            .filter(|v| !v.is_missing())
            .cloned()
            .collect()
    }
}

/// The full parsed dataset: an ordered sequence of equal-length columns with
/// unique names (both invariants enforced by the loader).
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of records (columns are equal-length, so any one will do).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds zero records.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

// ---------------------------------------------------------------------------
// ColumnDescriptor – derived per-column metadata for the boundary layer
// ---------------------------------------------------------------------------

/// What the boundary layer needs to populate selection widgets: the column's
/// value domain and whether it can serve as a chart y-axis. Recomputed from
/// the table whenever it changes, never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub distinct_values: BTreeSet<CellValue>,
    pub is_numeric: bool,
}

impl ColumnDescriptor {
    pub fn from_column(column: &Column) -> Self {
        ColumnDescriptor {
            name: column.name.clone(),
            distinct_values: column.distinct_values(),
            is_numeric: column.is_numeric(),
        }
    }
}
