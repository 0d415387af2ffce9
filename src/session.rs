use crate::chart::{ChartData, ChartRequest};
use crate::error::{ChartError, ParseError};
use crate::filter::{apply, FilterPredicate};
use crate::inspect::{inspect, TableSummary};
use crate::loader::load;
use crate::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The boundary layer's handle on the currently loaded table, independent of
/// any rendering. At most one table is live per session; a new upload
/// replaces it wholesale together with its summary, so no reader can observe
/// a half-updated table. Everything else is recomputed on demand.
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded table (None until the first successful upload).
    table: Option<Table>,

    /// Schema summary, recomputed whenever the table is replaced.
    summary: Option<TableSummary>,

    /// Current filter selection, if any.
    predicate: Option<FilterPredicate>,
}

impl Session {
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn summary(&self) -> Option<&TableSummary> {
        self.summary.as_ref()
    }

    pub fn predicate(&self) -> Option<&FilterPredicate> {
        self.predicate.as_ref()
    }

    /// Parse an upload body and make it the session's table.
    /// On failure the previous table (if any) stays untouched.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        let table = load(bytes)?;
        self.set_table(table);
        Ok(())
    }

    /// Replace the current table wholesale: recompute the summary and drop
    /// any filter that referred to the old table.
    pub fn set_table(&mut self, table: Table) {
        log::info!(
            "new table: {} rows, {} columns",
            table.row_count(),
            table.column_count()
        );
        self.summary = Some(inspect(&table));
        self.predicate = None;
        self.table = Some(table);
    }

    /// Install an equality filter. Only column/value pairs the summary's
    /// descriptors actually offer are accepted, which is how the widget
    /// layer populates its choices; returns whether the filter was set.
    pub fn set_filter(&mut self, column: &str, value: CellValue) -> bool {
        let offered = self
            .summary
            .as_ref()
            .and_then(|s| s.descriptors.get(column))
            .is_some_and(|d| d.distinct_values.contains(&value));

        if offered {
            self.predicate = Some(FilterPredicate {
                column: column.to_string(),
                value,
            });
        }
        offered
    }

    /// Drop the current filter, if any.
    pub fn clear_filter(&mut self) {
        self.predicate = None;
    }

    /// The current filtered view: the predicate applied to the table, or a
    /// copy of the whole table when no filter is set. None before the first
    /// upload. Recomputed on every call; views are never cached.
    pub fn filtered_view(&self) -> Option<Table> {
        let table = self.table.as_ref()?;
        Some(match &self.predicate {
            Some(p) => apply(table, p),
            None => table.clone(),
        })
    }

    /// Project the current filtered view into chart data. Before the first
    /// upload there are no columns, so any selection is invalid.
    pub fn chart(&self, request: &ChartRequest) -> Result<ChartData, ChartError> {
        match self.filtered_view() {
            Some(view) => crate::chart::project(&view, request),
            None => Err(ChartError::InvalidSelection(request.x_column.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;

    #[test]
    fn upload_replaces_table_and_summary() {
        let mut session = Session::default();
        session.load_bytes(b"a,b\n1,x\n2,y\n").unwrap();
        assert_eq!(session.summary().unwrap().row_count, 2);

        session.load_bytes(b"c\n5\n6\n7\n").unwrap();
        let summary = session.summary().unwrap();
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.column_count, 1);
        assert!(summary.descriptors.contains_key("c"));
        assert!(!summary.descriptors.contains_key("a"));
    }

    #[test]
    fn failed_upload_keeps_the_previous_table() {
        let mut session = Session::default();
        session.load_bytes(b"a\n1\n").unwrap();
        assert!(session.load_bytes(b"").is_err());
        assert_eq!(session.table().unwrap().row_count(), 1);
    }

    #[test]
    fn filter_must_come_from_the_offered_domain() {
        let mut session = Session::default();
        session.load_bytes(b"a,b\n1,x\n2,y\n").unwrap();

        assert!(session.set_filter("a", CellValue::Number(1.0)));
        assert_eq!(session.filtered_view().unwrap().row_count(), 1);

        // value not present in the column
        assert!(!session.set_filter("a", CellValue::Number(9.0)));
        // unknown column
        assert!(!session.set_filter("zzz", CellValue::Number(1.0)));
        // the earlier valid filter is still in place
        assert_eq!(session.predicate().unwrap().value, CellValue::Number(1.0));
    }

    #[test]
    fn new_upload_drops_the_old_filter() {
        let mut session = Session::default();
        session.load_bytes(b"a\n1\n2\n").unwrap();
        assert!(session.set_filter("a", CellValue::Number(1.0)));
        session.load_bytes(b"a\n3\n4\n").unwrap();
        assert!(session.predicate().is_none());
        assert_eq!(session.filtered_view().unwrap().row_count(), 2);
    }

    #[test]
    fn chart_runs_over_the_filtered_view() {
        let mut session = Session::default();
        session.load_bytes(b"a,b\n1,x\n2,y\n1,z\n").unwrap();
        assert!(session.set_filter("a", CellValue::Number(1.0)));

        let data = session
            .chart(&ChartRequest {
                x_column: "a".into(),
                y_column: "a".into(),
                kind: ChartKind::Pie,
            })
            .unwrap();
        match data {
            ChartData::Pie(slices) => {
                assert_eq!(slices.len(), 1);
                assert_eq!(slices[0].value, CellValue::Number(1.0));
                assert_eq!(slices[0].count, 2);
            }
            other => panic!("expected pie data, got {other:?}"),
        }
    }

    #[test]
    fn chart_before_upload_is_an_invalid_selection() {
        let session = Session::default();
        let err = session
            .chart(&ChartRequest {
                x_column: "a".into(),
                y_column: "a".into(),
                kind: ChartKind::Line,
            })
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidSelection(_)));
    }
}
