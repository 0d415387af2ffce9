//! End-to-end pipeline tests: upload → inspect → filter → chart → export.

use tabdash::{
    apply, inspect, load, project, to_csv_bytes, CellValue, ChartData, ChartError, ChartKind,
    ChartRequest, ColumnType, FilterPredicate, ParseError,
};

const SAMPLE: &[u8] = b"a,b\n1,x\n2,y\n1,z\n";

#[test]
fn loader_dimensions_match_the_input() {
    let body = b"c1,c2,c3\n1,2,3\n4,5,6\n7,8,9\n0,1,2\n";
    let table = load(body).unwrap();
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column_count(), 3);
}

#[test]
fn missing_count_matches_the_literal_empty_cells() {
    let body = b"a,b,c\n,2,\n4,,6\n,,\n";
    let summary = inspect(&load(body).unwrap());
    assert_eq!(summary.missing_count, 6);
}

#[test]
fn every_offered_predicate_filters_consistently() {
    let table = load(b"city,temp\nOslo,3\nRome,21\nOslo,5\nRome,19\n").unwrap();
    let summary = inspect(&table);

    for (column, descriptor) in &summary.descriptors {
        for value in &descriptor.distinct_values {
            let view = apply(
                &table,
                &FilterPredicate {
                    column: column.clone(),
                    value: value.clone(),
                },
            );
            assert_eq!(view.column_names(), table.column_names());
            assert!(view.row_count() > 0, "{column}={value} came from the data");
            for cell in &view.column(column).unwrap().values {
                assert_eq!(cell, value);
            }
        }
    }
}

#[test]
fn filter_then_pie_on_the_filtered_view() {
    let table = load(SAMPLE).unwrap();
    let a = table.column("a").unwrap();
    assert_eq!(a.ty, ColumnType::Numeric);
    assert_eq!(
        a.values,
        vec![
            CellValue::Number(1.0),
            CellValue::Number(2.0),
            CellValue::Number(1.0),
        ]
    );
    assert_eq!(table.column("b").unwrap().ty, ColumnType::Text);

    let view = apply(
        &table,
        &FilterPredicate {
            column: "a".into(),
            value: CellValue::Number(1.0),
        },
    );
    assert_eq!(view.row_count(), 2);
    assert_eq!(
        view.column("b").unwrap().values,
        vec![CellValue::Text("x".into()), CellValue::Text("z".into())]
    );

    let data = project(
        &view,
        &ChartRequest {
            x_column: "a".into(),
            y_column: "a".into(),
            kind: ChartKind::Pie,
        },
    )
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
fn empty_upload_fails_to_parse() {
    assert!(matches!(load(b""), Err(ParseError::EmptyInput)));
}

#[test]
fn bar_chart_on_text_y_is_incompatible() {
    let view = load(SAMPLE).unwrap();
    let err = project(
        &view,
        &ChartRequest {
            x_column: "a".into(),
            y_column: "b".into(),
            kind: ChartKind::Bar,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::NonNumericY(col) if col == "b"));
}

#[test]
fn export_round_trips_through_the_loader() {
    let body = b"name,score,tag\nalice,9.5,red\nbob,,blue\ncarol,7,red\n";
    let table = load(body).unwrap();
    let reloaded = load(&to_csv_bytes(&table).unwrap()).unwrap();

    assert_eq!(reloaded.column_names(), table.column_names());
    assert_eq!(reloaded.row_count(), table.row_count());
    for (a, b) in table.columns.iter().zip(&reloaded.columns) {
        assert_eq!(a.values, b.values, "column {}", a.name);
    }
}

#[test]
fn filtered_view_exports_without_the_dropped_rows() {
    let table = load(SAMPLE).unwrap();
    let view = apply(
        &table,
        &FilterPredicate {
            column: "a".into(),
            value: CellValue::Number(1.0),
        },
    );
    let bytes = to_csv_bytes(&view).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n1,x\n1,z\n");
}

#[test]
fn chart_over_an_empty_view_is_valid_and_empty() {
    let table = load(SAMPLE).unwrap();
    let view = apply(
        &table,
        &FilterPredicate {
            column: "b".into(),
            value: CellValue::Text("nope".into()),
        },
    );
    assert!(view.is_empty());

    for kind in [ChartKind::Line, ChartKind::Pie, ChartKind::Bar] {
        let data = project(
            &view,
            &ChartRequest {
                x_column: "b".into(),
                y_column: "a".into(),
                kind,
            },
        )
        .unwrap();
        assert!(data.is_empty());
    }
}
