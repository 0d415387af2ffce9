use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use tabdash::{CellValue, ChartKind, ChartRequest, ColumnType, Session};

// ---------------------------------------------------------------------------
// Headless driver for the dashboard core
// ---------------------------------------------------------------------------

/// Load a CSV, print its summary, optionally filter / chart / export.
/// Stands in for the interactive boundary layer.
///
/// ```text
/// tabdash data.csv
/// tabdash data.csv --filter city=Oslo
/// tabdash data.csv --filter city=Oslo --chart pie,temp,temp
/// tabdash data.csv --filter city=Oslo --export filtered_data.csv
/// ```
struct Args {
    input: PathBuf,
    filter: Option<(String, String)>,
    chart: Option<(ChartKind, String, String)>,
    export: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            bail!("usage: tabdash <file.csv> [--filter COL=VALUE] [--chart KIND,X,Y] [--export OUT.csv]")
        }
    };

    let mut filter = None;
    let mut chart = None;
    let mut export = None;

    while let Some(flag) = args.next() {
        let value = args
            .next()
            .with_context(|| format!("{flag} needs an argument"))?;
        match flag.as_str() {
            "--filter" => {
                let (col, val) = value
                    .split_once('=')
                    .context("--filter expects COL=VALUE")?;
                filter = Some((col.to_string(), val.to_string()));
            }
            "--chart" => {
                let mut parts = value.splitn(3, ',');
                let kind = match parts.next().unwrap_or("") {
                    "line" => ChartKind::Line,
                    "pie" => ChartKind::Pie,
                    "bar" => ChartKind::Bar,
                    other => bail!("unknown chart kind '{other}' (line|pie|bar)"),
                };
                let x = parts.next().context("--chart expects KIND,X,Y")?;
                let y = parts.next().context("--chart expects KIND,X,Y")?;
                chart = Some((kind, x.to_string(), y.to_string()));
            }
            "--export" => export = Some(PathBuf::from(value)),
            other => bail!("unknown flag '{other}'"),
        }
    }

    Ok(Args {
        input,
        filter,
        chart,
        export,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let bytes = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut session = Session::default();
    session.load_bytes(&bytes).context("parsing uploaded CSV")?;

    let summary = session.summary().context("no summary after load")?;
    println!("{}", serde_json::to_string_pretty(summary)?);

    if let Some((column, raw)) = &args.filter {
        // Interpret the raw value with the column's inferred type, the way
        // a widget layer offers typed choices.
        let value = match session.table().and_then(|t| t.column(column)) {
            Some(col) if col.ty == ColumnType::Numeric => {
                CellValue::Number(raw.parse().with_context(|| {
                    format!("column '{column}' is numeric but '{raw}' is not")
                })?)
            }
            _ => CellValue::Text(raw.clone()),
        };
        if !session.set_filter(column, value) {
            bail!("filter {column}={raw} does not match any offered value");
        }
    }

    let view = session.filtered_view().context("no table loaded")?;
    println!(
        "filtered view: {} of {} rows",
        view.row_count(),
        session.table().map_or(0, |t| t.row_count())
    );

    if let Some((kind, x, y)) = &args.chart {
        let data = session.chart(&ChartRequest {
            x_column: x.clone(),
            y_column: y.clone(),
            kind: *kind,
        })?;
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    if let Some(out) = &args.export {
        let bytes = tabdash::to_csv_bytes(&view)?;
        fs::write(out, &bytes).with_context(|| format!("writing {}", out.display()))?;
        log::info!("exported {} bytes to {}", bytes.len(), out.display());
    }

    Ok(())
}
