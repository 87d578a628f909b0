use anyhow::{ensure, Context, Result};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use std::{env, path::PathBuf};
use tpch_parquet::{
    fixture::{write_fixture, FIXTURE_COLUMNS},
    process::read_parquet,
    Config,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Write the one-row type fixture (default `datatypes.parquet`), read it back
/// and print each column's type and value.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("datatypes.parquet"));
    let config = Config::from_env()?;

    let bytes = write_fixture(&path, &config)
        .with_context(|| format!("writing fixture to {}", path.display()))?;
    info!(bytes, "fixture written to {}", path.display());

    let batches = read_parquet(&path)
        .with_context(|| format!("reading back {}", path.display()))?;
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    ensure!(rows == 1, "expected a single fixture row, found {}", rows);
    ensure!(
        batches[0].num_columns() == FIXTURE_COLUMNS.len(),
        "expected {} columns, found {}",
        FIXTURE_COLUMNS.len(),
        batches[0].num_columns()
    );

    let batch = &batches[0];
    let options = FormatOptions::default();
    for (field, column) in batch.schema().fields().iter().zip(batch.columns()) {
        let formatter = ArrayFormatter::try_new(column.as_ref(), &options)?;
        println!(
            "{:<10} {:<40} {}",
            field.name(),
            field.data_type().to_string(),
            formatter.value(0)
        );
    }
    Ok(())
}
