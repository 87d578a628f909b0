// src/process/mod.rs
pub mod columns;
pub mod convert;
pub mod date_parser;
pub mod decimal;
pub mod records;
pub mod write;

pub use convert::{convert, CoercedBatch};
pub use records::{read_records, RawRecord};
pub use write::{read_parquet, write_parquet};

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::info;

use crate::{config::Config, error::ConvertError, schema};

/// Outcome of one file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub table: &'static str,
    pub rows: usize,
    pub bytes_written: u64,
}

/// Read delimited records for `table_name` from `reader` and coerce them.
pub fn convert_reader<R: Read>(
    table_name: &str,
    reader: R,
    config: &Config,
) -> Result<CoercedBatch, ConvertError> {
    // resolve first so an unknown table never touches the input
    schema::lookup(table_name)?;
    let records = read_records(reader, config)?;
    convert(table_name, &records)
}

/// Convert `input` (e.g. `lineitem.csv`) into Parquet at `output`.
///
/// The table is named by the input's base name. On any error no file is left at `output`.
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &Config,
) -> Result<ConversionSummary, ConvertError> {
    let table_name = schema::table_name_for_path(input)
        .ok_or_else(|| ConvertError::UnknownTable(input.display().to_string()))?;
    schema::lookup(table_name)?;

    let start = Instant::now();
    let file = File::open(input)?;
    let coerced = convert_reader(table_name, BufReader::new(file), config)?;
    let bytes_written = write_parquet(output, &coerced.batch, config)?;

    info!(
        table = coerced.table,
        rows = coerced.num_rows(),
        bytes = bytes_written,
        elapsed = ?start.elapsed(),
        "converted {} → {}",
        input.display(),
        output.display()
    );

    Ok(ConversionSummary {
        table: coerced.table,
        rows: coerced.num_rows(),
        bytes_written,
    })
}

/// `<base>.csv` → `<base>.parquet`, the pair the CLI works on.
pub fn io_paths(base: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{base}.csv")),
        PathBuf::from(format!("{base}.parquet")),
    )
}
