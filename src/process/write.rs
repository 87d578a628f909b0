use arrow::record_batch::RecordBatch;
use parquet::arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter};
use std::{
    fs::{self, File},
    path::Path,
};
use tracing::debug;

use crate::{config::Config, error::ConvertError};

/// Write `batch` to `path` as Parquet.
///
/// Goes through `<path>.tmp` and a rename, so a failed write never leaves a
/// partial file under the final name. Returns the size of the written file.
pub fn write_parquet(
    path: &Path,
    batch: &RecordBatch,
    config: &Config,
) -> Result<u64, ConvertError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    if let Err(e) = write_file(tmp_path, batch, config) {
        let _ = fs::remove_file(tmp_path);
        return Err(e);
    }

    let file_size = fs::metadata(tmp_path)?.len();
    fs::rename(tmp_path, path)?;

    debug!(
        path = %path.display(),
        rows = batch.num_rows(),
        bytes = file_size,
        "wrote parquet"
    );
    Ok(file_size)
}

fn write_file(path: &Path, batch: &RecordBatch, config: &Config) -> Result<(), ConvertError> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(config.writer_properties()))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Read every record batch back out of a Parquet file.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, ConvertError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{convert, records::RawRecord};
    use arrow::{array::AsArray, datatypes::Decimal128Type};
    use parquet::basic::Compression;
    use tempfile::tempdir;

    #[test]
    fn converted_table_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partsupp.parquet");
        let records = [
            RawRecord::from_line("1|2|3325|771.64|final theodolites", '|'),
            RawRecord::from_line("1|25002|8076|993.49995|carefully ironic", '|'),
        ];
        let out = convert("partsupp", &records).unwrap();

        for compression in [Compression::UNCOMPRESSED, Compression::SNAPPY] {
            let cfg = Config {
                compression,
                ..Config::default()
            };
            let bytes = write_parquet(&path, &out.batch, &cfg).unwrap();
            assert!(bytes > 0);
            assert!(!dir.path().join("partsupp.parquet.tmp").exists());

            let back = read_parquet(&path).unwrap();
            assert_eq!(back.len(), 1);
            let (read_schema, written_schema) = (back[0].schema(), out.batch.schema());
            for (read, written) in read_schema.fields().iter().zip(written_schema.fields()) {
                assert_eq!(read.name(), written.name());
                assert_eq!(read.data_type(), written.data_type());
            }
            let cost = back[0].column(3).as_primitive::<Decimal128Type>();
            assert_eq!(cost.value_as_string(0), "771.6400");
            assert_eq!(cost.value_as_string(1), "993.5000");
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_parquet(&dir.path().join("nope.parquet")).unwrap_err();
        assert_eq!(err.kind(), "IoError");
    }
}
