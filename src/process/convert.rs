use arrow::record_batch::RecordBatch;
use tracing::debug;

use crate::{
    error::ConvertError,
    process::{columns::ColumnBuilder, records::RawRecord},
    schema::{self, TableSchema},
};

/// Coerced columns for one table, in the schema's declared order.
#[derive(Debug, Clone)]
pub struct CoercedBatch {
    pub table: &'static str,
    pub batch: RecordBatch,
}

impl CoercedBatch {
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }
}

/// Convert untyped records for `table_name` into typed Arrow columns.
///
/// Fails on the first record with the wrong field count or the first field
/// that does not parse as its column's type; nothing is produced in that case.
pub fn convert(table_name: &str, records: &[RawRecord]) -> Result<CoercedBatch, ConvertError> {
    let schema = schema::lookup(table_name)?;
    let batch = coerce_records(schema, records)?;
    debug!(
        table = schema.name,
        rows = batch.num_rows(),
        "coerced records"
    );
    Ok(CoercedBatch {
        table: schema.name,
        batch,
    })
}

fn coerce_records(schema: &TableSchema, records: &[RawRecord]) -> Result<RecordBatch, ConvertError> {
    let typed: Vec<_> = schema.typed_columns().collect();

    let mut builders = typed
        .iter()
        .map(|(_, ty)| ColumnBuilder::new(*ty, records.len()))
        .collect::<Result<Vec<_>, _>>()?;

    for (row, record) in records.iter().enumerate() {
        if record.len() != typed.len() {
            return Err(ConvertError::SchemaMismatch {
                table: schema.name.to_string(),
                row,
                expected: typed.len(),
                actual: record.len(),
            });
        }

        for ((raw, (column, ty)), builder) in
            record.fields().iter().zip(&typed).zip(builders.iter_mut())
        {
            if builder.append_str(raw).is_none() {
                return Err(ConvertError::TypeCoercion {
                    table: schema.name.to_string(),
                    column: column.to_string(),
                    row,
                    raw: raw.clone(),
                    target: *ty,
                });
            }
        }
    }

    let columns = builders.iter_mut().map(ColumnBuilder::finish).collect();
    Ok(RecordBatch::try_new(schema.arrow_schema(), columns)?)
}
