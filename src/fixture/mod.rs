//! Single-row fixture covering every semantic type, used to check that each
//! type survives a Parquet write/read independently of any table schema.

use arrow::record_batch::RecordBatch;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::{collections::BTreeSet, path::Path};
use tracing::info;

use crate::{
    config::Config,
    error::ConvertError,
    process::{columns::ColumnBuilder, write},
    schema::{build_arrow_schema, SemanticType},
};

/// One literal per semantic type.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRow {
    pub integer: i64,
    pub text: String,
    pub boolean: bool,
    pub float: f64,
    pub decimal: BigDecimal,
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub list: Vec<i64>,
    pub set: BTreeSet<i64>,
    pub dict: Vec<(String, i64)>,
}

/// Column names and types of the fixture file, in output order.
pub const FIXTURE_COLUMNS: [(&str, SemanticType); 11] = [
    ("integer", SemanticType::Integer64),
    ("text", SemanticType::Utf8Text),
    ("boolean", SemanticType::Boolean),
    ("float", SemanticType::Float64),
    ("decimal", SemanticType::FixedPointDecimal),
    ("timestamp", SemanticType::TimestampNanos),
    ("date", SemanticType::CalendarDate),
    ("time", SemanticType::TimeOfDay),
    ("list", SemanticType::List),
    ("set", SemanticType::Set),
    ("dict", SemanticType::Mapping),
];

pub fn generate_fixture() -> FixtureRow {
    let timestamp = NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    FixtureRow {
        integer: 1,
        text: "a".to_string(),
        boolean: true,
        float: 1.0,
        decimal: BigDecimal::from(1),
        timestamp,
        date: timestamp.date(),
        time: timestamp.time(),
        list: vec![1, 2, 3],
        set: BTreeSet::from([1, 2, 3]),
        dict: vec![("a".to_string(), 1), ("b".to_string(), 2)],
    }
}

impl FixtureRow {
    pub fn to_record_batch(&self) -> Result<RecordBatch, ConvertError> {
        let mut columns = Vec::with_capacity(FIXTURE_COLUMNS.len());
        for (name, ty) in FIXTURE_COLUMNS {
            let mut b = ColumnBuilder::new(ty, 1)?;
            self.append_to(name, ty, &mut b)?;
            columns.push(b.finish());
        }
        let schema = build_arrow_schema(FIXTURE_COLUMNS);
        Ok(RecordBatch::try_new(schema, columns)?)
    }

    fn append_to(
        &self,
        name: &str,
        ty: SemanticType,
        b: &mut ColumnBuilder,
    ) -> Result<(), ConvertError> {
        let text = match ty {
            SemanticType::Integer64 => self.integer.to_string(),
            SemanticType::Utf8Text => self.text.clone(),
            SemanticType::Boolean => self.boolean.to_string(),
            SemanticType::Float64 => self.float.to_string(),
            SemanticType::FixedPointDecimal => self.decimal.to_string(),
            SemanticType::TimestampNanos => iso(self.timestamp),
            SemanticType::CalendarDate => self.date.format("%Y-%m-%d").to_string(),
            // time-of-day goes through the timestamp grammar too, so anchor it to a date
            SemanticType::TimeOfDay => iso(NaiveDate::default().and_time(self.time)),
            SemanticType::List => {
                b.append_list(&self.list)?;
                return Ok(());
            }
            SemanticType::Set => {
                b.append_list(&self.set.iter().copied().collect::<Vec<_>>())?;
                return Ok(());
            }
            SemanticType::Mapping => {
                b.append_map(self.dict.iter().map(|(k, v)| (k.as_str(), *v)))?;
                return Ok(());
            }
        };
        b.append_str(&text).ok_or_else(|| ConvertError::TypeCoercion {
            table: "fixture".to_string(),
            column: name.to_string(),
            row: 0,
            raw: text.clone(),
            target: ty,
        })
    }
}

fn iso(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Generate the fixture row and write it to `path`. Returns the file size.
pub fn write_fixture(path: &Path, config: &Config) -> Result<u64, ConvertError> {
    let batch = generate_fixture().to_record_batch()?;
    let bytes = write::write_parquet(path, &batch, config)?;
    info!(path = %path.display(), columns = batch.num_columns(), "wrote type fixture");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::{
        array::{Array, AsArray, MapArray},
        datatypes::{
            DataType, Date32Type, Decimal128Type, Float64Type, Int64Type, Time64MicrosecondType,
            TimestampNanosecondType,
        },
    };
    use tempfile::tempdir;

    #[test]
    fn canonical_values() {
        let row = generate_fixture();
        assert_eq!(row.timestamp.to_string(), "2021-01-01 00:00:00");
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(row.time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(row.list, vec![1, 2, 3]);
        assert_eq!(row.dict.len(), 2);
    }

    #[test]
    fn covers_every_semantic_type_without_nulls() {
        let batch = generate_fixture().to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 1);
        for ty in SemanticType::ALL {
            let idx = FIXTURE_COLUMNS
                .iter()
                .position(|(_, t)| *t == ty)
                .unwrap_or_else(|| panic!("no fixture column for {ty}"));
            assert_eq!(batch.column(idx).null_count(), 0, "{ty} column has nulls");
        }
    }

    #[test]
    fn parquet_round_trip_preserves_every_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datatypes.parquet");
        let written = generate_fixture().to_record_batch().unwrap();
        write_fixture(&path, &Config::default()).unwrap();

        let back = write::read_parquet(&path).unwrap();
        assert_eq!(back.len(), 1);
        let batch = &back[0];
        assert_eq!(batch.num_rows(), 1);

        let (read_schema, written_schema) = (batch.schema(), written.schema());
        for (read, expected) in read_schema.fields().iter().zip(written_schema.fields()) {
            assert_eq!(read.name(), expected.name());
            assert!(
                matches!(
                    (read.data_type(), expected.data_type()),
                    (DataType::Map(..), DataType::Map(..))
                ) || read.data_type() == expected.data_type(),
                "{} changed type",
                read.name()
            );
        }

        let col = |name: &str| batch.column_by_name(name).unwrap().clone();
        assert_eq!(col("integer").as_primitive::<Int64Type>().value(0), 1);
        assert_eq!(col("text").as_string::<i32>().value(0), "a");
        assert!(col("boolean").as_boolean().value(0));
        assert_eq!(col("float").as_primitive::<Float64Type>().value(0), 1.0);
        assert_eq!(
            col("decimal").as_primitive::<Decimal128Type>().value_as_string(0),
            "1.0000"
        );
        assert_eq!(
            col("timestamp")
                .as_primitive::<TimestampNanosecondType>()
                .value(0),
            1_609_459_200_000_000_000
        );
        assert_eq!(col("date").as_primitive::<Date32Type>().value(0), 18_628);
        assert_eq!(col("time").as_primitive::<Time64MicrosecondType>().value(0), 0);

        for name in ["list", "set"] {
            let list = col(name);
            let items = list.as_list::<i32>().value(0);
            assert_eq!(
                items.as_primitive::<Int64Type>().values().to_vec(),
                vec![1, 2, 3]
            );
        }
        assert_eq!(
            read_schema
                .field_with_name("set")
                .unwrap()
                .metadata()
                .get("semantic_type")
                .map(String::as_str),
            Some("set")
        );

        let dict = col("dict");
        let map = dict.as_any().downcast_ref::<MapArray>().unwrap();
        let keys = map.keys().as_string::<i32>();
        let values = map.values().as_primitive::<Int64Type>();
        assert_eq!((keys.value(0), values.value(0)), ("a", 1));
        assert_eq!((keys.value(1), values.value(1)), ("b", 2));
    }
}
