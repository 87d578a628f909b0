use arrow::{
    array::{
        ArrayRef, BooleanBuilder, Date32Builder, Decimal128Builder, Float64Builder, Int64Builder,
        ListBuilder, MapBuilder, StringBuilder, Time64MicrosecondBuilder,
        TimestampNanosecondBuilder,
    },
    error::ArrowError,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use crate::{
    process::{date_parser, decimal},
    schema::{
        arrow::{DECIMAL_PRECISION, DECIMAL_SCALE},
        SemanticType,
    },
};

/// Typed Arrow builder for one output column.
pub enum ColumnBuilder {
    Int(Int64Builder),
    Text(StringBuilder),
    Bool(BooleanBuilder),
    Float(Float64Builder),
    Decimal(Decimal128Builder),
    Timestamp(TimestampNanosecondBuilder),
    Date(Date32Builder),
    Time(Time64MicrosecondBuilder),
    /// Lists and sets share a layout; sets are deduplicated and sorted on append.
    List {
        builder: ListBuilder<Int64Builder>,
        distinct: bool,
    },
    Map(MapBuilder<StringBuilder, Int64Builder>),
}

impl ColumnBuilder {
    pub fn new(ty: SemanticType, capacity: usize) -> Result<Self, ArrowError> {
        Ok(match ty {
            SemanticType::Integer64 => Self::Int(Int64Builder::with_capacity(capacity)),
            SemanticType::Utf8Text => {
                Self::Text(StringBuilder::with_capacity(capacity, capacity * 16))
            }
            SemanticType::Boolean => Self::Bool(BooleanBuilder::with_capacity(capacity)),
            SemanticType::Float64 => Self::Float(Float64Builder::with_capacity(capacity)),
            SemanticType::FixedPointDecimal => Self::Decimal(
                Decimal128Builder::with_capacity(capacity)
                    .with_precision_and_scale(DECIMAL_PRECISION, DECIMAL_SCALE)?,
            ),
            SemanticType::TimestampNanos => {
                Self::Timestamp(TimestampNanosecondBuilder::with_capacity(capacity))
            }
            SemanticType::CalendarDate => Self::Date(Date32Builder::with_capacity(capacity)),
            SemanticType::TimeOfDay => Self::Time(Time64MicrosecondBuilder::with_capacity(capacity)),
            SemanticType::List | SemanticType::Set => Self::List {
                builder: ListBuilder::with_capacity(Int64Builder::new(), capacity),
                distinct: ty == SemanticType::Set,
            },
            SemanticType::Mapping => Self::Map(MapBuilder::with_capacity(
                None,
                StringBuilder::new(),
                Int64Builder::new(),
                capacity,
            )),
        })
    }

    /// Parse `raw` and append it. `None` if the text is not a valid literal for this column.
    pub fn append_str(&mut self, raw: &str) -> Option<()> {
        match self {
            Self::Int(b) => b.append_value(raw.trim().parse::<i64>().ok()?),
            Self::Text(b) => b.append_value(raw),
            Self::Bool(b) => b.append_value(parse_bool(raw)?),
            Self::Float(b) => b.append_value(raw.trim().parse::<f64>().ok()?),
            Self::Decimal(b) => b.append_value(decimal::parse_quantized(raw)?),
            Self::Timestamp(b) => b.append_value(date_parser::parse_timestamp_nanos(raw)?),
            Self::Date(b) => {
                b.append_value(date_parser::date_to_days(date_parser::parse_date(raw)?))
            }
            Self::Time(b) => {
                b.append_value(date_parser::time_to_micros(date_parser::parse_time(raw)?))
            }
            Self::List { .. } => {
                let items: Vec<i64> = serde_json::from_str(raw).ok()?;
                self.append_list(&items).ok()?;
            }
            Self::Map(_) => {
                let entries: BTreeMap<String, i64> = serde_json::from_str(raw).ok()?;
                self.append_map(entries.iter().map(|(k, v)| (k.as_str(), *v))).ok()?;
            }
        }
        Some(())
    }

    /// Append one list (or set) value.
    pub fn append_list(&mut self, items: &[i64]) -> Result<(), ArrowError> {
        let (builder, distinct) = match self {
            Self::List { builder, distinct } => (builder, *distinct),
            other => return Err(other.wrong_column("list")),
        };
        if distinct {
            let unique: BTreeSet<i64> = items.iter().copied().collect();
            builder.values().extend(unique.into_iter().map(Some));
        } else {
            builder.values().append_slice(items);
        }
        builder.append(true);
        Ok(())
    }

    /// Append one mapping value.
    pub fn append_map<'a, I>(&mut self, entries: I) -> Result<(), ArrowError>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let b = match self {
            Self::Map(b) => b,
            other => return Err(other.wrong_column("map")),
        };
        for (k, v) in entries {
            b.keys().append_value(k);
            b.values().append_value(v);
        }
        b.append(true)
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int64",
            Self::Text(_) => "string",
            Self::Bool(_) => "bool",
            Self::Float(_) => "float64",
            Self::Decimal(_) => "decimal",
            Self::Timestamp(_) => "timestamp[ns]",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::List { distinct: false, .. } => "list",
            Self::List { distinct: true, .. } => "set",
            Self::Map(_) => "map",
        }
    }

    fn wrong_column(&self, wanted: &str) -> ArrowError {
        ArrowError::InvalidArgumentError(format!(
            "cannot append {wanted} value to {} column",
            self.kind()
        ))
    }

    pub fn finish(&mut self) -> ArrayRef {
        match self {
            Self::Int(b) => Arc::new(b.finish()),
            Self::Text(b) => Arc::new(b.finish()),
            Self::Bool(b) => Arc::new(b.finish()),
            Self::Float(b) => Arc::new(b.finish()),
            Self::Decimal(b) => Arc::new(b.finish()),
            Self::Timestamp(b) => Arc::new(b.finish()),
            Self::Date(b) => Arc::new(b.finish()),
            Self::Time(b) => Arc::new(b.finish()),
            Self::List { builder, .. } => Arc::new(builder.finish()),
            Self::Map(b) => Arc::new(b.finish()),
        }
    }
}

/// `true/false`, `t/f`, `yes/no`, `y/n` and `1/0`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
