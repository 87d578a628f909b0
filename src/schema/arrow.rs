// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema, TimeUnit};
use std::{collections::HashMap, sync::Arc};

use super::types::{SemanticType, TableSchema};

pub const DECIMAL_PRECISION: u8 = 38;
pub const DECIMAL_SCALE: i8 = 4;

/// Field metadata key recording the semantic type when the physical type is ambiguous.
pub const SEMANTIC_TYPE_KEY: &str = "semantic_type";

/// Map a SemanticType into an Arrow DataType.
///
/// - Integer64         → Int64
/// - Utf8Text          → Utf8
/// - Boolean           → Boolean
/// - Float64           → Float64
/// - FixedPointDecimal → Decimal128(38, 4)
/// - TimestampNanos    → Timestamp(ns), naive
/// - CalendarDate      → Date32
/// - TimeOfDay         → Time64(µs)
/// - List, Set         → List<Int64>
/// - Mapping           → Map<Utf8, Int64>
pub fn map_to_arrow_type(ty: SemanticType) -> DataType {
    match ty {
        SemanticType::Integer64 => DataType::Int64,
        SemanticType::Utf8Text => DataType::Utf8,
        SemanticType::Boolean => DataType::Boolean,
        SemanticType::Float64 => DataType::Float64,
        SemanticType::FixedPointDecimal => {
            DataType::Decimal128(DECIMAL_PRECISION, DECIMAL_SCALE)
        }
        SemanticType::TimestampNanos => DataType::Timestamp(TimeUnit::Nanosecond, None),
        SemanticType::CalendarDate => DataType::Date32,
        SemanticType::TimeOfDay => DataType::Time64(TimeUnit::Microsecond),
        SemanticType::List | SemanticType::Set => list_item_type(),
        SemanticType::Mapping => map_entries_type(),
    }
}

fn list_item_type() -> DataType {
    DataType::List(Arc::new(ArrowField::new("item", DataType::Int64, true)))
}

// Matches the field names MapBuilder produces by default.
fn map_entries_type() -> DataType {
    let entries = ArrowField::new(
        "entries",
        DataType::Struct(
            vec![
                ArrowField::new("keys", DataType::Utf8, false),
                ArrowField::new("values", DataType::Int64, true),
            ]
            .into(),
        ),
        false,
    );
    DataType::Map(Arc::new(entries), false)
}

/// Arrow field for one column. Sets carry metadata since they share List's layout.
pub fn build_arrow_field(name: &str, ty: SemanticType) -> ArrowField {
    let field = ArrowField::new(name, map_to_arrow_type(ty), false);
    match ty {
        SemanticType::Set => field.with_metadata(HashMap::from([(
            SEMANTIC_TYPE_KEY.to_string(),
            ty.as_str().to_string(),
        )])),
        _ => field,
    }
}

/// Build an ArrowSchema (inside an Arc) from `(name, type)` pairs in column order.
pub fn build_arrow_schema<'a, I>(cols: I) -> Arc<ArrowSchema>
where
    I: IntoIterator<Item = (&'a str, SemanticType)>,
{
    let fields: Vec<ArrowField> = cols
        .into_iter()
        .map(|(name, ty)| build_arrow_field(name, ty))
        .collect();
    Arc::new(ArrowSchema::new(fields))
}

impl TableSchema {
    pub fn arrow_schema(&self) -> Arc<ArrowSchema> {
        build_arrow_schema(self.typed_columns())
    }
}
