use crate::schema::SemanticType;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("no schema registered for table '{0}'")]
    UnknownTable(String),

    #[error("table '{table}' row {row}: expected {expected} fields, found {actual}")]
    SchemaMismatch {
        table: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("table '{table}' row {row} column '{column}': cannot parse {raw:?} as {target}")]
    TypeCoercion {
        table: String,
        column: String,
        row: usize,
        raw: String,
        target: SemanticType,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Stable name of the error kind, for reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::UnknownTable(_) => "UnknownTableError",
            ConvertError::SchemaMismatch { .. } => "SchemaMismatchError",
            ConvertError::TypeCoercion { .. } => "TypeCoercionError",
            ConvertError::Csv(_) => "CsvError",
            ConvertError::Arrow(_) => "ArrowError",
            ConvertError::Parquet(_) => "ParquetError",
            ConvertError::Io(_) => "IoError",
        }
    }
}
