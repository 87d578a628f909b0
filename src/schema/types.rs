// src/schema/types.rs

use serde::Serialize;
use std::{collections::HashMap, fmt};

/// Target type a text field is coerced into.
#[derive(Debug, Serialize, PartialEq, Clone, Copy, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Integer64,
    Utf8Text,
    Boolean,
    Float64,
    /// Exact decimal, always stored with four fractional digits.
    FixedPointDecimal,
    TimestampNanos,
    CalendarDate,
    TimeOfDay,
    List,
    Set,
    Mapping,
}

impl SemanticType {
    pub const ALL: [SemanticType; 11] = [
        SemanticType::Integer64,
        SemanticType::Utf8Text,
        SemanticType::Boolean,
        SemanticType::Float64,
        SemanticType::FixedPointDecimal,
        SemanticType::TimestampNanos,
        SemanticType::CalendarDate,
        SemanticType::TimeOfDay,
        SemanticType::List,
        SemanticType::Set,
        SemanticType::Mapping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Integer64 => "int64",
            SemanticType::Utf8Text => "string",
            SemanticType::Boolean => "bool",
            SemanticType::Float64 => "float64",
            SemanticType::FixedPointDecimal => "decimal",
            SemanticType::TimestampNanos => "timestamp[ns]",
            SemanticType::CalendarDate => "date",
            SemanticType::TimeOfDay => "time",
            SemanticType::List => "list",
            SemanticType::Set => "set",
            SemanticType::Mapping => "map",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered table: physical column order plus the type of every column.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TableSchema {
    pub name: &'static str,
    columns: Vec<&'static str>,
    types: HashMap<&'static str, SemanticType>,
}

impl TableSchema {
    /// Build from `(column, type)` pairs given in physical order.
    pub fn from_pairs(name: &'static str, pairs: &[(&'static str, SemanticType)]) -> Self {
        Self {
            name,
            columns: pairs.iter().map(|(c, _)| *c).collect(),
            types: pairs.iter().copied().collect(),
        }
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn semantic_type(&self, column: &str) -> Option<SemanticType> {
        self.types.get(column).copied()
    }

    /// Columns with their types, in physical order.
    pub fn typed_columns(&self) -> impl Iterator<Item = (&'static str, SemanticType)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| self.types.get(c).map(|ty| (*c, *ty)))
    }

    /// Column list and type map must describe exactly the same set of names.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::with_capacity(self.columns.len());
        for col in &self.columns {
            if !seen.insert(*col) {
                return Err(format!("{}: duplicate column {}", self.name, col));
            }
            if !self.types.contains_key(col) {
                return Err(format!("{}: column {} has no type", self.name, col));
            }
        }
        if let Some(orphan) = self.types.keys().find(|k| !seen.contains(*k)) {
            return Err(format!("{}: type entry {} has no column", self.name, orphan));
        }
        Ok(())
    }
}
