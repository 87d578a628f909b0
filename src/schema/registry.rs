// src/schema/registry.rs

use once_cell::sync::Lazy;
use std::{collections::HashMap, path::Path};

use super::types::{SemanticType, TableSchema};
use crate::error::ConvertError;

use super::types::SemanticType::{
    FixedPointDecimal as Dec, Integer64 as Int, TimestampNanos as Ts, Utf8Text as Str,
};

/// TPC-H tables. dbgen output carries no header, so the order here is the
/// order of fields on every line and of columns in the Parquet output.
const TABLES: &[(&str, &[(&str, SemanticType)])] = &[
    (
        "customer",
        &[
            ("c_custkey", Int),
            ("c_name", Str),
            ("c_address", Str),
            ("c_nationkey", Int),
            ("c_phone", Str),
            ("c_acctbal", Dec),
            ("c_mktsegment", Str),
            ("c_comment", Str),
        ],
    ),
    (
        "lineitem",
        &[
            ("l_orderkey", Int),
            ("l_partkey", Int),
            ("l_suppkey", Int),
            ("l_linenumber", Int),
            ("l_quantity", Dec),
            ("l_extendedprice", Dec),
            ("l_discount", Dec),
            ("l_tax", Dec),
            ("l_returnflag", Str),
            ("l_linestatus", Str),
            ("l_shipdate", Ts),
            ("l_commitdate", Ts),
            ("l_receiptdate", Ts),
            ("l_shipinstruct", Str),
            ("l_shipmode", Str),
            ("l_comment", Str),
        ],
    ),
    (
        "nation",
        &[
            ("n_nationkey", Int),
            ("n_name", Str),
            ("n_regionkey", Int),
            ("n_comment", Str),
        ],
    ),
    (
        "orders",
        &[
            ("o_orderkey", Int),
            ("o_custkey", Int),
            ("o_orderstatus", Str),
            ("o_totalprice", Dec),
            ("o_orderdate", Ts),
            ("o_orderpriority", Str),
            ("o_clerk", Str),
            ("o_shippriority", Int),
            ("o_comment", Str),
        ],
    ),
    (
        "part",
        &[
            ("p_partkey", Int),
            ("p_name", Str),
            ("p_mfgr", Str),
            ("p_brand", Str),
            ("p_type", Str),
            ("p_size", Int),
            ("p_container", Str),
            ("p_retailprice", Dec),
            ("p_comment", Str),
        ],
    ),
    (
        "partsupp",
        &[
            ("ps_partkey", Int),
            ("ps_suppkey", Int),
            ("ps_availqty", Int),
            ("ps_supplycost", Dec),
            ("ps_comment", Str),
        ],
    ),
    (
        "region",
        &[("r_regionkey", Int), ("r_name", Str), ("r_comment", Str)],
    ),
    (
        "supplier",
        &[
            ("s_suppkey", Int),
            ("s_name", Str),
            ("s_address", Str),
            ("s_nationkey", Int),
            ("s_phone", Str),
            ("s_acctbal", Dec),
            ("s_comment", Str),
        ],
    ),
];

static REGISTRY: Lazy<HashMap<&'static str, TableSchema>> = Lazy::new(|| {
    TABLES
        .iter()
        .map(|(name, cols)| (*name, TableSchema::from_pairs(*name, cols)))
        .collect()
});

/// Resolve the schema registered for `table_name`.
pub fn lookup(table_name: &str) -> Result<&'static TableSchema, ConvertError> {
    REGISTRY
        .get(table_name)
        .ok_or_else(|| ConvertError::UnknownTable(table_name.to_string()))
}

/// All registered table identifiers, sorted.
pub fn table_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Every registered schema, sorted by table name.
pub fn all_schemas() -> Vec<&'static TableSchema> {
    table_names()
        .into_iter()
        .filter_map(|name| REGISTRY.get(name))
        .collect()
}

/// `data/lineitem.csv` → `lineitem`
pub fn table_name_for_path(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
