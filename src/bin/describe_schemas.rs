use anyhow::Result;
use std::env;
use tpch_parquet::schema::{all_schemas, lookup};

/// Print the registered table schemas as JSON, or just one with `describe_schemas <table>`.
fn main() -> Result<()> {
    let out = match env::args().nth(1) {
        Some(table) => serde_json::to_string_pretty(lookup(&table)?)?,
        None => serde_json::to_string_pretty(&all_schemas())?,
    };
    println!("{}", out);
    Ok(())
}
