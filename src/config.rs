use anyhow::{anyhow, Context, Result};
use parquet::{
    basic::{Compression, GzipLevel, ZstdLevel},
    file::properties::WriterProperties,
};
use std::env;

pub const ENV_DELIMITER: &str = "TPCH_PARQUET_DELIMITER";
pub const ENV_COMPRESSION: &str = "TPCH_PARQUET_COMPRESSION";
pub const ENV_TRAILING_DELIMITER: &str = "TPCH_PARQUET_TRAILING_DELIMITER";
pub const ENV_ROW_GROUP_SIZE: &str = "TPCH_PARQUET_ROW_GROUP_SIZE";

/// Knobs for reading the delimited input and writing Parquet.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Single-byte field separator.
    pub delimiter: u8,
    pub compression: Compression,
    /// Strip one empty trailing field (dbgen writes `a|b|c|`).
    pub trailing_delimiter: bool,
    pub max_row_group_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b'|',
            compression: Compression::GZIP(GzipLevel::default()),
            trailing_delimiter: false,
            max_row_group_size: 1024 * 1024,
        }
    }
}

impl Config {
    /// Defaults overridden by `TPCH_PARQUET_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(raw) = get(ENV_DELIMITER) {
            cfg.delimiter = match raw.as_bytes() {
                [b] => *b,
                _ => return Err(anyhow!("{ENV_DELIMITER} must be a single byte, got {raw:?}")),
            };
        }
        if let Some(raw) = get(ENV_COMPRESSION) {
            cfg.compression = parse_compression(&raw)?;
        }
        if let Some(raw) = get(ENV_TRAILING_DELIMITER) {
            cfg.trailing_delimiter = parse_flag(&raw)
                .ok_or_else(|| anyhow!("{ENV_TRAILING_DELIMITER}: expected a boolean, got {raw:?}"))?;
        }
        if let Some(raw) = get(ENV_ROW_GROUP_SIZE) {
            let size: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("parsing {ENV_ROW_GROUP_SIZE}={raw:?}"))?;
            if size == 0 {
                return Err(anyhow!("{ENV_ROW_GROUP_SIZE} must be positive"));
            }
            cfg.max_row_group_size = size;
        }

        Ok(cfg)
    }

    pub fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.max_row_group_size)
            .build()
    }
}

fn parse_compression(raw: &str) -> Result<Compression> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" | "uncompressed" => Ok(Compression::UNCOMPRESSED),
        "snappy" => Ok(Compression::SNAPPY),
        "gzip" => Ok(Compression::GZIP(GzipLevel::default())),
        "zstd" => Ok(Compression::ZSTD(ZstdLevel::default())),
        other => Err(anyhow!(
            "{ENV_COMPRESSION}: unsupported codec {other:?} (none|snappy|gzip|zstd)"
        )),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
