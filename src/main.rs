use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{env, process::exit};
use tpch_parquet::{
    process::{convert_file, io_paths},
    Config,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Usage: tpch-parquet <name> [<name>...]
///
/// Converts each `<name>.csv` (headerless, pipe-delimited TPC-H output) into
/// `<name>.parquet`. The table schema is picked from the base name of `<name>`.
fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <NAME> [<NAME>...]", args[0]);
        exit(2);
    }

    if let Err(e) = run(&args[1..]) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn run(bases: &[String]) -> Result<()> {
    // ─── 2) configuration ────────────────────────────────────────────
    let config = Config::from_env().context("reading TPCH_PARQUET_* configuration")?;
    info!(?config, tables = bases.len(), "startup");

    // ─── 3) convert, one table per rayon task ────────────────────────
    let failed: Vec<&String> = bases
        .par_iter()
        .filter(|base| {
            let (input, output) = io_paths(base);
            match convert_file(&input, &output, &config) {
                Ok(summary) => {
                    info!(
                        table = summary.table,
                        rows = summary.rows,
                        bytes = summary.bytes_written,
                        "Parquet file saved as {}",
                        output.display()
                    );
                    false
                }
                Err(e) => {
                    error!(input = %input.display(), kind = e.kind(), "{e}");
                    true
                }
            }
        })
        .collect();

    if !failed.is_empty() {
        anyhow::bail!("{} of {} conversions failed", failed.len(), bases.len());
    }
    info!("all done");
    Ok(())
}
