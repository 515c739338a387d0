//! Load a data directory into throwaway stores and report what it holds.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::PathBuf;

use clap::Parser;
use hbnb::outbound::json_file::JsonFileLoader;
use hbnb::outbound::memory::in_memory_stores;
use tokio::runtime::Builder;

/// `check-data` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "check-data",
    about = "Validate the <entity>.json files of a data directory",
    version
)]
struct CliArgs {
    /// Directory holding the data files.
    #[arg(value_name = "dir", default_value = "data")]
    data_dir: PathBuf,
    /// Fail when any row is rejected.
    #[arg(long)]
    strict: bool,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let loader = JsonFileLoader::open(&args.data_dir).map_err(|error| {
        io::Error::other(format!(
            "open data directory '{}': {error}",
            args.data_dir.display()
        ))
    })?;

    let summary = loader
        .seed_all(&in_memory_stores())
        .await
        .map_err(|error| io::Error::other(format!("load failed: {error}")))?;

    for (kind, count) in &summary.loaded {
        println!("{}={count}", kind.file_stem());
    }
    println!("skipped={}", summary.skipped);
    println!("total={}", summary.total());

    if args.strict && summary.skipped > 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} invalid rows", summary.skipped),
        ));
    }
    Ok(())
}
