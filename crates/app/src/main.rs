//! huffpress: compress a file with the huffpress codec, verify that it
//! decodes back to the same bytes, and report how well it compressed.

mod cache;
mod config;
mod input_gen;
mod logger;

use std::borrow::Cow;

use clap::Parser;
use huffpress_core::{verify_round_trip, Error, Result};
use tracing::{error, info, warn};

use crate::cache::CodecCache;
use crate::config::{Args, Config};

fn main() {
    let args = Args::parse();
    logger::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::resolve(args)?;
    if config.print_config {
        config.print();
    }

    let data = match &config.input_file {
        Some(path) => {
            info!(path = %path.display(), "reading input");
            std::fs::read(path)?
        }
        None => {
            info!(seed = config.sample.seed, seconds = config.sample.seconds, "generating sample");
            let sample = input_gen::generate_sample_data(&config.sample, config.format)
                .map_err(|e| Error::Config(format!("cannot serialize sample: {e}")))?;
            if let Some(path) = &config.sample_file {
                std::fs::write(path, &sample)?;
                info!(path = %path.display(), bytes = sample.len(), "wrote generated sample");
            }
            sample
        }
    };

    let mut cache = CodecCache::new();
    let mut result = cache.get_or_run(&data)?;
    for _ in 1..config.repeat {
        result = cache.get_or_run(&data)?;
    }
    info!(entries = cache.len(), hits = cache.hits(), misses = cache.misses(), "codec cache");

    // Never hand unverified bytes to anything downstream
    verify_round_trip(&data, &result.decoded)?;

    if config.show_codes {
        println!("=== Code Table ===");
        print!("{}", result.compressed.table);
        println!();
    }

    print_preview(&result.decoded);

    if let Some(path) = &config.output_file {
        std::fs::write(path, &result.decoded)?;
        info!(path = %path.display(), bytes = result.decoded.len(), "wrote decoded output");
    }

    if let Some(path) = &config.metrics_file {
        std::fs::write(path, result.metrics.export_text())?;
        info!(path = %path.display(), "wrote metrics");
    }

    if config.print_metrics {
        result.metrics.print_summary();
    }
    result.metrics.print_result();

    Ok(())
}

/// Interpret bytes as text: UTF-8 when valid, Latin-1 otherwise.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Column names and row count of a CSV-looking payload.
fn table_shape(text: &str) -> Option<(Vec<&str>, usize)> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next()?;
    if !header.contains(',') {
        return None;
    }
    let columns = header.split(',').map(str::trim).collect();
    Some((columns, lines.count()))
}

fn print_preview(decoded: &[u8]) {
    let text = decode_text(decoded);
    let Some((columns, rows)) = table_shape(&text) else {
        return;
    };

    println!("=== Data ===");
    println!("Columns: {}", columns.join(", "));
    println!("Rows: {rows}");
    if !columns.contains(&"Time (s)") {
        warn!("no 'Time (s)' column in decoded data");
    }
    println!();
}
