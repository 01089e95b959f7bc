//! Configuration for the huffpress application.
//!
//! Handles parsing command-line arguments and resolving defaults (including
//! a time-based seed that is printed so runs can be reproduced).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: without `--in` it generates a
//! sample temperature log and compresses that.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use huffpress_core::{Error, Result};

use crate::input_gen::{SampleSpec, MAX_SAMPLE_SECONDS};

/// Format of the generated sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleFormat {
    /// Header row plus one comma-separated row per second
    Csv,
    /// Pretty-printed array of row objects
    Json,
}

/// Raw command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "huffpress", version)]
#[command(about = "Huffman-compress a file (or a generated temperature log) and verify the round trip")]
pub struct Args {
    /// Input file (default: generate sample)
    #[arg(long = "in", value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Write the decoded bytes here after verification
    #[arg(long = "out", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Random seed for the generated sample
    #[arg(long)]
    pub seed: Option<u64>,

    /// Length of the generated sample in simulated seconds (one row each)
    #[arg(long, default_value_t = 86_400)]
    pub sample_seconds: u64,

    /// Length of the generated sample in days (overrides --sample-seconds)
    #[arg(long, value_name = "DAYS")]
    pub duration_days: Option<f64>,

    /// Also write the generated sample here
    #[arg(long, value_name = "PATH")]
    pub sample_out: Option<PathBuf>,

    /// Write metrics as key=value lines here
    #[arg(long, value_name = "PATH")]
    pub metrics_out: Option<PathBuf>,

    /// Format of the generated sample
    #[arg(long, value_enum, default_value_t = SampleFormat::Csv)]
    pub format: SampleFormat,

    /// ON/OFF controller hysteresis in °C
    #[arg(long, default_value_t = 0.5)]
    pub deadband: f64,

    /// Run the pipeline this many times (repeats are served from the cache)
    #[arg(long, default_value_t = 1)]
    pub repeat: usize,

    /// Print the code table
    #[arg(long)]
    pub show_codes: bool,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print metrics summary
    #[arg(long)]
    pub no_metrics: bool,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Where to write the decoded bytes
    pub output_file: Option<PathBuf>,

    /// Where to write the generated sample
    pub sample_file: Option<PathBuf>,

    /// Where to write the key=value metrics
    pub metrics_file: Option<PathBuf>,

    // === Sample ===
    pub sample: SampleSpec,
    pub format: SampleFormat,

    // === Behavior ===
    pub repeat: usize,
    pub show_codes: bool,
    pub print_config: bool,
    pub print_metrics: bool,
}

impl Config {
    /// Validate arguments and fill in the seed.
    ///
    /// If no seed is given, the current time in milliseconds is used.
    pub fn resolve(args: Args) -> Result<Self> {
        if args.repeat == 0 {
            return Err(Error::Config("--repeat must be at least 1".to_string()));
        }
        if !(args.deadband.is_finite() && args.deadband >= 0.0) {
            return Err(Error::Config(format!("invalid deadband: {}", args.deadband)));
        }
        let seconds = match args.duration_days {
            Some(days) if !(days.is_finite() && days > 0.0) => {
                return Err(Error::Config(format!("invalid duration: {days} days")));
            }
            Some(days) => (days * 86_400.0).round() as u64,
            None => args.sample_seconds,
        };
        if args.input_file.is_none() {
            if seconds == 0 {
                return Err(Error::Config("sample length must be positive".to_string()));
            }
            if seconds > MAX_SAMPLE_SECONDS {
                return Err(Error::Config(format!(
                    "sample length {seconds} s exceeds the maximum of {MAX_SAMPLE_SECONDS} s"
                )));
            }
        }
        if args.input_file.is_some() && args.sample_out.is_some() {
            return Err(Error::Config("--sample-out needs a generated sample, not --in".to_string()));
        }

        let seed = args.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64
        });

        Ok(Config {
            input_file: args.input_file,
            output_file: args.output_file,
            sample_file: args.sample_out,
            metrics_file: args.metrics_out,
            sample: SampleSpec {
                seed,
                seconds,
                deadband: args.deadband,
            },
            format: args.format,
            repeat: args.repeat,
            show_codes: args.show_codes,
            print_config: args.print_config,
            print_metrics: !args.no_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!("Input file:  (generate sample)"),
        }
        match &self.output_file {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (none)"),
        }
        if let Some(path) = &self.metrics_file {
            println!("Metrics file: {}", path.display());
        }
        println!();
        if self.input_file.is_none() {
            println!("=== Sample ===");
            println!("Seed: {}", self.sample.seed);
            println!("Duration: {} s ({:.2} days)", self.sample.seconds, self.sample.seconds as f64 / 86_400.0);
            println!("Deadband: ±{} °C", self.sample.deadband);
            println!("Format: {:?}", self.format);
            if let Some(path) = &self.sample_file {
                println!("Sample file: {}", path.display());
            }
            println!();
        }
        println!("Repeat: {}", self.repeat);
        println!();
    }
}
