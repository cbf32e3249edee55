//! # Stego Binary Entry Point
//!
//! Thin wrapper that turns command-line flags into a [`Job`] and runs it.
//!
//! ## Usage
//!
//! ```bash
//! # hide a message (the output must be a lossless format such as PNG)
//! cargo run --bin stego -- -e -f carrier.png -i "meet at noon" -o hidden.png
//!
//! # recover it (decoding is the default mode)
//! cargo run --bin stego -- -f hidden.png
//! ```
//!
//! An optional TOML file passed with `--config` sets the log level and how
//! non-RGB carriers are handled.

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use parity_stego::{load_config, run, Job, Outcome, Settings};

/// Hide text in the channel parity of lossless images, or recover it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Decode a file containing a hidden message (default mode)
    #[arg(short, long, conflicts_with = "encode")]
    decode: bool,

    /// Encode a message into a file
    #[arg(short, long)]
    encode: bool,

    /// File to decode or encode
    #[arg(short, long)]
    file: PathBuf,

    /// Message to insert into the file (required with --encode)
    #[arg(short, long)]
    insert: Option<String>,

    /// Where to write the generated image (required with --encode)
    ///
    /// Example: hidden.png
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Path to a settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let settings: Settings = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        settings.logging.level_filter()
    };
    init_logger(level);

    let result = Job::from_flags(args.encode && !args.decode, args.file, args.insert, args.outfile)
        .and_then(|job| run(&job, &settings));

    match result {
        Ok(Outcome::Decoded(text)) => println!("Decoded: {}", text),
        Ok(Outcome::Encoded { output, bytes }) => {
            println!(
                "Successfully encoded {} bytes into {}",
                bytes,
                output.display()
            )
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
