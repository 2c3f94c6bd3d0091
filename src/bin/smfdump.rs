//! Print every message of a Standard MIDI File next to its raw bytes

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use smfdump::{
    dump::{ByteSource, FileDump},
    file::MidiFile,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The `.mid` file to dump
    path: PathBuf,
    /// Log more of the parse to stderr, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Leave out the trailing note sequence
    #[arg(long)]
    no_notes: bool,
    /// Show each message re-encoded with its status byte instead of the bytes it was read from
    #[arg(long)]
    canonical: bool,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("failed reading {}", args.path.display()))?;
    tracing::debug!(path = %args.path.display(), len = bytes.len(), "read file");

    let file = MidiFile::parse(&bytes)
        .with_context(|| format!("failed parsing {}", args.path.display()))?;

    let source = if args.canonical {
        ByteSource::Canonical
    } else {
        ByteSource::Raw
    };
    print!(
        "{}",
        FileDump::new(&file)
            .with_source(source)
            .with_notes(!args.no_notes)
    );
    Ok(())
}
