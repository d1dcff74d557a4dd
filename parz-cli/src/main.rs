//! Parz CLI - parallel chunked compression from the command line
//!
//! This binary provides two operations over parz containers:
//! - pack: compress a file into a parz container
//! - unpack: restore the original file from a container
//!
//! The container records no codec tag, so unpack must be told the codec
//! the file was packed with.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::debug;

use parz_format::{CodecKind, CompressionLevel};
use parz_io::build_pool;

#[derive(Parser)]
#[command(name = "parz")]
#[command(about = "Parallel chunked compression over deflate-family and zstd codecs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a parz container
    Pack {
        /// Input file
        input: String,
        /// Output container
        #[arg(short, long)]
        output: String,
        /// Codec family: deflate, gzip, zlib, or zstd
        #[arg(long, default_value = "zstd")]
        codec: String,
        /// Compression level: fastest, fast, default, good, best, or a codec-native number
        #[arg(long, default_value = "default")]
        level: String,
        /// Worker threads (0 = one per core)
        #[arg(long, default_value = "0")]
        threads: usize,
    },
    /// Restore the original file from a parz container
    Unpack {
        /// Input container
        input: String,
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Codec family the container was packed with
        #[arg(long, default_value = "zstd")]
        codec: String,
        /// Worker threads (0 = one per core)
        #[arg(long, default_value = "0")]
        threads: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Pack {
            input,
            output,
            codec,
            level,
            threads,
        } => {
            let kind = CodecKind::from_str(&codec)?;
            let level = CompressionLevel::from_str(&level)?;
            let pool = build_pool(threads)?;
            debug!(%kind, %level, threads, "packing {input} into {output}");

            let mut source = BufReader::new(File::open(&input)?);
            let mut sink = BufWriter::new(File::create(&output)?);
            parz_io::compress(kind, level, pool, &mut source, &mut sink)?;
            sink.flush()?;
        }
        Commands::Unpack {
            input,
            output,
            codec,
            threads,
        } => {
            let kind = CodecKind::from_str(&codec)?;
            let pool = build_pool(threads)?;
            debug!(%kind, threads, "unpacking {input} into {output}");

            let mut source = BufReader::new(File::open(&input)?);
            let mut sink = BufWriter::new(File::create(&output)?);
            // The level only matters for compressor contexts; decompression
            // accepts any level's output.
            parz_io::decompress(kind, CompressionLevel::default(), pool, &mut source, &mut sink)?;
            sink.flush()?;
        }
    }

    Ok(())
}
