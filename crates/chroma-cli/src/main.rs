//! chroma - command-line chroma-key tool
//!
//! Generates keying cube LUTs, runs keying passes over raw frame data,
//! and reports available compute backends.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chroma")]
#[command(author, version, about = "Chroma-key compositing tool")]
#[command(long_about = "
Green-screen keying over raw RGBA frame data.

Examples:
  chroma lut green.lut                       # Default green band, size 64
  chroma lut red.lut --from 0.95 --to 1.0 --size 33
  chroma key in.rgba -o out.rgba -w 812 -H 375
  chroma key in.rgba -o out.rgba -w 812 -H 375 --threshold 0.5
  chroma key in.rgba -o out.rgba -w 812 -H 375 --params key.yaml
  chroma key in.rgba -o out.rgba -w 812 -H 375 --background bg.rgba
  chroma backends                            # List compute backends
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a keying cube LUT
    Lut(LutArgs),

    /// Key a raw RGBA8 frame
    Key(KeyArgs),

    /// List compute backends and their availability
    Backends,
}

/// Arguments for the `lut` command.
#[derive(Args)]
struct LutArgs {
    /// Output file (flat little-endian f32 RGBA entries)
    output: PathBuf,

    /// Lower edge of the keyed hue band
    #[arg(long, default_value = "0.3")]
    from: f32,

    /// Upper edge of the keyed hue band
    #[arg(long, default_value = "0.4")]
    to: f32,

    /// Grid resolution per axis (>= 2)
    #[arg(short, long, default_value = "64")]
    size: usize,
}

/// Arguments for the `key` command.
#[derive(Args)]
struct KeyArgs {
    /// Input frame (packed RGBA8 bytes)
    input: PathBuf,

    /// Output frame (packed RGBA8 bytes)
    #[arg(short, long)]
    output: PathBuf,

    /// Input width in pixels
    #[arg(short, long)]
    width: u32,

    /// Input height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Parameter file (YAML KeyParams)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Per-channel score weights
    #[arg(long, value_delimiter = ',', num_args = 3)]
    weights: Option<Vec<f32>>,

    /// Score at which keying begins
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Transition band width
    #[arg(short, long)]
    smoothing: Option<f32>,

    /// Background frame to composite under the keyed output
    /// (packed RGBA8, same extent)
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Compute backend: auto, cpu, wgpu
    #[arg(long, default_value = "auto")]
    backend: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lut(args) => commands::lut::run(args, cli.verbose),
        Commands::Key(args) => commands::key::run(args, cli.verbose),
        Commands::Backends => commands::backends::run(),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
