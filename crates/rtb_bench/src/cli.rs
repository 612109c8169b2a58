use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use rtb_math::Precision;
use rtb_renderer::Schedule;

use crate::output::OutputFormat;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "rtbench", version)]
#[command(about = "Recursive ray tracing CPU benchmark")]
pub struct Args {
    /// Logging level (defaults to RUST_LOG, then "info")
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the benchmark scene and report timings (default)
    Render(RenderArgs),

    /// Compare two raw images byte for byte
    Compare {
        /// First image
        first: PathBuf,
        /// Second image
        second: PathBuf,
    },
}

/// Render options. Anything left unset falls back to the config file, then
/// to the built-in defaults.
#[derive(Debug, Default, ClapArgs)]
pub struct RenderArgs {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,

    /// Maximum reflection/refraction depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Floating-point precision: single or double
    #[arg(short, long)]
    pub precision: Option<Precision>,

    /// Pixel scheduling: sequential, rows or tiles
    #[arg(short, long)]
    pub schedule: Option<Schedule>,

    /// Bucket size for the tiles schedule
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// Pause before the first timed render, in milliseconds
    #[arg(long)]
    pub warmup_ms: Option<u64>,

    /// Number of timed renders
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Output image path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: raw, png or bgra
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Write a JSON timing report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}
