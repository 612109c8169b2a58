use anyhow::{bail, Result};
use clap::Parser;
use log::info;

mod cli;
mod compare;
mod config;
mod harness;
mod output;

use cli::{Args, Command, RenderArgs};
use compare::compare_files;
use config::BenchConfig;
use output::{write_image, write_report};

fn init_logger(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let config = BenchConfig::resolve(args)?;
    let (frame, report) = harness::run(&config)?;

    write_image(&frame, &config.output, config.format)?;
    if let Some(path) = &config.report {
        write_report(&report, path)?;
    }
    Ok(())
}

fn run_compare(first: &std::path::Path, second: &std::path::Path) -> Result<()> {
    match compare_files(first, second)? {
        None => {
            info!("Success: files match");
            Ok(())
        }
        Some(m) => bail!(
            "Image 1 byte {} does not equal image 2 byte {} at index {}",
            m.first,
            m.second,
            m.index
        ),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    info!("rtbench {}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        None => run_render(&RenderArgs::default()),
        Some(Command::Render(render)) => run_render(render),
        Some(Command::Compare { first, second }) => run_compare(first, second),
    }
}
