//! Timed benchmark runs.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use rtb_core::reference_scene;
use rtb_math::{Precision, Real};
use rtb_renderer::{render_into, FrameBuffer, Schedule};
use serde::Serialize;

use crate::config::BenchConfig;

/// Timing summary of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub width: u32,
    pub height: u32,
    pub precision: Precision,
    pub schedule: Schedule,
    pub max_depth: u32,
    pub threads: usize,
    /// Wall-clock seconds of each render
    pub seconds: Vec<f64>,
    pub min_seconds: f64,
    pub mean_seconds: f64,
}

impl BenchReport {
    fn new(config: &BenchConfig, seconds: Vec<f64>) -> Self {
        let min_seconds = seconds.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_seconds = seconds.iter().sum::<f64>() / seconds.len().max(1) as f64;

        Self {
            width: config.render.width,
            height: config.render.height,
            precision: config.precision,
            schedule: config.render.schedule,
            max_depth: config.render.max_depth,
            threads: match config.render.schedule {
                Schedule::Sequential => 1,
                Schedule::Rows | Schedule::Tiles => rayon::current_num_threads(),
            },
            seconds,
            min_seconds,
            mean_seconds,
        }
    }
}

/// Render the reference scene at the configured precision.
///
/// Returns the last frame and the timings of every iteration.
pub fn run(config: &BenchConfig) -> Result<(FrameBuffer, BenchReport)> {
    match config.precision {
        Precision::Single => run_with::<f32>(config),
        Precision::Double => run_with::<f64>(config),
    }
}

fn run_with<T: Real>(config: &BenchConfig) -> Result<(FrameBuffer, BenchReport)> {
    let scene = reference_scene::<T>();
    scene.validate().context("Reference scene is invalid")?;

    info!(
        "Rendering {}x{} at {} precision, {} schedule, max depth {}",
        config.render.width,
        config.render.height,
        T::PRECISION,
        config.render.schedule,
        config.render.max_depth
    );

    if config.warmup_ms > 0 {
        info!("Give the system a little time ({} ms)...", config.warmup_ms);
        thread::sleep(Duration::from_millis(config.warmup_ms));
    }
    info!("Starting test...");

    let mut frame = FrameBuffer::new(&config.render)?;
    let mut seconds = Vec::with_capacity(config.iterations as usize);

    for iteration in 1..=config.iterations {
        let start = Instant::now();
        render_into(&scene, &config.render, frame.as_bytes_mut())?;
        let elapsed = start.elapsed().as_secs_f64();

        info!("Iteration {}/{}: {:.4} sec", iteration, config.iterations, elapsed);
        seconds.push(elapsed);
    }

    anyhow::ensure!(!seconds.is_empty(), "No iterations were run");
    let report = BenchReport::new(config, seconds);
    info!(
        "Sec: {:.4} (min), {:.4} (mean) over {} run(s)",
        report.min_seconds,
        report.mean_seconds,
        report.seconds.len()
    );

    Ok((frame, report))
}
