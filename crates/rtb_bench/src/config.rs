//! Benchmark configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! JSON file, and command line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rtb_math::Precision;
use rtb_renderer::RenderConfig;
use serde::{Deserialize, Serialize};

use crate::cli::RenderArgs;
use crate::output::OutputFormat;

/// Everything one benchmark run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    #[serde(flatten)]
    pub render: RenderConfig,
    pub precision: Precision,
    /// Idle time before the first timed render
    pub warmup_ms: u64,
    pub iterations: u32,
    pub output: PathBuf,
    pub format: OutputFormat,
    /// Optional JSON timing report
    pub report: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            precision: Precision::default(),
            warmup_ms: 2000,
            iterations: 1,
            output: PathBuf::from("Image.raw"),
            format: OutputFormat::default(),
            report: None,
        }
    }
}

impl BenchConfig {
    /// Parse a JSON config. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid benchmark config")
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In config {}", path.display()))
    }

    /// Build the effective config from command line arguments.
    pub fn resolve(args: &RenderArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    /// Replace every value that was given on the command line.
    pub fn apply_overrides(&mut self, args: &RenderArgs) {
        let render = &mut self.render;
        if let Some(width) = args.width {
            render.width = width;
        }
        if let Some(height) = args.height {
            render.height = height;
        }
        if let Some(fov) = args.fov {
            render.fov_degrees = fov;
        }
        if let Some(max_depth) = args.max_depth {
            render.max_depth = max_depth;
        }
        if let Some(schedule) = args.schedule {
            render.schedule = schedule;
        }
        if let Some(tile_size) = args.tile_size {
            render.tile_size = tile_size;
        }
        if let Some(precision) = args.precision {
            self.precision = precision;
        }
        if let Some(warmup_ms) = args.warmup_ms {
            self.warmup_ms = warmup_ms;
        }
        if let Some(iterations) = args.iterations {
            self.iterations = iterations;
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(report) = &args.report {
            self.report = Some(report.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.render.validate()?;
        if self.iterations == 0 {
            bail!("At least one iteration is required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_renderer::Schedule;

    #[test]
    fn test_defaults_match_reference_benchmark() {
        let config = BenchConfig::default();
        assert_eq!(config.render.width, 1280);
        assert_eq!(config.render.height, 720);
        assert_eq!(config.render.max_depth, 6);
        assert_eq!(config.precision, Precision::Single);
        assert_eq!(config.output, PathBuf::from("Image.raw"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(BenchConfig::from_json("{}").unwrap(), BenchConfig::default());
    }

    #[test]
    fn test_json_fields() {
        let config = BenchConfig::from_json(
            r#"{
                "width": 640,
                "height": 360,
                "schedule": "tiles",
                "precision": "double",
                "iterations": 5,
                "format": "png",
                "output": "frame.png"
            }"#,
        )
        .unwrap();

        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.height, 360);
        assert_eq!(config.render.schedule, Schedule::Tiles);
        assert_eq!(config.render.fov_degrees, 45.0);
        assert_eq!(config.precision, Precision::Double);
        assert_eq!(config.iterations, 5);
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.output, PathBuf::from("frame.png"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(BenchConfig::from_json(r#"{"precision": "half"}"#).is_err());
        assert!(BenchConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = BenchConfig::from_json(r#"{"width": 640, "warmup_ms": 10}"#).unwrap();
        let args = RenderArgs {
            width: Some(200),
            iterations: Some(3),
            ..RenderArgs::default()
        };

        config.apply_overrides(&args);

        assert_eq!(config.render.width, 200);
        assert_eq!(config.iterations, 3);
        // Untouched by the CLI
        assert_eq!(config.warmup_ms, 10);
    }

    #[test]
    fn test_resolve_rejects_zero_iterations() {
        let args = RenderArgs {
            iterations: Some(0),
            ..RenderArgs::default()
        };
        assert!(BenchConfig::resolve(&args).is_err());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("rtbench-{}-config.json", std::process::id()));
        fs::write(&path, r#"{"max_depth": 2}"#).unwrap();

        let config = BenchConfig::load(&path).unwrap();
        assert_eq!(config.render.max_depth, 2);

        fs::remove_file(&path).unwrap();
        assert!(BenchConfig::load(&path).is_err());
    }
}
