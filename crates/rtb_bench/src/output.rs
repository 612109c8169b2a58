//! Writing rendered frames and timing reports to disk.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use image::{ColorType, ImageFormat};
use log::info;
use rtb_renderer::FrameBuffer;
use serde::{Deserialize, Serialize};

use crate::harness::BenchReport;

/// On-disk image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Headerless row-major RGB bytes
    #[default]
    Raw,
    /// 8-bit RGB PNG
    Png,
    /// Headerless row-major BGRA bytes, alpha 255
    Bgra,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Raw => f.write_str("raw"),
            OutputFormat::Png => f.write_str("png"),
            OutputFormat::Bgra => f.write_str("bgra"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "rgb" => Ok(OutputFormat::Raw),
            "png" => Ok(OutputFormat::Png),
            "bgra" => Ok(OutputFormat::Bgra),
            other => Err(format!("unknown output format '{other}' (expected raw, png or bgra)")),
        }
    }
}

/// Expand packed RGB into BGRA with an opaque alpha channel.
pub fn rgb_to_bgra(rgb: &[u8]) -> Vec<u8> {
    let mut bgra = Vec::with_capacity(rgb.len() / 3 * 4);
    for px in rgb.chunks_exact(3) {
        bgra.extend_from_slice(&[px[2], px[1], px[0], 255]);
    }
    bgra
}

/// Save a frame in the requested format.
pub fn write_image(frame: &FrameBuffer, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Raw => fs::write(path, frame.as_bytes())
            .with_context(|| format!("Failed to write raw image to {}", path.display()))?,
        OutputFormat::Bgra => fs::write(path, rgb_to_bgra(frame.as_bytes()))
            .with_context(|| format!("Failed to write BGRA image to {}", path.display()))?,
        OutputFormat::Png => image::save_buffer_with_format(
            path,
            frame.as_bytes(),
            frame.width,
            frame.height,
            ColorType::Rgb8,
            ImageFormat::Png,
        )
        .with_context(|| format!("Failed to write PNG to {}", path.display()))?,
    }

    info!("Saved {}x{} {} image to {}", frame.width, frame.height, format, path.display());
    Ok(())
}

/// Save a timing report as pretty-printed JSON.
pub fn write_report(report: &BenchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!("Saved report to {}", path.display());
    Ok(())
}
