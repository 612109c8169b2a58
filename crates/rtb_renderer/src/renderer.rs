//! Frame rendering.
//!
//! Implements the per-pixel loop:
//! - Camera ray generation and recursive shading for every pixel
//! - Clamping into 8-bit RGB
//! - Sequential, row-parallel or tile-parallel scheduling

use std::collections::TryReserveError;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use rtb_core::Scene;
use rtb_math::{Real, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bucket::render_tiles;
use crate::{trace, Camera, DEFAULT_BUCKET_SIZE};

/// Bytes per pixel in the frame buffer (R, G, B).
const CHANNELS: usize = 3;

/// Errors that stop a render before any pixel is written.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Failed to allocate a {bytes} byte frame buffer")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// How pixels are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    /// Row-major on the calling thread
    Sequential,
    /// One rayon task per image row
    #[default]
    Rows,
    /// Square buckets rendered centre-out on the rayon pool
    Tiles,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Sequential => f.write_str("sequential"),
            Schedule::Rows => f.write_str("rows"),
            Schedule::Tiles => f.write_str("tiles"),
        }
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Ok(Schedule::Sequential),
            "rows" => Ok(Schedule::Rows),
            "tiles" | "buckets" => Ok(Schedule::Tiles),
            other => Err(format!(
                "unknown schedule '{other}' (expected sequential, rows or tiles)"
            )),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
    /// Maximum reflection/refraction depth
    pub max_depth: u32,
    /// Thread scheduling
    pub schedule: Schedule,
    /// Bucket edge length for `Schedule::Tiles`
    pub tile_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov_degrees: 45.0,
            max_depth: 6,
            schedule: Schedule::default(),
            tile_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Check the configuration and return the frame buffer length in bytes.
    pub fn validate(&self) -> RenderResult<usize> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "resolution {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(RenderError::InvalidConfig(format!(
                "field of view {} must be between 0 and 180 degrees",
                self.fov_degrees
            )));
        }
        if self.schedule == Schedule::Tiles && self.tile_size == 0 {
            return Err(RenderError::InvalidConfig("tile size must be non-zero".into()));
        }

        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or_else(|| {
                RenderError::InvalidConfig(format!(
                    "resolution {}x{} overflows the address space",
                    self.width, self.height
                ))
            })
    }
}

/// Convert one linear color channel to a byte.
///
/// Scales by 255 and clamps to [0, 255]; NaN becomes 0.
#[inline]
pub fn to_channel<T: Real>(value: T) -> u8 {
    let scaled = (value * T::from_f64(255.0))
        .max(T::zero())
        .min(T::from_f64(255.0));
    scaled.to_u8().unwrap_or(0)
}

/// Trace and convert the color of pixel (x, y).
#[inline]
pub fn shade_pixel<T: Real>(
    camera: &Camera<T>,
    scene: &Scene<T>,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> [u8; 3] {
    let ray = camera.primary_ray(x, y);
    let color = trace(&ray, scene, 0, config);
    [to_channel(color.x()), to_channel(color.y()), to_channel(color.z())]
}

/// Fill one row of the frame buffer.
fn render_row<T: Real>(
    camera: &Camera<T>,
    scene: &Scene<T>,
    y: u32,
    row: &mut [u8],
    config: &RenderConfig,
) {
    for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        pixel.copy_from_slice(&shade_pixel(camera, scene, x as u32, y, config));
    }
}

/// Flat row-major RGB image, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a black frame buffer for the configured resolution.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub fn new(config: &RenderConfig) -> RenderResult<Self> {
        let bytes = config.validate()?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|source| RenderError::Allocation { bytes, source })?;
        pixels.resize(bytes, 0);

        Ok(Self {
            width: config.width,
            height: config.height,
            pixels,
        })
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

/// Render the scene into a caller-provided buffer of width * height * 3 bytes.
///
/// The buffer is completely overwritten. Errors are only raised before the
/// first pixel is traced.
pub fn render_into<T: Real>(scene: &Scene<T>, config: &RenderConfig, pixels: &mut [u8]) -> RenderResult<()> {
    let expected = config.validate()?;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    let camera = Camera::<T>::new(config.width, config.height, config.fov_degrees);
    let row_stride = config.width as usize * CHANNELS;

    log::debug!(
        "Rendering {}x{} ({} precision, {} schedule, max depth {})",
        config.width,
        config.height,
        T::PRECISION,
        config.schedule,
        config.max_depth
    );

    match config.schedule {
        Schedule::Sequential => {
            for (y, row) in pixels.chunks_exact_mut(row_stride).enumerate() {
                render_row(&camera, scene, y as u32, row, config);
            }
        }
        Schedule::Rows => {
            pixels
                .par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| render_row(&camera, scene, y as u32, row, config));
        }
        Schedule::Tiles => render_tiles(&camera, scene, config, pixels),
    }

    log::debug!("Frame complete");
    Ok(())
}

/// Render the entire scene to a new frame buffer.
pub fn render<T: Real>(scene: &Scene<T>, config: &RenderConfig) -> RenderResult<FrameBuffer> {
    let mut image = FrameBuffer::new(config)?;
    render_into(scene, config, image.as_bytes_mut())?;
    Ok(image)
}
