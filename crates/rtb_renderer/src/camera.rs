//! Pinhole camera for primary ray generation.

use std::f64::consts::PI;

use rtb_math::{Ray, Real, Vector3};

/// Pinhole camera at the origin looking down -Z.
///
/// One ray per pixel through the pixel's top-left corner; no lens and no
/// jitter, so the same pixel always gets the same ray.
#[derive(Debug, Clone, Copy)]
pub struct Camera<T: Real> {
    pub image_width: u32,
    pub image_height: u32,

    eye: T::Vec3,
    /// Vertical extent of the image plane at distance 1
    viewport_height: T,
    /// Horizontal extent of the image plane at distance 1
    viewport_width: T,
}

impl<T: Real> Camera<T> {
    /// Create a camera for a `width` x `height` image with a vertical field
    /// of view in degrees.
    pub fn new(width: u32, height: u32, fov_degrees: f64) -> Self {
        // Evaluated in double precision, then narrowed
        let h = (((fov_degrees / 360.0) * (2.0 * PI)) / 2.0).tan() * 2.0;
        let viewport_height = T::from_f64(h);
        let viewport_width = viewport_height * T::from_f64(width as f64) / T::from_f64(height as f64);

        Self {
            image_width: width,
            image_height: height,
            eye: T::Vec3::ZERO,
            viewport_height,
            viewport_width,
        }
    }

    /// Generate the unit-length primary ray for pixel (x, y).
    ///
    /// Row 0 is the top of the image.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray<T> {
        let two = T::from_f64(2.0);
        let xx = T::from_f64(x as f64);
        let yy = T::from_f64(y as f64);
        let ww = T::from_f64(self.image_width as f64);
        let hh = T::from_f64(self.image_height as f64);

        let direction = T::Vec3::new(
            ((xx - (ww / two)) / ww) * self.viewport_width,
            (((hh / two) - yy) / hh) * self.viewport_height,
            -T::one(),
        );

        Ray::new(self.eye, direction.normalize())
    }
}
