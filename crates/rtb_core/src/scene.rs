//! Scene types for rtbench.
//!
//! A scene is an ordered list of spheres and an ordered list of point lights.
//! It is built once, validated, and then only read while rendering.

use rtb_math::{Real, Vector3};
use thiserror::Error;

/// Errors found while validating a scene before rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene has no spheres")]
    Empty,

    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere with a Lambertian color plus optional mirror and glass terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere<T: Real> {
    center: T::Vec3,
    radius: T,
    color: T::Vec3,
    reflection: T,
    transparency: T,
}

impl<T: Real> Sphere<T> {
    /// Create a purely diffuse sphere.
    pub fn new(center: T::Vec3, radius: T, color: T::Vec3) -> Self {
        Self {
            center,
            radius,
            color,
            reflection: T::zero(),
            transparency: T::zero(),
        }
    }

    /// Set the reflection coefficient (0 = matte, 1 = perfect mirror).
    pub fn with_reflection(mut self, reflection: T) -> Self {
        self.reflection = reflection;
        self
    }

    /// Set the transparency coefficient (0 = opaque).
    pub fn with_transparency(mut self, transparency: T) -> Self {
        self.transparency = transparency;
        self
    }

    #[inline]
    pub fn center(&self) -> T::Vec3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> T {
        self.radius
    }

    /// Diffuse color.
    #[inline]
    pub fn color(&self) -> T::Vec3 {
        self.color
    }

    #[inline]
    pub fn reflection(&self) -> T {
        self.reflection
    }

    #[inline]
    pub fn transparency(&self) -> T {
        self.transparency
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, point: T::Vec3) -> T::Vec3 {
        (point - self.center).normalize()
    }
}

/// A point light. Intensity does not fall off with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light<T: Real> {
    pub position: T::Vec3,
    /// Color scaled by intensity; components may exceed 1.0.
    pub color: T::Vec3,
}

impl<T: Real> Light<T> {
    pub fn new(position: T::Vec3, color: T::Vec3) -> Self {
        Self { position, color }
    }
}

/// The spheres and lights of one render.
#[derive(Debug, Clone, Default)]
pub struct Scene<T: Real> {
    spheres: Vec<Sphere<T>>,
    lights: Vec<Light<T>>,
}

impl<T: Real> Scene<T> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Add a sphere. Spheres are tested in insertion order.
    pub fn add_sphere(&mut self, sphere: Sphere<T>) {
        self.spheres.push(sphere);
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light<T>) {
        self.lights.push(light);
    }

    pub fn spheres(&self) -> &[Sphere<T>] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light<T>] {
        &self.lights
    }

    /// Check the invariants the renderer relies on.
    ///
    /// Rendering an invalid scene still works (it produces black or NaN
    /// pixels); this exists so callers can refuse such a scene up front.
    pub fn validate(&self) -> SceneResult<()> {
        if self.spheres.is_empty() {
            return Err(SceneError::Empty);
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            let radius = sphere.radius();
            if !radius.is_finite() || radius < T::zero() {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: radius.as_f64(),
                });
            }
        }

        if self.lights.is_empty() {
            log::warn!("Scene has no lights, every pixel will be black");
        }

        Ok(())
    }
}
