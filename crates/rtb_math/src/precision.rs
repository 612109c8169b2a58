//! Floating-point precision selection.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use glam::{DVec3, Vec3};
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::Vector3;

/// Which floating-point width a render runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 32-bit `f32` arithmetic.
    #[default]
    Single,
    /// 64-bit `f64` arithmetic.
    Double,
}

impl Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single => f.write_str("single"),
            Precision::Double => f.write_str("double"),
        }
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" | "f32" => Ok(Precision::Single),
            "double" | "f64" => Ok(Precision::Double),
            other => Err(format!("unknown precision '{other}' (expected single or double)")),
        }
    }
}

/// Scalar type the tracer is generic over.
///
/// Each implementation picks the matching glam vector as its `Vec3`.
pub trait Real: Float + Debug + Display + Send + Sync + 'static {
    /// Vector type with `Self` components.
    type Vec3: Vector3<Self>;

    /// Runtime tag for this precision.
    const PRECISION: Precision;

    /// Convert a literal, rounding to the nearest representable value.
    fn from_f64(value: f64) -> Self;

    /// Widen (or copy) to `f64`.
    fn as_f64(self) -> f64;

    /// Build a vector from `f64` literals.
    #[inline]
    fn vec3(x: f64, y: f64, z: f64) -> Self::Vec3 {
        Self::Vec3::new(Self::from_f64(x), Self::from_f64(y), Self::from_f64(z))
    }
}

impl Real for f32 {
    type Vec3 = Vec3;
    const PRECISION: Precision = Precision::Single;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    type Vec3 = DVec3;
    const PRECISION: Precision = Precision::Double;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_tags() {
        assert_eq!(<f32 as Real>::PRECISION, Precision::Single);
        assert_eq!(<f64 as Real>::PRECISION, Precision::Double);
    }

    #[test]
    fn test_from_f64_rounds_to_single() {
        assert_eq!(<f32 as Real>::from_f64(0.8), 0.8f32);
        assert_eq!(<f32 as Real>::from_f64(1e-5), 1e-5f32);
    }

    #[test]
    fn test_precision_parse() {
        assert_eq!("single".parse::<Precision>(), Ok(Precision::Single));
        assert_eq!("F64".parse::<Precision>(), Ok(Precision::Double));
        assert!("half".parse::<Precision>().is_err());
        assert_eq!(Precision::Double.to_string(), "double");
    }
}
