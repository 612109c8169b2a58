//! Vector operations shared by both precisions.
//!
//! The tracer is written against [`Vector3`] so that the same code runs on
//! `glam::Vec3` (single precision) and `glam::DVec3` (double precision).

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use glam::{DVec3, Vec3};

/// A three-component vector with scalar type `S`.
pub trait Vector3<S>:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<Output = Self>
    + Mul<S, Output = Self>
    + Div<Output = Self>
    + Div<S, Output = Self>
{
    /// All components zero. Also the background color.
    const ZERO: Self;

    fn new(x: S, y: S, z: S) -> Self;

    fn x(self) -> S;
    fn y(self) -> S;
    fn z(self) -> S;

    /// Dot product.
    fn dot(self, other: Self) -> S;

    /// Euclidean length.
    fn magnitude(self) -> S;

    /// Divide by the magnitude.
    ///
    /// A zero vector yields NaN components; nothing downstream rejects them.
    fn normalize(self) -> Self;
}

macro_rules! impl_vector3 {
    ($vec:ty, $scalar:ty) => {
        impl Vector3<$scalar> for $vec {
            const ZERO: Self = <$vec>::ZERO;

            #[inline]
            fn new(x: $scalar, y: $scalar, z: $scalar) -> Self {
                <$vec>::new(x, y, z)
            }

            #[inline]
            fn x(self) -> $scalar {
                self.x
            }

            #[inline]
            fn y(self) -> $scalar {
                self.y
            }

            #[inline]
            fn z(self) -> $scalar {
                self.z
            }

            #[inline]
            fn dot(self, other: Self) -> $scalar {
                (self.x * other.x) + (self.y * other.y) + (self.z * other.z)
            }

            #[inline]
            fn magnitude(self) -> $scalar {
                Vector3::<$scalar>::dot(self, self).sqrt()
            }

            #[inline]
            fn normalize(self) -> Self {
                // Divide, not multiply by the reciprocal
                self / Vector3::<$scalar>::magnitude(self)
            }
        }
    };
}

impl_vector3!(Vec3, f32);
impl_vector3!(DVec3, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit<S: Into<f64>>(len: S) {
        let len = len.into();
        assert!((len - 1.0).abs() < 1e-6, "length was {len}");
    }

    #[test]
    fn test_dot() {
        let a = <DVec3 as Vector3<f64>>::new(1.0, 2.0, 3.0);
        let b = <DVec3 as Vector3<f64>>::new(-2.0, 0.5, 4.0);
        assert_eq!(Vector3::dot(a, b), 11.0);
    }

    #[test]
    fn test_magnitude() {
        let v = <Vec3 as Vector3<f32>>::new(3.0, 4.0, 12.0);
        assert_eq!(Vector3::magnitude(v), 13.0);
    }

    #[test]
    fn test_normalize_is_unit_length() {
        let samples = [
            (1.0, 0.0, 0.0),
            (3.0, -4.0, 0.0),
            (1e-3, 2e-3, -5e-4),
            (1234.5, -987.25, 42.0),
            (-0.3, 0.8, -0.01),
        ];

        for (x, y, z) in samples {
            let single = <Vec3 as Vector3<f32>>::new(x as f32, y as f32, z as f32);
            assert_unit(Vector3::magnitude(Vector3::normalize(single)));

            let double = <DVec3 as Vector3<f64>>::new(x, y, z);
            assert_unit(Vector3::magnitude(Vector3::normalize(double)));
        }
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let n = Vector3::normalize(<Vec3 as Vector3<f32>>::ZERO);
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }
}
