// Re-export glam for convenience
pub use glam::{DVec3, Vec3};

// rtbench math types
mod precision;
mod ray;
mod vector;

pub use precision::{Precision, Real};
pub use ray::Ray;
pub use vector::Vector3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = <Vec3 as Vector3<f32>>::new(1.0, 2.0, 3.0);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert_eq!(v.z(), 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = f64::vec3(1.0, 2.0, 3.0);
        let b = f64::vec3(4.0, 5.0, 6.0);
        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, DVec3::new(4.0, 10.0, 18.0));
        assert_eq!(b / a, DVec3::new(4.0, 2.5, 2.0));
        assert_eq!(-a, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, DVec3::new(2.0, 2.5, 3.0));
    }
}
