//! Analytic ray-sphere intersection.
//!
//! Uses the geometric form: project the origin-to-center vector onto the ray,
//! then compare the perpendicular distance with the radius. A sphere whose
//! center lies behind the origin (negative projection) is always reported as
//! a miss, even when the origin is inside it. Shading relies on that, so it is
//! kept as is.

use rtb_core::Sphere;
use rtb_math::{Ray, Real, Vector3};

/// Projection of the center onto the ray and the squared perpendicular
/// distance, or `None` when the sphere cannot be hit.
#[inline]
fn project<T: Real>(sphere: &Sphere<T>, ray: &Ray<T>) -> Option<(T, T, T)> {
    let l = sphere.center() - ray.origin;
    let a = l.dot(ray.direction);
    if a < T::zero() {
        // opposite direction
        return None;
    }

    let b2 = l.dot(l) - (a * a);
    let r2 = sphere.radius() * sphere.radius();
    if b2 > r2 {
        // perpendicular > r
        return None;
    }

    Some((a, b2, r2))
}

/// Occlusion test: does the ray hit the sphere at all?
#[inline]
pub fn intersects<T: Real>(sphere: &Sphere<T>, ray: &Ray<T>) -> bool {
    project(sphere, ray).is_some()
}

/// Distance along the ray to the sphere.
///
/// Returns the near root, or the far root when the origin is inside the
/// sphere (near root negative).
#[inline]
pub fn intersect<T: Real>(sphere: &Sphere<T>, ray: &Ray<T>) -> Option<T> {
    let (a, b2, r2) = project(sphere, ray)?;

    let c = (r2 - b2).sqrt();
    let near = a - c;
    let far = a + c;
    Some(if near < T::zero() { far } else { near })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtb_math::{DVec3, Vec3};

    fn sphere_at(center: DVec3, radius: f64) -> Sphere<f64> {
        Sphere::new(center, radius, DVec3::ONE)
    }

    #[test]
    fn test_sphere_hit_near_root() {
        let sphere = sphere_at(DVec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let t = intersect(&sphere, &ray).unwrap();
        assert!((t - 4.0).abs() < 1e-12);
        assert!(intersects(&sphere, &ray));
    }

    #[test]
    fn test_origin_at_center_returns_far_root() {
        for dir in [DVec3::X, DVec3::NEG_Y, DVec3::new(1.0, 1.0, -1.0).normalize()] {
            let center = DVec3::new(3.0, -2.0, 7.0);
            let sphere = sphere_at(center, 2.5);
            let ray = Ray::new(center, dir);

            let t = intersect(&sphere, &ray).expect("origin inside must hit");
            assert!((t - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_origin_inside_reports_far_root() {
        let sphere = sphere_at(DVec3::ZERO, 2.0);
        let ray = Ray::new(DVec3::new(-1.0, 0.0, 0.0), DVec3::X);

        // center is ahead of the origin, near root is behind
        let t = intersect(&sphere, &ray).unwrap();
        assert!((t - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_behind_misses() {
        let sphere = sphere_at(DVec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        assert_eq!(intersect(&sphere, &ray), None);
        assert!(!intersects(&sphere, &ray));
    }

    #[test]
    fn test_perpendicular_miss() {
        let sphere = sphere_at(DVec3::new(0.0, 3.0, -5.0), 1.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        assert_eq!(intersect(&sphere, &ray), None);
    }

    #[test]
    fn test_origin_inside_facing_away_from_center_reports_miss() {
        // Known simplification: the origin is inside, but the center projects
        // behind it, so the exit point is not found.
        let sphere = sphere_at(DVec3::ZERO, 2.0);
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::X);

        assert_eq!(intersect(&sphere, &ray), None);
        assert!(!intersects(&sphere, &ray));
    }

    #[test]
    fn test_single_precision() {
        let sphere = Sphere::<f32>::new(Vec3::new(0.0, 0.0, -3.0), 0.5, Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = intersect(&sphere, &ray).unwrap();
        assert!((t - 2.5).abs() < 1e-6);
    }
}
