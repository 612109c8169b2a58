//! The fixed benchmark scene.
//!
//! A large ground sphere, three reflective spheres, a small glass sphere and
//! one bright light above and behind the camera.

use rtb_math::Real;

use crate::{Light, Scene, Sphere};

/// Build the benchmark scene at precision `T`.
pub fn reference_scene<T: Real>() -> Scene<T> {
    let r = T::from_f64;
    let v = T::vec3;

    let mut scene = Scene::new();

    // Ground
    scene.add_sphere(Sphere::new(v(0.0, -10002.0, -20.0), r(10000.0), v(0.8, 0.8, 0.8)));

    scene.add_sphere(
        Sphere::new(v(0.0, 2.0, -20.0), r(4.0), v(0.8, 0.5, 0.5)).with_reflection(r(0.5)),
    );
    scene.add_sphere(
        Sphere::new(v(5.0, 0.0, -15.0), r(2.0), v(0.3, 0.8, 0.8)).with_reflection(r(0.2)),
    );
    scene.add_sphere(
        Sphere::new(v(-5.0, 0.0, -15.0), r(2.0), v(0.3, 0.5, 0.8)).with_reflection(r(0.2)),
    );

    // Glass
    scene.add_sphere(
        Sphere::new(v(-2.0, -1.0, -10.0), r(1.0), v(0.1, 0.1, 0.1))
            .with_reflection(r(0.1))
            .with_transparency(r(0.8)),
    );

    scene.add_light(Light::new(v(-10.0, 20.0, 30.0), v(2.0, 2.0, 2.0)));

    scene
}
