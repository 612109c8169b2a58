//! Recursive radiance evaluation.
//!
//! [`trace`] returns the unclamped color seen along a ray: direct lighting
//! from every unoccluded point light, plus Fresnel-weighted reflection and
//! refraction traced recursively until `max_depth` is reached.

use rtb_core::{Scene, Sphere};
use rtb_math::{Ray, Real, Vector3};

use crate::intersect::{intersect, intersects};
use crate::RenderConfig;

/// Offset along the normal for shadow and reflection ray origins.
pub const SHADOW_BIAS: f64 = 1e-5;

/// Offset against the normal for refraction ray origins.
pub const REFRACTION_BIAS: f64 = 1e-4;

/// Index of refraction of every transparent sphere (air to glass).
const GLASS_IOR: f64 = 1.5;

/// Exponent of the Schlick-style Fresnel term.
const FRESNEL_POWER: i32 = 5;

/// Compute the color seen along a ray.
///
/// `depth` is the number of bounces already taken; primary rays start at 0.
/// Degenerate geometry yields NaN or infinite components rather than an
/// error; those are clamped when the pixel is written.
pub fn trace<T: Real>(ray: &Ray<T>, scene: &Scene<T>, depth: u32, config: &RenderConfig) -> T::Vec3 {
    let Some((nearest, sphere)) = nearest_hit(ray, scene) else {
        return T::Vec3::ZERO;
    };

    let point_of_hit = ray.at(nearest);
    let mut normal = sphere.normal_at(point_of_hit);
    let mut inside = false;

    // Exiting the sphere: shade against the inner surface
    if normal.dot(ray.direction) > T::zero() {
        inside = true;
        normal = -normal;
    }

    let reflection_ratio = sphere.reflection();
    let mut color = direct_light(scene, sphere, point_of_hit, normal);

    let ray_normal_dot = ray.direction.dot(normal);
    let fresnel = fresnel_weight(reflection_ratio, ray_normal_dot);

    if depth < config.max_depth && reflection_ratio > T::zero() {
        let reflected = Ray::new(
            point_of_hit + normal * T::from_f64(SHADOW_BIAS),
            reflect(ray.direction, normal, ray_normal_dot),
        );
        let reflection = trace(&reflected, scene, depth + 1, config);
        color += reflection * fresnel;
    }

    if depth < config.max_depth && sphere.transparency() > T::zero() {
        // Total internal reflection contributes nothing here
        if let Some(direction) = refract::<T>(ray.direction, normal, inside) {
            let refracted = Ray::new(point_of_hit - normal * T::from_f64(REFRACTION_BIAS), direction);
            let refraction = trace(&refracted, scene, depth + 1, config);
            color += refraction * (T::one() - fresnel) * sphere.transparency();
        }
    }

    color
}

/// Nearest sphere along the ray, in scene order on ties.
fn nearest_hit<'a, T: Real>(ray: &Ray<T>, scene: &'a Scene<T>) -> Option<(T, &'a Sphere<T>)> {
    let mut nearest = T::max_value();
    let mut hit = None;

    for sphere in scene.spheres() {
        if let Some(distance) = intersect(sphere, ray) {
            if distance < nearest {
                nearest = distance;
                hit = Some(sphere);
            }
        }
    }

    hit.map(|sphere| (nearest, sphere))
}

/// Any sphere in the way of the shadow ray, at any distance.
fn occluded<T: Real>(ray: &Ray<T>, scene: &Scene<T>) -> bool {
    scene.spheres().iter().any(|sphere| intersects(sphere, ray))
}

/// Lambertian contribution of all visible lights.
///
/// Scaled by `1 - reflection` since a mirror keeps no diffuse albedo.
fn direct_light<T: Real>(scene: &Scene<T>, sphere: &Sphere<T>, point: T::Vec3, normal: T::Vec3) -> T::Vec3 {
    let mut color = T::Vec3::ZERO;
    let diffuse = T::one() - sphere.reflection();

    for light in scene.lights() {
        let light_direction = (light.position - point).normalize();
        let shadow_ray = Ray::new(point + normal * T::from_f64(SHADOW_BIAS), light_direction);

        if !occluded(&shadow_ray, scene) {
            let cosine = T::zero().max(normal.dot(light_direction));
            color += light.color * cosine * sphere.color() * diffuse;
        }
    }

    color
}

/// Schlick-style Fresnel weight, `reflection` at normal incidence rising to 1
/// at grazing angles.
#[inline]
fn fresnel_weight<T: Real>(reflection: T, ray_normal_dot: T) -> T {
    let facing = T::zero().max(-ray_normal_dot);
    reflection + ((T::one() - reflection) * (T::one() - facing).powi(FRESNEL_POWER))
}

/// Mirror `direction` about `normal`.
#[inline]
fn reflect<T: Real>(direction: T::Vec3, normal: T::Vec3, ray_normal_dot: T) -> T::Vec3 {
    direction - normal * T::from_f64(2.0) * ray_normal_dot
}

/// Snell refraction through a glass surface.
///
/// `normal` faces the incoming ray. Returns `None` on total internal
/// reflection.
#[inline]
fn refract<T: Real>(direction: T::Vec3, normal: T::Vec3, inside: bool) -> Option<T::Vec3> {
    let glass = T::from_f64(GLASS_IOR);
    let ior = if inside { T::one() / glass } else { glass };
    let eta = T::one() / ior;

    let cos_i = -direction.dot(normal);
    let tangent = (direction + normal * cos_i) * eta;
    let sin_t1_2 = T::one() - (cos_i * cos_i);
    let sin_t2_2 = sin_t1_2 * (eta * eta);
    if sin_t2_2 < T::one() {
        let cos_t = (T::one() - sin_t2_2).sqrt();
        Some(tangent - normal * cos_t)
    } else {
        None
    }
}
