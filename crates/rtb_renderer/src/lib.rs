//! rtbench Renderer - Recursive Whitted-style CPU ray tracing
//!
//! Direct lighting with shadow rays, Fresnel-weighted mirror reflection and
//! Snell refraction, evaluated recursively up to a fixed depth.
//!
//! Every function here is generic over [`Real`], so one code path serves
//! both single and double precision renders.

mod bucket;
mod camera;
mod intersect;
mod renderer;
mod shader;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use intersect::{intersect, intersects};
pub use renderer::{
    render, render_into, shade_pixel, to_channel, FrameBuffer, RenderConfig, RenderError,
    RenderResult, Schedule,
};
pub use shader::{trace, REFRACTION_BIAS, SHADOW_BIAS};

/// Re-export the math and scene types used in the public API
pub use rtb_core::{Light, Scene, Sphere};
pub use rtb_math::{Precision, Ray, Real, Vector3};
