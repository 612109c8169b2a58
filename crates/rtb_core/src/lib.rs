//! rtbench Core - Scene description for the ray tracing benchmark.
//!
//! This crate provides:
//!
//! - **Scene types**: `Sphere`, `Light`, `Scene`
//! - **Validation**: construction-time checks reported as `SceneError`
//! - **Reference scene**: the fixed five-sphere, one-light benchmark scene
//!
//! # Example
//!
//! ```
//! use rtb_core::reference_scene;
//!
//! let scene = reference_scene::<f32>();
//! scene.validate().unwrap();
//! assert_eq!(scene.spheres().len(), 5);
//! ```

pub mod reference;
pub mod scene;

// Re-export commonly used types
pub use reference::reference_scene;
pub use scene::{Light, Scene, SceneError, Sphere};
