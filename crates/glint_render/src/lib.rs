//! CPU raytracer over glint scene graphs.
//!
//! One ray per pixel, brute force over the primitive leaves, closest
//! hit shaded with Phong. Deterministic: the same scene, camera, and
//! lights always produce the same frame.

mod intersect;
mod phong;
mod raygen;
mod render;

pub use intersect::{hit_unit_box, hit_unit_sphere, Intersection};
pub use phong::{shade, ShadingParams};
pub use raygen::pixel_ray;
pub use render::{render_frame, render_frame_parallel, FrameBuffer, RenderError};

/// Re-export common math types
pub use glint_math::{Ray, Vec3, Vec4};
