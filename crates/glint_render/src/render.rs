//! Frame rendering: per-pixel closest-hit traversal and shading.
//!
//! For every pixel the scene is re-traversed with a fresh transform
//! context; each primitive leaf tests the ray in its local space and
//! competes for the globally closest hit. No state survives from one
//! pixel to the next, which is what makes the row-parallel path safe
//! without any locking.

use glint_math::{Ray, Vec3, Vec4};
use glint_scene::{
    traverse, AaBoxNode, CameraDescriptor, Node, SceneVisitor, SphereNode, TransformCtx,
};
use rayon::prelude::*;
use thiserror::Error;

use crate::intersect::{hit_unit_box, hit_unit_sphere, Intersection};
use crate::phong::{shade, ShadingParams};
use crate::raygen::pixel_ray;

/// Errors from frame rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("canvas must have non-zero dimensions (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },
}

/// RGBA8 frame buffer, row-major, origin top-left.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a buffer filled with transparent black.
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    /// Get the RGBA bytes of pixel (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = 4 * (y * self.width + x) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = 4 * (y * self.width + x) as usize;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Borrow the raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Closest-hit pass for a single ray.
///
/// Only sphere and box leaves contribute geometry; groups only shape
/// the transform context, and the remaining variants keep their no-op
/// handlers exactly like the raster-only shapes do in the ray pass.
struct RayPass<'a> {
    ray: &'a Ray,
    best: Option<Intersection>,
    color: Option<Vec4>,
}

impl<'a> RayPass<'a> {
    fn new(ray: &'a Ray) -> Self {
        Self {
            ray,
            best: None,
            color: None,
        }
    }

    /// Lift a local-space hit to world space and race it against the
    /// current best.
    fn consider(&mut self, local: Option<Intersection>, ctx: &TransformCtx, color: Vec4) {
        let Some(local) = local else { return };

        let point = ctx.to_world.transform_point3(local.point);
        // Non-uniform scale breaks length preservation, renormalize
        let normal = ctx.to_world.transform_vector3(local.normal).normalize();
        // World-space parametric distance by projection onto the unit
        // world direction; no direction component ever divides
        let t = (point - self.ray.origin).dot(self.ray.direction);

        let candidate = Intersection::new(t, point, normal);
        let wins = match &self.best {
            Some(best) => candidate.closer_than(best),
            None => true,
        };
        if wins {
            self.best = Some(candidate);
            self.color = Some(color);
        }
    }
}

impl SceneVisitor for RayPass<'_> {
    fn sphere(&mut self, node: &SphereNode, ctx: &TransformCtx) {
        let local_ray = ctx.ray_to_local(self.ray);
        self.consider(hit_unit_sphere(&local_ray), ctx, node.color);
    }

    fn aa_box(&mut self, node: &AaBoxNode, ctx: &TransformCtx) {
        let local_ray = ctx.ray_to_local(self.ray);
        self.consider(hit_unit_box(&local_ray, node.outside), ctx, node.color);
    }
}

/// Cast one ray through the scene and return the pixel's RGBA bytes.
fn trace_pixel(
    root: &Node,
    ray: &Ray,
    lights: &[Vec3],
    eye: Vec3,
    params: &ShadingParams,
) -> [u8; 4] {
    let mut pass = RayPass::new(ray);
    traverse(root, &mut pass);

    match (pass.best, pass.color) {
        // No hit: fully transparent background
        (None, _) => [0, 0, 0, 0],
        // Hit without a resolved color should not occur, but an opaque
        // black pixel is better than an invisible surface
        (Some(_), None) => [0, 0, 0, 255],
        (Some(hit), Some(color)) => {
            let shaded = shade(color, &hit, lights, eye, params);
            [
                (shaded.x * 255.0) as u8,
                (shaded.y * 255.0) as u8,
                (shaded.z * 255.0) as u8,
                255,
            ]
        }
    }
}

fn check_canvas(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyCanvas { width, height });
    }
    Ok(())
}

/// Render a full frame, single-threaded.
///
/// Pure function of its inputs: identical scene, camera, lights, and
/// coefficients produce an identical buffer.
pub fn render_frame(
    root: &Node,
    camera: &CameraDescriptor,
    lights: &[Vec3],
    params: &ShadingParams,
    width: u32,
    height: u32,
) -> Result<FrameBuffer, RenderError> {
    check_canvas(width, height)?;
    log::debug!("rendering {}x{} frame, {} light(s)", width, height, lights.len());

    let mut frame = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let ray = pixel_ray(x, y, width, height, camera);
            frame.put(x, y, trace_pixel(root, &ray, lights, camera.eye, params));
        }
    }
    Ok(frame)
}

/// Render a full frame with rayon, one row band per task.
///
/// Rows are disjoint slices of the buffer, so workers never share a
/// pixel; the output is byte-identical to [`render_frame`].
pub fn render_frame_parallel(
    root: &Node,
    camera: &CameraDescriptor,
    lights: &[Vec3],
    params: &ShadingParams,
    width: u32,
    height: u32,
) -> Result<FrameBuffer, RenderError> {
    check_canvas(width, height)?;
    log::debug!(
        "rendering {}x{} frame in parallel, {} light(s)",
        width,
        height,
        lights.len()
    );

    let mut frame = FrameBuffer::new(width, height);
    let row_bytes = (width * 4) as usize;

    frame
        .data
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let ray = pixel_ray(x, y as u32, width, height, camera);
                let rgba = trace_pixel(root, &ray, lights, camera.eye, params);
                row[(x * 4) as usize..(x * 4 + 4) as usize].copy_from_slice(&rgba);
            }
        });

    Ok(frame)
}
