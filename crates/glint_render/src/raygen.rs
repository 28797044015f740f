//! Ray generation from a camera descriptor.

use glint_math::{Ray, Vec3};
use glint_scene::CameraDescriptor;

/// Build the world-space ray for pixel (px, py) on a width x height
/// canvas.
///
/// The pixel is mapped onto a virtual image plane at unit distance in
/// camera space: x and y scale with tan of the half-angle (x also by
/// aspect), z is -1 (the camera looks down its local -Z). Origin and
/// direction are then taken through the camera's world matrix, the
/// direction with w = 0 and renormalized afterwards.
pub fn pixel_ray(px: u32, py: u32, width: u32, height: u32, camera: &CameraDescriptor) -> Ray {
    let aspect = width as f32 / height as f32;
    let spread = camera.half_angle.tan();

    let x = spread * (2.0 * px as f32 / width as f32 - 1.0) * aspect;
    let y = spread * (1.0 - 2.0 * py as f32 / height as f32);
    let local = Vec3::new(x, y, -1.0).normalize();

    Ray::new(
        camera.to_world.transform_point3(Vec3::ZERO),
        camera.to_world.transform_vector3(local).normalize(),
    )
}
