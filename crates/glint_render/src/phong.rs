//! Phong illumination.
//!
//! Local shading only: ambient plus per-light diffuse and specular
//! terms, summed over all lights and clamped per channel. No shadows,
//! no reflection, no refraction.

use glint_math::{Vec3, Vec4};

use crate::intersect::Intersection;

/// Phong coefficients.
#[derive(Debug, Clone, Copy)]
pub struct ShadingParams {
    /// Specular exponent
    pub shininess: f32,
    /// Ambient coefficient (kA)
    pub ambient: f32,
    /// Diffuse coefficient (kD)
    pub diffuse: f32,
    /// Specular coefficient (kS)
    pub specular: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            shininess: 10.0,
            ambient: 0.8,
            diffuse: 0.5,
            specular: 0.5,
        }
    }
}

/// Shade a surface point.
///
/// out = kA*color + sum over lights of
///       kD*color*max(0, N.L) + kS*max(0, R.V)^shininess
///
/// L is the unit vector to the light, R the reflection of -L about the
/// normal, V the unit vector to the eye. The specular term is white
/// (not tinted by the surface color). Each RGB channel is clamped to
/// [0, 1] after the sum; alpha is fully opaque.
pub fn shade(
    color: Vec4,
    hit: &Intersection,
    lights: &[Vec3],
    eye: Vec3,
    params: &ShadingParams,
) -> Vec4 {
    let base = color.truncate();
    let normal = hit.normal;

    let mut out = params.ambient * base;
    let view = (eye - hit.point).normalize();

    for &light in lights {
        let to_light = (light - hit.point).normalize();

        let n_dot_l = normal.dot(to_light).max(0.0);
        out += params.diffuse * base * n_dot_l;

        // R = reflection of -L about N = 2(N.L)N - L
        let reflected = 2.0 * normal.dot(to_light) * normal - to_light;
        let r_dot_v = reflected.dot(view).max(0.0);
        out += Vec3::splat(params.specular * r_dot_v.powf(params.shininess));
    }

    out.clamp(Vec3::ZERO, Vec3::ONE).extend(1.0)
}
