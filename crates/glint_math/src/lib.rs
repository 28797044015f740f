// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod ray;
mod transform;

pub use ray::Ray;
pub use transform::{Transform, TransformError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec4_as_color() {
        // Colors alias rgba onto xyzw
        let c = Vec4::new(0.8, 0.4, 0.1, 1.0);
        assert_eq!(c.x, 0.8);
        assert_eq!(c.w, 1.0);
    }
}
