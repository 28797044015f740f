//! Camera and light extraction pass.
//!
//! Runs once per frame before any ray is cast: resolves the single
//! active camera into world space and collects every light position in
//! discovery order. Rendering cannot start until this pass has
//! completed.

use glint_math::{Mat4, Vec3};
use thiserror::Error;

use crate::node::{CameraNode, LightNode, Node};
use crate::visitor::{traverse, SceneVisitor, TransformCtx};

/// Half-angle of the image-plane field of view used when a camera does
/// not override it (60 degrees).
pub const DEFAULT_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

/// Errors from the extraction pass.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Rendering without a camera would force an arbitrary default and
    /// silently produce a plausible but wrong frame, so this is fatal.
    #[error("scene graph has no active camera")]
    NoActiveCamera,
}

/// The resolved active camera in world space.
#[derive(Debug, Clone, Copy)]
pub struct CameraDescriptor {
    /// World position of the camera origin
    pub eye: Vec3,
    /// World point the camera looks at (local -Z at unit distance)
    pub look: Vec3,
    /// World up direction (local +Y, w = 0)
    pub up: Vec3,
    /// Half-angle of the field of view in radians
    pub half_angle: f32,
    /// Full local-to-world matrix for ray generation
    pub to_world: Mat4,
}

/// Output of [`extract`]: one camera, all lights in discovery order.
#[derive(Debug, Clone)]
pub struct Extracted {
    pub camera: CameraDescriptor,
    pub lights: Vec<Vec3>,
}

struct ExtractVisitor {
    camera: Option<CameraDescriptor>,
    lights: Vec<Vec3>,
}

impl SceneVisitor for ExtractVisitor {
    fn camera(&mut self, node: &CameraNode, ctx: &TransformCtx) {
        if !node.active {
            return;
        }
        if self.camera.is_some() {
            log::warn!("multiple active cameras; keeping the last one visited");
        }
        self.camera = Some(CameraDescriptor {
            eye: ctx.origin_in_world(),
            look: ctx.to_world.transform_point3(Vec3::new(0.0, 0.0, -1.0)),
            up: ctx.to_world.transform_vector3(Vec3::Y),
            half_angle: DEFAULT_HALF_ANGLE,
            to_world: ctx.to_world,
        });
    }

    fn light(&mut self, _node: &LightNode, ctx: &TransformCtx) {
        // Duplicates by position are allowed, no deduplication
        self.lights.push(ctx.origin_in_world());
    }
}

/// Traverse the graph once, resolving the active camera and all lights.
pub fn extract(root: &Node) -> Result<Extracted, ExtractError> {
    let mut visitor = ExtractVisitor {
        camera: None,
        lights: Vec::new(),
    };
    traverse(root, &mut visitor);

    let camera = visitor.camera.ok_or(ExtractError::NoActiveCamera)?;
    log::debug!(
        "extracted camera at {:?}, {} light(s)",
        camera.eye,
        visitor.lights.len()
    );

    Ok(Extracted {
        camera,
        lights: visitor.lights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::GroupNode;
    use glint_math::Transform;

    fn camera_under(offset: Vec3, active: bool) -> GroupNode {
        let mut group = GroupNode::new(Transform::translation(offset));
        group.add(CameraNode::new(active));
        group
    }

    #[test]
    fn test_no_active_camera_is_fatal() {
        let mut root = GroupNode::new(Transform::IDENTITY);
        root.add(camera_under(Vec3::ZERO, false));
        root.add(LightNode::new());

        let err = extract(&Node::from(root)).unwrap_err();
        assert!(matches!(err, ExtractError::NoActiveCamera));
    }

    #[test]
    fn test_last_active_camera_wins() {
        let mut root = GroupNode::new(Transform::IDENTITY);
        root.add(camera_under(Vec3::new(9.0, 9.0, 9.0), false));
        root.add(camera_under(Vec3::new(0.0, 0.0, 2.0), true));

        let extracted = extract(&Node::from(root)).unwrap();
        assert!((extracted.camera.eye - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_camera_axes_in_world_space() {
        let mut root = GroupNode::new(Transform::translation(Vec3::new(0.0, 0.0, 2.0)));
        root.add(CameraNode::new(true));

        let camera = extract(&Node::from(root)).unwrap().camera;
        // Looks down local -Z from its world position
        assert!((camera.look - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
        // Up is a direction: translation must not move it
        assert!((camera.up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_lights_in_discovery_order_with_duplicates() {
        let mut a = GroupNode::new(Transform::translation(Vec3::new(1.0, 0.0, 0.0)));
        a.add(LightNode::new());
        let mut b = GroupNode::new(Transform::translation(Vec3::new(0.0, 1.0, 0.0)));
        b.add(LightNode::new());
        let mut c = GroupNode::new(Transform::translation(Vec3::new(1.0, 0.0, 0.0)));
        c.add(LightNode::new());

        let mut root = GroupNode::new(Transform::IDENTITY);
        root.add(a);
        root.add(b);
        root.add(c);
        root.add(camera_under(Vec3::ZERO, true));

        let lights = extract(&Node::from(root)).unwrap().lights;
        assert_eq!(lights.len(), 3);
        assert!((lights[0] - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        assert!((lights[1] - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        // Same position as the first light, deliberately kept
        assert!((lights[2] - lights[0]).length() < 1e-6);
    }

    #[test]
    fn test_empty_light_list_is_valid() {
        let mut root = GroupNode::new(Transform::IDENTITY);
        root.add(CameraNode::new(true));

        let extracted = extract(&Node::from(root)).unwrap();
        assert!(extracted.lights.is_empty());
    }
}
