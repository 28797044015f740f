//! Depth-first scene traversal with a per-pass visitor seam.
//!
//! The walk itself never varies: pre-order, children in insertion
//! order, a world matrix and its inverse composed in lockstep. What
//! happens at each node is the part that differs between the
//! extraction pass and the ray pass, so that is the trait.
//!
//! The transform context is passed down by value instead of living in
//! mutable stacks on the visitor. Each recursive call owns its frame,
//! nothing needs clearing between rays, and the traversal is reentrant.

use glint_math::{Mat4, Ray, Transform, Vec3};

use crate::node::{
    AaBoxNode, CameraNode, LightNode, Node, PyramidNode, SphereNode, TexturedBoxNode,
};

/// Accumulated world transform at a point in the traversal.
///
/// `from_world` is the exact inverse of `to_world`, maintained by
/// composing tracked inverses in reverse order rather than inverting
/// `to_world` (cheaper, and avoids drift from repeated inversion).
#[derive(Debug, Clone, Copy)]
pub struct TransformCtx {
    pub to_world: Mat4,
    pub from_world: Mat4,
}

impl TransformCtx {
    /// Root context: identity in both directions.
    pub const IDENTITY: TransformCtx = TransformCtx {
        to_world: Mat4::IDENTITY,
        from_world: Mat4::IDENTITY,
    };

    /// Context one level deeper, under `local`.
    ///
    /// Forward matrices compose parent-first, inverses child-first.
    pub fn child(&self, local: &Transform) -> TransformCtx {
        TransformCtx {
            to_world: self.to_world * local.matrix(),
            from_world: local.inverse() * self.from_world,
        }
    }

    /// The world position of the local origin (a point, w = 1).
    pub fn origin_in_world(&self) -> Vec3 {
        self.to_world.transform_point3(Vec3::ZERO)
    }

    /// Map a world-space ray into the local frame.
    ///
    /// The direction is renormalized after the inverse transform so the
    /// parametric distances produced by local intersection tests stay
    /// meaningful.
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.from_world.transform_point3(ray.origin),
            self.from_world.transform_vector3(ray.direction).normalize(),
        )
    }
}

/// Per-node-type handlers invoked by [`traverse`].
///
/// Every handler defaults to a no-op; a pass overrides only the node
/// types it cares about, mirroring how most handlers in any one pass
/// are empty.
pub trait SceneVisitor {
    fn camera(&mut self, node: &CameraNode, ctx: &TransformCtx) {
        let _ = (node, ctx);
    }

    fn light(&mut self, node: &LightNode, ctx: &TransformCtx) {
        let _ = (node, ctx);
    }

    fn sphere(&mut self, node: &SphereNode, ctx: &TransformCtx) {
        let _ = (node, ctx);
    }

    fn aa_box(&mut self, node: &AaBoxNode, ctx: &TransformCtx) {
        let _ = (node, ctx);
    }

    fn pyramid(&mut self, node: &PyramidNode, ctx: &TransformCtx) {
        let _ = (node, ctx);
    }

    fn textured_box(&mut self, node: &TexturedBoxNode, ctx: &TransformCtx) {
        let _ = (node, ctx);
    }
}

/// Walk the graph depth-first, pre-order, from an identity root context.
pub fn traverse<V: SceneVisitor + ?Sized>(root: &Node, visitor: &mut V) {
    walk(root, visitor, &TransformCtx::IDENTITY);
}

fn walk<V: SceneVisitor + ?Sized>(node: &Node, visitor: &mut V, ctx: &TransformCtx) {
    match node {
        Node::Group(group) => {
            let child_ctx = ctx.child(&group.transform);
            for child in &group.children {
                walk(child, visitor, &child_ctx);
            }
        }
        Node::Camera(camera) => visitor.camera(camera, ctx),
        Node::Light(light) => visitor.light(light, ctx),
        Node::Sphere(sphere) => visitor.sphere(sphere, ctx),
        Node::AaBox(aa_box) => visitor.aa_box(aa_box, ctx),
        Node::Pyramid(pyramid) => visitor.pyramid(pyramid, ctx),
        Node::TexturedBox(textured_box) => visitor.textured_box(textured_box, ctx),
    }
}
