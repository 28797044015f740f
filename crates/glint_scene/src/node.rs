//! Scene graph node types.
//!
//! The node set is a closed variant enum: passes match exhaustively, so
//! adding a variant is a compile error everywhere a pass forgets to
//! handle it. Groups exclusively own their children (a tree, never a
//! DAG) and child insertion order is traversal order.

use glint_math::{Transform, Vec3, Vec4};

/// A node in the scene graph.
#[derive(Debug, Clone)]
pub enum Node {
    Group(GroupNode),
    Camera(CameraNode),
    Light(LightNode),
    Sphere(SphereNode),
    AaBox(AaBoxNode),
    Pyramid(PyramidNode),
    TexturedBox(TexturedBoxNode),
}

/// Interior node holding a transform and an ordered list of children.
#[derive(Debug, Clone)]
pub struct GroupNode {
    pub transform: Transform,
    pub children: Vec<Node>,
}

impl GroupNode {
    /// Create an empty group with the given transform.
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            children: Vec::new(),
        }
    }

    /// Add a child node. Children are visited in insertion order.
    pub fn add(&mut self, child: impl Into<Node>) -> &mut Self {
        self.children.push(child.into());
        self
    }
}

/// A camera placed in the graph by its ancestor transforms.
///
/// Exactly one camera is expected to be active at render time; the
/// extraction pass resolves which one (last active wins).
#[derive(Debug, Clone)]
pub struct CameraNode {
    pub active: bool,
}

impl CameraNode {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// A point light. Carries no geometry; its world position is the
/// origin transformed by the accumulated matrix at its tree location.
#[derive(Debug, Clone, Default)]
pub struct LightNode;

impl LightNode {
    pub fn new() -> Self {
        Self
    }
}

/// Unit sphere (radius 1, centered at the local origin).
#[derive(Debug, Clone)]
pub struct SphereNode {
    /// Surface color (rgba)
    pub color: Vec4,
}

impl SphereNode {
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

/// Axis-aligned unit box (edge length 1, centered at the local origin).
#[derive(Debug, Clone)]
pub struct AaBoxNode {
    /// Surface color (rgba)
    pub color: Vec4,
    /// When false the viewer sits inside the box and normals are
    /// flipped so interior faces light correctly.
    pub outside: bool,
}

impl AaBoxNode {
    pub fn new(color: Vec4, outside: bool) -> Self {
        Self { color, outside }
    }
}

/// Pyramid over a rectangular base. Rendered by the rasterization
/// engine only; the ray passes skip it.
#[derive(Debug, Clone)]
pub struct PyramidNode {
    /// Base extents (x, z) and apex height (y)
    pub base: Vec3,
    pub color: Vec4,
}

impl PyramidNode {
    pub fn new(base: Vec3, color: Vec4) -> Self {
        Self { base, color }
    }
}

/// Axis-aligned unit box with texture and optional normal map.
/// Rendered by the rasterization engine only; the ray passes skip it.
#[derive(Debug, Clone)]
pub struct TexturedBoxNode {
    pub texture: String,
    pub normal_map: Option<String>,
}

impl TexturedBoxNode {
    pub fn new(texture: impl Into<String>, normal_map: Option<String>) -> Self {
        Self {
            texture: texture.into(),
            normal_map,
        }
    }
}

impl From<GroupNode> for Node {
    fn from(n: GroupNode) -> Self {
        Node::Group(n)
    }
}

impl From<CameraNode> for Node {
    fn from(n: CameraNode) -> Self {
        Node::Camera(n)
    }
}

impl From<LightNode> for Node {
    fn from(n: LightNode) -> Self {
        Node::Light(n)
    }
}

impl From<SphereNode> for Node {
    fn from(n: SphereNode) -> Self {
        Node::Sphere(n)
    }
}

impl From<AaBoxNode> for Node {
    fn from(n: AaBoxNode) -> Self {
        Node::AaBox(n)
    }
}

impl From<PyramidNode> for Node {
    fn from(n: PyramidNode) -> Self {
        Node::Pyramid(n)
    }
}

impl From<TexturedBoxNode> for Node {
    fn from(n: TexturedBoxNode) -> Self {
        Node::TexturedBox(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Transform;

    #[test]
    fn test_group_preserves_insertion_order() {
        let mut group = GroupNode::new(Transform::IDENTITY);
        group.add(SphereNode::new(Vec4::ONE));
        group.add(LightNode::new());
        group.add(CameraNode::new(true));

        assert_eq!(group.children.len(), 3);
        assert!(matches!(group.children[0], Node::Sphere(_)));
        assert!(matches!(group.children[1], Node::Light(_)));
        assert!(matches!(group.children[2], Node::Camera(_)));
    }

    #[test]
    fn test_camera_active_toggle() {
        let mut camera = CameraNode::new(false);
        assert!(!camera.active);
        camera.set_active(true);
        assert!(camera.active);
    }
}
