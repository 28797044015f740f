//! Scene graph model and traversal for glint.
//!
//! A scene is a tree of nodes: groups carrying transforms, exactly one
//! active camera, any number of lights, and geometry leaves. Rendering
//! passes walk the tree through the visitor seam in [`visitor`] while
//! the node data stays read-only.

mod extract;
mod node;
mod visitor;

pub use extract::{extract, CameraDescriptor, ExtractError, Extracted, DEFAULT_HALF_ANGLE};
pub use node::{
    AaBoxNode, CameraNode, GroupNode, LightNode, Node, PyramidNode, SphereNode, TexturedBoxNode,
};
pub use visitor::{traverse, SceneVisitor, TransformCtx};
