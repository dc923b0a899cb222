//! Transform hierarchy nodes

use crate::foundation::math::Transform;
use crate::scene::ids::{MeshId, NodeId};

/// A node in the scene hierarchy
///
/// Parent and children are referenced by id. A root node has an invalid
/// parent id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub(crate) id: NodeId,
    /// Display name
    pub name: String,
    /// Parent node, invalid for roots
    pub parent_id: NodeId,
    /// Child nodes in source order
    pub child_ids: Vec<NodeId>,
    /// Meshes drawn at this node
    pub mesh_ids: Vec<MeshId>,
    /// Local transform relative to the parent
    pub transform: Transform,
}

impl Node {
    /// Create a root node with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// True if the node has no parent
    pub fn is_root(&self) -> bool {
        !self.parent_id.is_valid()
    }
}

impl_scene_entity!(Node, NodeId, Node);
