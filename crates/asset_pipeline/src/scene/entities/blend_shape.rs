//! Blend shapes and their morph targets

use crate::foundation::math::Vec3;
use crate::scene::ids::{BlendShapeId, MeshId, MorphId, VertexId};

/// A set of morph targets deforming one mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlendShape {
    pub(crate) id: BlendShapeId,
    /// Display name
    pub name: String,
    /// Deformed mesh
    pub mesh_id: MeshId,
    /// Morph targets, must not be empty
    pub morph_ids: Vec<MorphId>,
}

impl BlendShape {
    /// Create a blend shape on `mesh_id` with no morphs yet
    pub fn new(name: impl Into<String>, mesh_id: MeshId) -> Self {
        Self {
            name: name.into(),
            mesh_id,
            ..Default::default()
        }
    }
}

impl_scene_entity!(BlendShape, BlendShapeId, BlendShape);

/// A sparse displacement of mesh vertices
///
/// `vertex_source_ids` and `vertex_positions` are parallel: the i-th
/// position replaces the position of the i-th source vertex at full weight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Morph {
    pub(crate) id: MorphId,
    /// Display name
    pub name: String,
    /// Owning blend shape
    pub blend_shape_id: BlendShapeId,
    /// Default weight in [0, 1]
    pub weight: f32,
    /// Mesh-local vertices this morph moves
    pub vertex_source_ids: Vec<VertexId>,
    /// Target positions parallel to `vertex_source_ids`
    pub vertex_positions: Vec<Vec3>,
}

impl Morph {
    /// Create an empty morph owned by `blend_shape_id`
    pub fn new(name: impl Into<String>, blend_shape_id: BlendShapeId, weight: f32) -> Self {
        Self {
            name: name.into(),
            blend_shape_id,
            weight,
            ..Default::default()
        }
    }

    /// Number of displaced vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_source_ids.len()
    }
}

impl_scene_entity!(Morph, MorphId, Morph);
