//! Triangle meshes with split-vertex topology
//!
//! Positions are stored once per unique vertex. Everything else (normals,
//! tangents, UVs, colors) is stored per *vertex instance*, a face corner
//! that maps back to a vertex through `vertex_instance_to_vertex`. A mesh
//! without that mapping stores one instance per vertex.
//!
//! Polygons index vertex instances when the mapping is present, otherwise
//! vertices directly.

use crate::foundation::math::{Aabb, Vec2, Vec3, Vec4};
use crate::scene::ids::{BlendShapeId, MaterialId, MeshId, SkinId, VertexId};
use crate::scene::vertex_format::VertexFormat;

/// A triangle, as three vertex (instance) ids
pub type Polygon = [VertexId; 3];

/// Triangles that share one material slot
pub type PolygonGroup = Vec<Polygon>;

/// Triangle mesh geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub(crate) id: MeshId,
    /// Display name
    pub name: String,
    /// Unique vertex positions
    pub vertex_positions: Vec<Vec3>,
    /// Vertex instance -> vertex mapping, empty if instances are vertices
    pub vertex_instance_to_vertex: Vec<VertexId>,
    /// Per-instance normals
    pub vertex_normals: Vec<Vec3>,
    /// Per-instance tangents
    pub vertex_tangents: Vec<Vec3>,
    /// Per-instance bitangents
    pub vertex_bitangents: Vec<Vec3>,
    /// Per-instance texture coordinate sets
    pub vertex_uv_sets: Vec<Vec<Vec2>>,
    /// Per-instance color sets
    pub vertex_color_sets: Vec<Vec<Vec4>>,
    /// Triangles grouped by material slot
    pub polygon_groups: Vec<PolygonGroup>,
    /// One material per polygon group
    pub material_ids: Vec<MaterialId>,
    /// Blend shapes deforming this mesh
    pub blend_shape_ids: Vec<BlendShapeId>,
    /// Skins binding this mesh to skeletons
    pub skin_ids: Vec<SkinId>,
    /// Object-space bounds
    pub aabb: Aabb,
    /// Attributes the producer filled in
    pub vertex_format: VertexFormat,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of unique vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_positions.len()
    }

    /// Number of vertex instances
    pub fn vertex_instance_count(&self) -> usize {
        self.vertex_instance_to_vertex.len()
    }

    /// True if attributes are addressed through vertex instances
    pub fn has_vertex_instances(&self) -> bool {
        !self.vertex_instance_to_vertex.is_empty()
    }

    /// Number of entries in a vertex buffer built from this mesh
    pub fn buffer_vertex_count(&self) -> usize {
        if self.has_vertex_instances() {
            self.vertex_instance_count()
        } else {
            self.vertex_count()
        }
    }

    /// Vertex that a vertex instance refers to
    pub fn vertex_for_instance(&self, instance: usize) -> Option<VertexId> {
        self.vertex_instance_to_vertex.get(instance).copied()
    }

    /// Total number of triangles across all groups
    pub fn polygon_count(&self) -> usize {
        self.polygon_groups.iter().map(Vec::len).sum()
    }

    /// Recompute the bounding box from positions
    pub fn update_aabb(&mut self) {
        self.aabb = Aabb::from_points(self.vertex_positions.iter());
    }
}

impl_scene_entity!(Mesh, MeshId, Mesh);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_vertex_count_follows_instances() {
        let mut mesh = Mesh::new("quad");
        mesh.vertex_positions = vec![Vec3::zeros(); 4];
        assert_eq!(mesh.buffer_vertex_count(), 4);

        mesh.vertex_instance_to_vertex = (0..6).map(|i| VertexId::new(i % 4)).collect();
        assert_eq!(mesh.buffer_vertex_count(), 6);
        assert_eq!(mesh.vertex_for_instance(5), Some(VertexId::new(1)));
    }

    #[test]
    fn test_update_aabb() {
        let mut mesh = Mesh::new("line");
        mesh.vertex_positions = vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 0.0)];
        mesh.update_aabb();

        assert_eq!(mesh.aabb.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(mesh.aabb.max, Vec3::new(2.0, 1.0, 0.0));
    }
}
