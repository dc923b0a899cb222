//! Procedural box mesh

use crate::foundation::math::{Transform, Vec2, Vec3};
use crate::pipeline::{PipelineError, Producer};
use crate::scene::allocator::{hash_position, IdAllocator};
use crate::scene::entities::{Material, Mesh, Node};
use crate::scene::ids::VertexId;
use crate::scene::store::SceneStore;
use crate::scene::vertex_format::VertexFormat;

/// Outward normal, then the two in-plane axes with `u x v == normal`
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Corner signs along (u, v) and the matching texture coordinates, counter-clockwise
const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Generates an axis-aligned box centered on the origin
///
/// Each face gets its own four vertex instances so that normals stay flat;
/// the eight corner positions are shared through the instance map.
#[derive(Debug, Clone)]
pub struct BoxMeshProducer {
    name: String,
    half_extent: f32,
}

impl BoxMeshProducer {
    /// A box with the given half size along every axis
    pub fn new(name: impl Into<String>, half_extent: f32) -> Self {
        Self {
            name: name.into(),
            half_extent,
        }
    }

    fn build_mesh(&self) -> Result<Mesh, PipelineError> {
        let mut mesh = Mesh::new(self.name.clone());
        let mut vertex_ids = IdAllocator::<VertexId>::new();
        let mut uvs = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);

        for (normal, u_axis, v_axis) in FACES {
            let normal = Vec3::from(normal);
            let u_axis = Vec3::from(u_axis);
            let v_axis = Vec3::from(v_axis);
            let first = u32::try_from(mesh.vertex_instance_count()).unwrap_or(u32::MAX);

            for (su, sv) in CORNERS {
                let position = (normal + u_axis * su + v_axis * sv) * self.half_extent;
                let (vertex_id, reused) = vertex_ids.allocate(hash_position(&position))?;
                if !reused {
                    mesh.vertex_positions.push(position);
                }
                mesh.vertex_instance_to_vertex.push(vertex_id);
                mesh.vertex_normals.push(normal);
                uvs.push(Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5));
            }

            let corner = |offset: u32| VertexId::new(first + offset);
            triangles.push([corner(0), corner(1), corner(2)]);
            triangles.push([corner(2), corner(3), corner(0)]);
        }

        mesh.vertex_uv_sets.push(uvs);
        mesh.polygon_groups.push(triangles);
        mesh.vertex_format = VertexFormat::position_normal_uv();
        mesh.update_aabb();
        Ok(mesh)
    }
}

impl Producer for BoxMeshProducer {
    fn execute(&mut self, store: &mut SceneStore) -> Result<(), PipelineError> {
        let material_name = format!("{}_material", self.name);
        let material_id = match store.materials.find_by_name(&material_name) {
            Some(material) => material.id,
            None => store.materials.add(Material::new(material_name)),
        };

        let mut mesh = self.build_mesh()?;
        mesh.material_ids.push(material_id);
        log::debug!(
            "Box \"{}\": {} positions, {} instances, {} triangles",
            self.name,
            mesh.vertex_count(),
            mesh.vertex_instance_count(),
            mesh.polygon_count()
        );
        let mesh_id = store.meshes.add(mesh);

        let mut node = Node::new(self.name.clone()).with_transform(Transform::identity());
        node.mesh_ids.push(mesh_id);
        store.add_root_node(node);

        if store.name.is_empty() {
            store.name.clone_from(&self.name);
        }
        Ok(())
    }
}
