//! Interleaved vertex and index buffers for upload to the GPU
//!
//! The builder reads a finished mesh and packs the attributes a renderer
//! asks for, in the order it asks for them, with no padding and no header.
//! Output uses the host byte order since it is consumed in-process.
//!
//! Attributes other than position are stored per vertex instance, so a
//! mesh with an instance map produces one buffer entry per instance.
//! Position and skinning data are stored per unique vertex and are looked
//! up through the map.

use crate::scene::entities::{Bone, Mesh, Skin};
use crate::scene::ids::MeshId;
use crate::scene::store::SceneStore;
use crate::scene::vertex_format::{AttributeValueType, VertexAttributeLayout, VertexAttributeType, VertexFormat};
use std::collections::HashMap;
use thiserror::Error;

/// Bone index written into unused influence slots
pub const UNUSED_BONE_INDEX: u16 = 127;

/// Maximum number of bones influencing one vertex
pub const MAX_INFLUENCES: usize = 4;

/// Largest vertex count addressable with 16-bit indices
pub const MAX_INDEX16_VERTICES: usize = u16::MAX as usize + 1;

/// Buffer building errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// The layout asks for an attribute the mesh has no data for
    #[error("mesh has no {kind} data for vertex instance {instance}")]
    MissingAttribute {
        /// Requested attribute
        kind: VertexAttributeType,
        /// First instance without data
        instance: usize,
    },

    /// The layout describes an attribute shape the builder cannot produce
    #[error("cannot emit {kind} as {count} x {value_type}")]
    UnsupportedAttributeLayout {
        /// Requested attribute
        kind: VertexAttributeType,
        /// Requested scalar type
        value_type: AttributeValueType,
        /// Requested component count
        count: u8,
    },

    /// Bone attributes were requested without a skin
    #[error("layout requests {0} but no skin was provided")]
    SkinRequired(VertexAttributeType),

    /// A skin names a bone the skeleton does not have
    #[error("skin references bone \"{bone}\" which is not in the skeleton")]
    SkinSkeletonMismatch {
        /// Bone name from the skin
        bone: String,
    },

    /// A vertex has more influences than a buffer entry can hold
    #[error("vertex {vertex} has {count} bone influences, at most 4 are supported")]
    TooManyInfluences {
        /// Vertex index
        vertex: usize,
        /// Number of influences
        count: usize,
    },

    /// A skeleton too large for 16-bit bone indices
    #[error("skeleton has {0} bones, which does not fit 16-bit bone indices")]
    TooManyBones(usize),

    /// The skin has no influence list for a vertex of the mesh
    #[error("skin has no influences for vertex {0}")]
    MissingSkinVertex(usize),

    /// A skin vertex has a different number of bone names and weights
    #[error("skin vertex {vertex} has {names} bone names but {weights} weights")]
    SkinArraysMismatch {
        /// Vertex index
        vertex: usize,
        /// Number of bone names
        names: usize,
        /// Number of weights
        weights: usize,
    },

    /// A polygon or instance map entry points past the vertex data
    #[error("vertex index {index} is out of range for {count} vertices")]
    VertexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of addressable vertices
        count: usize,
    },

    /// The packed size differs from the pre-computed size
    #[error("buffer size mismatch: expected {expected} bytes, wrote {actual}")]
    SizeMismatch {
        /// Size computed from the layout
        expected: usize,
        /// Bytes actually written
        actual: usize,
    },

    /// The mesh is not in the store
    #[error("mesh {0} not found")]
    MeshNotFound(MeshId),
}

/// Width of the entries of an index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// 16-bit unsigned indices
    Uint16,
    /// 32-bit unsigned indices
    Uint32,
}

impl IndexFormat {
    /// Bytes per index
    pub const fn size(self) -> usize {
        match self {
            Self::Uint16 => 2,
            Self::Uint32 => 4,
        }
    }
}

/// Index width used for a mesh
///
/// 16-bit unless the mesh has more buffer entries than 16 bits can address,
/// or 32-bit is forced.
pub fn index_format(mesh: &Mesh, force_index32: bool) -> IndexFormat {
    if force_index32 || mesh.buffer_vertex_count() > MAX_INDEX16_VERTICES {
        IndexFormat::Uint32
    } else {
        IndexFormat::Uint16
    }
}

/// Resolved influences of one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
struct Influences {
    indices: [u16; MAX_INFLUENCES],
    weights: [f32; MAX_INFLUENCES],
}

impl Default for Influences {
    fn default() -> Self {
        Self {
            indices: [UNUSED_BONE_INDEX; MAX_INFLUENCES],
            weights: [0.0; MAX_INFLUENCES],
        }
    }
}

fn check_layout(layout: &VertexAttributeLayout) -> Result<(), BufferError> {
    use AttributeValueType::{Float32, Uint16, Uint32};
    use VertexAttributeType::{Bitangent, BoneIndex, BoneWeight, Color, Normal, Position, Tangent, UV};

    let supported = matches!(
        (layout.kind, layout.value_type, layout.count),
        (Position | Normal | Tangent | Bitangent, Float32, 3)
            | (UV, Float32, 2)
            | (Color, Float32, 4)
            | (BoneIndex, Uint16 | Uint32, 4)
            | (BoneWeight, Float32, 4)
    );
    if supported {
        Ok(())
    } else {
        Err(BufferError::UnsupportedAttributeLayout {
            kind: layout.kind,
            value_type: layout.value_type,
            count: layout.count,
        })
    }
}

fn vertex_of(mesh: &Mesh, instance: usize) -> Result<usize, BufferError> {
    let vertex = match mesh.vertex_for_instance(instance) {
        Some(vertex) => vertex.index(),
        None => instance,
    };
    if vertex < mesh.vertex_count() {
        Ok(vertex)
    } else {
        Err(BufferError::VertexOutOfRange {
            index: u32::try_from(vertex).unwrap_or(u32::MAX),
            count: mesh.vertex_count(),
        })
    }
}

fn push_floats(buffer: &mut Vec<u8>, values: &[f32]) {
    buffer.extend_from_slice(bytemuck::cast_slice(values));
}

fn per_instance<T>(data: Option<&[T]>, kind: VertexAttributeType, instance: usize) -> Result<&T, BufferError> {
    data.and_then(|values| values.get(instance))
        .ok_or(BufferError::MissingAttribute { kind, instance })
}

fn push_attribute(
    buffer: &mut Vec<u8>,
    mesh: &Mesh,
    layout: &VertexAttributeLayout,
    instance: usize,
    vertex: usize,
    influences: Option<&Influences>,
) -> Result<(), BufferError> {
    let kind = layout.kind;
    match kind {
        VertexAttributeType::Position => {
            let position = per_instance(Some(mesh.vertex_positions.as_slice()), kind, vertex)?;
            push_floats(buffer, position.as_slice());
        }
        VertexAttributeType::Normal => {
            push_floats(buffer, per_instance(Some(mesh.vertex_normals.as_slice()), kind, instance)?.as_slice());
        }
        VertexAttributeType::Tangent => {
            push_floats(buffer, per_instance(Some(mesh.vertex_tangents.as_slice()), kind, instance)?.as_slice());
        }
        VertexAttributeType::Bitangent => {
            push_floats(buffer, per_instance(Some(mesh.vertex_bitangents.as_slice()), kind, instance)?.as_slice());
        }
        VertexAttributeType::UV => {
            let uvs = mesh.vertex_uv_sets.first().map(Vec::as_slice);
            push_floats(buffer, per_instance(uvs, kind, instance)?.as_slice());
        }
        VertexAttributeType::Color => {
            let colors = mesh.vertex_color_sets.first().map(Vec::as_slice);
            push_floats(buffer, per_instance(colors, kind, instance)?.as_slice());
        }
        VertexAttributeType::BoneIndex => {
            let influences = influences.ok_or(BufferError::SkinRequired(kind))?;
            if layout.value_type == AttributeValueType::Uint32 {
                let wide = influences.indices.map(u32::from);
                buffer.extend_from_slice(bytemuck::cast_slice(&wide[..]));
            } else {
                buffer.extend_from_slice(bytemuck::cast_slice(&influences.indices[..]));
            }
        }
        VertexAttributeType::BoneWeight => {
            let influences = influences.ok_or(BufferError::SkinRequired(kind))?;
            push_floats(buffer, &influences.weights);
        }
    }
    Ok(())
}

fn pack_vertices(
    mesh: &Mesh,
    layout: &VertexFormat,
    influences: Option<&[Influences]>,
) -> Result<Vec<u8>, BufferError> {
    for attribute in layout.layouts() {
        check_layout(attribute)?;
    }

    let count = mesh.buffer_vertex_count();
    let expected = count * layout.stride();
    let mut buffer = Vec::with_capacity(expected);

    for instance in 0..count {
        let vertex = vertex_of(mesh, instance)?;
        let vertex_influences = influences.and_then(|all| all.get(vertex));
        for attribute in layout.layouts() {
            push_attribute(&mut buffer, mesh, attribute, instance, vertex, vertex_influences)?;
        }
    }

    if buffer.len() == expected {
        Ok(buffer)
    } else {
        Err(BufferError::SizeMismatch {
            expected,
            actual: buffer.len(),
        })
    }
}

/// Pack the attributes of `layout` for every buffer entry of a static mesh
pub fn build_vertex_buffer(mesh: &Mesh, layout: &VertexFormat) -> Result<Vec<u8>, BufferError> {
    for kind in [VertexAttributeType::BoneIndex, VertexAttributeType::BoneWeight] {
        if layout.contains(kind) {
            return Err(BufferError::SkinRequired(kind));
        }
    }
    pack_vertices(mesh, layout, None)
}

fn resolve_influences(mesh: &Mesh, skin: &Skin, bones: &[&Bone]) -> Result<Vec<Influences>, BufferError> {
    if bones.len() > usize::from(u16::MAX) {
        return Err(BufferError::TooManyBones(bones.len()));
    }
    let mut bone_indices: HashMap<&str, u16> = HashMap::with_capacity(bones.len());
    // A repeated bone name resolves to its last occurrence
    for (index, bone) in bones.iter().enumerate() {
        bone_indices.insert(bone.name.as_str(), u16::try_from(index).unwrap_or(u16::MAX));
    }

    (0..mesh.vertex_count())
        .map(|vertex| {
            let names = skin
                .vertex_bone_names
                .get(vertex)
                .ok_or(BufferError::MissingSkinVertex(vertex))?;
            let weights = skin
                .vertex_bone_weights
                .get(vertex)
                .ok_or(BufferError::MissingSkinVertex(vertex))?;
            if names.len() != weights.len() {
                return Err(BufferError::SkinArraysMismatch {
                    vertex,
                    names: names.len(),
                    weights: weights.len(),
                });
            }
            if names.len() > MAX_INFLUENCES {
                return Err(BufferError::TooManyInfluences {
                    vertex,
                    count: names.len(),
                });
            }

            let mut influences = Influences::default();
            for (slot, (name, &weight)) in names.iter().zip(weights).enumerate() {
                influences.indices[slot] = *bone_indices
                    .get(name.as_str())
                    .ok_or_else(|| BufferError::SkinSkeletonMismatch { bone: name.clone() })?;
                influences.weights[slot] = weight;
            }
            Ok(influences)
        })
        .collect()
}

/// Pack the attributes of `layout` for a skinned mesh
///
/// Bone indices refer to positions in `bones`, which must be the skin's
/// skeleton bone list in order. Returns `Ok(None)` when the layout does not
/// ask for both bone indices and bone weights.
pub fn build_skeletal_vertex_buffer(
    mesh: &Mesh,
    layout: &VertexFormat,
    skin: &Skin,
    bones: &[&Bone],
) -> Result<Option<Vec<u8>>, BufferError> {
    if !layout.contains(VertexAttributeType::BoneIndex) || !layout.contains(VertexAttributeType::BoneWeight) {
        return Ok(None);
    }
    let influences = resolve_influences(mesh, skin, bones)?;
    pack_vertices(mesh, layout, Some(&influences)).map(Some)
}

/// One index buffer per polygon group, in group order
pub fn build_index_buffers(mesh: &Mesh, force_index32: bool) -> Result<Vec<Vec<u8>>, BufferError> {
    let format = index_format(mesh, force_index32);
    let count = mesh.buffer_vertex_count();

    mesh.polygon_groups
        .iter()
        .map(|group| {
            let expected = group.len() * 3 * format.size();
            let mut buffer = Vec::with_capacity(expected);
            for corner in group.iter().flatten() {
                let index = corner.data();
                if index as usize >= count {
                    return Err(BufferError::VertexOutOfRange { index, count });
                }
                match format {
                    IndexFormat::Uint16 => {
                        let narrow = u16::try_from(index).map_err(|_| BufferError::VertexOutOfRange { index, count })?;
                        buffer.extend_from_slice(&narrow.to_ne_bytes());
                    }
                    IndexFormat::Uint32 => buffer.extend_from_slice(&index.to_ne_bytes()),
                }
            }
            if buffer.len() == expected {
                Ok(buffer)
            } else {
                Err(BufferError::SizeMismatch {
                    expected,
                    actual: buffer.len(),
                })
            }
        })
        .collect()
}

/// Every buffer needed to draw one mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshBuffers {
    /// Interleaved vertex data
    pub vertices: Vec<u8>,
    /// One index buffer per polygon group
    pub indices: Vec<Vec<u8>>,
    /// Width of every index buffer
    pub index_format: IndexFormat,
}

/// Build vertex and index buffers for a mesh of a store
///
/// A mesh with a skin goes through the skeletal path when the layout asks
/// for bone data; its first skin is used.
pub fn build_mesh_buffers(
    store: &SceneStore,
    mesh_id: MeshId,
    layout: &VertexFormat,
    force_index32: bool,
) -> Result<MeshBuffers, BufferError> {
    let mesh = store.meshes.get(mesh_id).ok_or(BufferError::MeshNotFound(mesh_id))?;
    let skin = mesh.skin_ids.first().and_then(|&skin_id| store.skins.get(skin_id));

    let skinned = match skin {
        Some(skin) => {
            let bones = store.skeleton_bones(skin.skeleton_id);
            build_skeletal_vertex_buffer(mesh, layout, skin, &bones)?
        }
        None => None,
    };
    let vertices = match skinned {
        Some(vertices) => vertices,
        None => build_vertex_buffer(mesh, layout)?,
    };

    Ok(MeshBuffers {
        vertices,
        indices: build_index_buffers(mesh, force_index32)?,
        index_format: index_format(mesh, force_index32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Vec2, Vec3};
    use crate::scene::entities::Skeleton;
    use crate::scene::ids::{SkeletonId, VertexId};
    use crate::test_fixtures;

    fn five_vertex_mesh() -> Mesh {
        let mut mesh = Mesh::new("fan");
        mesh.vertex_positions = (0..5).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        mesh.vertex_normals = vec![Vec3::new(0.0, 1.0, 0.0); 5];
        mesh.vertex_uv_sets = vec![vec![Vec2::new(0.5, 0.5); 5]];
        mesh.polygon_groups = vec![vec![
            [VertexId::new(0), VertexId::new(1), VertexId::new(2)],
            [VertexId::new(0), VertexId::new(3), VertexId::new(4)],
        ]];
        mesh
    }

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        f32::from_ne_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_ne_bytes([bytes[offset], bytes[offset + 1]])
    }

    #[test]
    fn test_static_vertex_buffer_size_and_order() {
        let mesh = five_vertex_mesh();
        let buffer = build_vertex_buffer(&mesh, &VertexFormat::position_normal_uv()).unwrap();

        assert_eq!(buffer.len(), 160);
        // Second vertex: position x, then normal y, then uv
        assert_eq!(read_f32(&buffer, 32), 1.0);
        assert_eq!(read_f32(&buffer, 32 + 16), 1.0);
        assert_eq!(read_f32(&buffer, 32 + 24), 0.5);
    }

    #[test]
    fn test_layout_order_is_respected() {
        let mesh = five_vertex_mesh();
        let layout = VertexFormat::new()
            .with(VertexAttributeType::UV, AttributeValueType::Float32, 2)
            .with(VertexAttributeType::Position, AttributeValueType::Float32, 3);
        let buffer = build_vertex_buffer(&mesh, &layout).unwrap();

        assert_eq!(buffer.len(), 5 * 20);
        assert_eq!(read_f32(&buffer, 20), 0.5);
        assert_eq!(read_f32(&buffer, 20 + 8), 1.0);
    }

    #[test]
    fn test_index_buffer_width() {
        let mesh = five_vertex_mesh();
        let buffers = build_index_buffers(&mesh, false).unwrap();
        assert_eq!(buffers.len(), 1);
        assert_eq!(buffers[0].len(), 12);
        assert_eq!(read_u16(&buffers[0], 6), 0);
        assert_eq!(read_u16(&buffers[0], 8), 3);

        let forced = build_index_buffers(&mesh, true).unwrap();
        assert_eq!(forced[0].len(), 24);
        assert_eq!(index_format(&mesh, true), IndexFormat::Uint32);
    }

    #[test]
    fn test_large_mesh_uses_32_bit_indices() {
        let mut mesh = Mesh::new("big");
        mesh.vertex_positions = vec![Vec3::zeros(); MAX_INDEX16_VERTICES];
        assert_eq!(index_format(&mesh, false), IndexFormat::Uint16);

        mesh.vertex_positions.push(Vec3::zeros());
        assert_eq!(index_format(&mesh, false), IndexFormat::Uint32);
    }

    #[test]
    fn test_instances_resolve_positions() {
        let mut mesh = Mesh::new("split");
        mesh.vertex_positions = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
        mesh.vertex_instance_to_vertex = vec![VertexId::new(1), VertexId::new(0), VertexId::new(1)];
        let layout = VertexFormat::new().with(VertexAttributeType::Position, AttributeValueType::Float32, 3);

        let buffer = build_vertex_buffer(&mesh, &layout).unwrap();
        assert_eq!(buffer.len(), 36);
        assert_eq!(read_f32(&buffer, 0), 4.0);
        assert_eq!(read_f32(&buffer, 12), 1.0);
        assert_eq!(read_f32(&buffer, 24), 4.0);
    }

    #[test]
    fn test_missing_attribute() {
        let mut mesh = five_vertex_mesh();
        mesh.vertex_normals.truncate(3);
        assert_eq!(
            build_vertex_buffer(&mesh, &VertexFormat::position_normal_uv()),
            Err(BufferError::MissingAttribute {
                kind: VertexAttributeType::Normal,
                instance: 3
            })
        );
    }

    #[test]
    fn test_static_path_rejects_bone_attributes() {
        let mesh = five_vertex_mesh();
        assert_eq!(
            build_vertex_buffer(&mesh, &VertexFormat::position_normal_uv_skinned()),
            Err(BufferError::SkinRequired(VertexAttributeType::BoneIndex))
        );
    }

    fn rig(names: &[&str]) -> (Skeleton, Vec<Bone>) {
        let skeleton = Skeleton::new("rig");
        let bones = names.iter().map(|&name| Bone::new(name, SkeletonId::new(0))).collect();
        (skeleton, bones)
    }

    #[test]
    fn test_skeletal_buffer_pads_unused_slots() {
        let mesh = five_vertex_mesh();
        let mut skin = Skin::new("skin", MeshId::new(0), SkeletonId::new(0));
        for _ in 0..5 {
            skin.push_vertex_influences(&[("spine", 0.75), ("hip", 0.25)]);
        }
        let (_, bones) = rig(&["hip", "spine"]);
        let bone_refs: Vec<&Bone> = bones.iter().collect();

        let layout = VertexFormat::position_normal_uv_skinned();
        let buffer = build_skeletal_vertex_buffer(&mesh, &layout, &skin, &bone_refs)
            .unwrap()
            .unwrap();

        let stride = layout.stride();
        assert_eq!(stride, 32 + 8 + 16);
        assert_eq!(buffer.len(), 5 * stride);
        let bone_offset = stride + 32;
        assert_eq!(read_u16(&buffer, bone_offset), 1);
        assert_eq!(read_u16(&buffer, bone_offset + 2), 0);
        assert_eq!(read_u16(&buffer, bone_offset + 4), UNUSED_BONE_INDEX);
        assert_eq!(read_u16(&buffer, bone_offset + 6), UNUSED_BONE_INDEX);
        assert_eq!(read_f32(&buffer, bone_offset + 8), 0.75);
        assert_eq!(read_f32(&buffer, bone_offset + 12), 0.25);
        assert_eq!(read_f32(&buffer, bone_offset + 16), 0.0);
    }

    #[test]
    fn test_skeletal_mismatch() {
        let mesh = five_vertex_mesh();
        let mut skin = Skin::new("skin", MeshId::new(0), SkeletonId::new(0));
        for _ in 0..5 {
            skin.push_vertex_influences(&[("tail", 1.0)]);
        }
        let (_, bones) = rig(&["hip", "spine"]);
        let bone_refs: Vec<&Bone> = bones.iter().collect();

        let result = build_skeletal_vertex_buffer(&mesh, &VertexFormat::position_normal_uv_skinned(), &skin, &bone_refs);
        assert_eq!(
            result,
            Err(BufferError::SkinSkeletonMismatch {
                bone: "tail".to_string()
            })
        );
    }

    #[test]
    fn test_skeletal_without_bone_attributes_is_none() {
        let mesh = five_vertex_mesh();
        let skin = Skin::new("skin", MeshId::new(0), SkeletonId::new(0));
        let result = build_skeletal_vertex_buffer(&mesh, &VertexFormat::position_normal_uv(), &skin, &[]);
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_too_many_influences() {
        let mesh = five_vertex_mesh();
        let mut skin = Skin::new("skin", MeshId::new(0), SkeletonId::new(0));
        skin.push_vertex_influences(&[("a", 0.2), ("a", 0.2), ("a", 0.2), ("a", 0.2), ("a", 0.2)]);
        let (_, bones) = rig(&["a"]);
        let bone_refs: Vec<&Bone> = bones.iter().collect();

        let result = build_skeletal_vertex_buffer(&mesh, &VertexFormat::position_normal_uv_skinned(), &skin, &bone_refs);
        assert_eq!(result, Err(BufferError::TooManyInfluences { vertex: 0, count: 5 }));
    }

    #[test]
    fn test_skin_names_without_weights() {
        let mesh = five_vertex_mesh();
        let mut skin = Skin::new("skin", MeshId::new(0), SkeletonId::new(0));
        for _ in 0..5 {
            skin.push_vertex_influences(&[("hip", 1.0)]);
        }
        skin.vertex_bone_names[2].push("spine".to_string());
        let (_, bones) = rig(&["hip", "spine"]);
        let bone_refs: Vec<&Bone> = bones.iter().collect();

        let result = build_skeletal_vertex_buffer(&mesh, &VertexFormat::position_normal_uv_skinned(), &skin, &bone_refs);
        assert_eq!(
            result,
            Err(BufferError::SkinArraysMismatch {
                vertex: 2,
                names: 2,
                weights: 1
            })
        );
    }

    #[test]
    fn test_duplicate_bone_name_uses_last_index() {
        let mesh = five_vertex_mesh();
        let mut skin = Skin::new("skin", MeshId::new(0), SkeletonId::new(0));
        for _ in 0..5 {
            skin.push_vertex_influences(&[("joint", 1.0)]);
        }
        let (_, bones) = rig(&["joint", "hip", "joint"]);
        let bone_refs: Vec<&Bone> = bones.iter().collect();

        let layout = VertexFormat::position_normal_uv_skinned();
        let buffer = build_skeletal_vertex_buffer(&mesh, &layout, &skin, &bone_refs)
            .unwrap()
            .unwrap();
        assert_eq!(read_u16(&buffer, 32), 2);
    }

    #[test]
    fn test_unsupported_layout() {
        let mesh = five_vertex_mesh();
        let layout = VertexFormat::new().with(VertexAttributeType::Position, AttributeValueType::Uint8, 3);
        assert!(matches!(
            build_vertex_buffer(&mesh, &layout),
            Err(BufferError::UnsupportedAttributeLayout { .. })
        ));
    }

    #[test]
    fn test_build_mesh_buffers_from_store() {
        let store = test_fixtures::full_scene();
        let skinned = MeshId::new(test_fixtures::SKINNED_MESH_INDEX);
        let layout = VertexFormat::position_normal_uv_skinned();

        let buffers = build_mesh_buffers(&store, skinned, &layout, false).unwrap();
        let mesh = store.meshes.get(skinned).unwrap();
        assert_eq!(buffers.vertices.len(), mesh.buffer_vertex_count() * layout.stride());
        assert_eq!(buffers.indices.len(), mesh.polygon_groups.len());
        assert_eq!(buffers.index_format, IndexFormat::Uint16);

        assert_eq!(
            build_mesh_buffers(&store, MeshId::new(99), &layout, false),
            Err(BufferError::MeshNotFound(MeshId::new(99)))
        );
    }
}
