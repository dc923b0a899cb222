//! Skeletal animation rig: skins, skeletons and bones

use crate::foundation::math::{Mat4, Transform};
use crate::scene::ids::{BoneId, MeshId, SkeletonId, SkinId};

/// Binds a mesh's vertices to the bones of a skeleton
///
/// Influences are stored per unique vertex (not per instance) as parallel
/// arrays of bone names and weights. Names are resolved against the target
/// skeleton only when a vertex buffer is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    pub(crate) id: SkinId,
    /// Display name
    pub name: String,
    /// Skinned mesh
    pub mesh_id: MeshId,
    /// Target skeleton
    pub skeleton_id: SkeletonId,
    /// Largest number of influences on any single vertex
    pub max_vertex_influence_count: u32,
    /// Per vertex: names of the influencing bones
    pub vertex_bone_names: Vec<Vec<String>>,
    /// Per vertex: weights parallel to `vertex_bone_names`
    pub vertex_bone_weights: Vec<Vec<f32>>,
}

impl Skin {
    /// Create a skin binding `mesh_id` to `skeleton_id`
    pub fn new(name: impl Into<String>, mesh_id: MeshId, skeleton_id: SkeletonId) -> Self {
        Self {
            name: name.into(),
            mesh_id,
            skeleton_id,
            ..Default::default()
        }
    }

    /// Append the influences of the next vertex
    pub fn push_vertex_influences(&mut self, influences: &[(&str, f32)]) {
        self.vertex_bone_names
            .push(influences.iter().map(|(name, _)| (*name).to_string()).collect());
        self.vertex_bone_weights
            .push(influences.iter().map(|(_, weight)| *weight).collect());
        let count = u32::try_from(influences.len()).unwrap_or(u32::MAX);
        self.max_vertex_influence_count = self.max_vertex_influence_count.max(count);
    }
}

impl_scene_entity!(Skin, SkinId, Skin);

/// A bone hierarchy
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skeleton {
    pub(crate) id: SkeletonId,
    /// Display name
    pub name: String,
    /// Top of the hierarchy
    pub root_bone_id: BoneId,
    /// Every bone of the skeleton; a bone's position here is its skinning index
    pub bone_ids: Vec<BoneId>,
}

impl Skeleton {
    /// Create an empty skeleton
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl_scene_entity!(Skeleton, SkeletonId, Skeleton);

/// One joint of a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub(crate) id: BoneId,
    /// Display name, matched against skin influence names
    pub name: String,
    /// Parent bone, invalid for the root
    pub parent_id: BoneId,
    /// Child bones
    pub child_ids: Vec<BoneId>,
    /// Owning skeleton
    pub skeleton_id: SkeletonId,
    /// Inverse bind matrix (mesh space to bone space)
    pub offset: Mat4,
    /// Local rest transform
    pub transform: Transform,
}

impl Bone {
    /// Create a root bone belonging to `skeleton_id`
    pub fn new(name: impl Into<String>, skeleton_id: SkeletonId) -> Self {
        Self {
            id: BoneId::invalid(),
            name: name.into(),
            parent_id: BoneId::invalid(),
            child_ids: Vec::new(),
            skeleton_id,
            offset: Mat4::identity(),
            transform: Transform::identity(),
        }
    }
}

impl_scene_entity!(Bone, BoneId, Bone);
