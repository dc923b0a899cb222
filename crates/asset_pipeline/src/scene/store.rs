//! Entity collections and the scene store

use crate::foundation::math::Aabb;
use crate::scene::axis_system::{AxisSystem, Unit};
use crate::scene::entities::{
    Animation, BlendShape, Bone, Camera, EntityKind, Light, Material, Mesh, Morph, Node,
    ParticleEmitter, SceneEntity, Skeleton, Skin, Texture, Track,
};
use crate::scene::ids::{NodeId, ObjectId, SkeletonId};
use std::fmt;

/// Dense, append-only storage for one entity kind
///
/// Entities can only be appended through [`EntityCollection::add`], which
/// stamps the entity with its index, so `get(id)` and `id.index()` always
/// agree for entities added this way.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCollection<T> {
    items: Vec<T>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: SceneEntity> EntityCollection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its new identifier
    ///
    /// Whatever identifier the entity carried before is overwritten.
    pub fn add(&mut self, mut entity: T) -> T::Id {
        let id = T::Id::from_raw(u32::try_from(self.items.len()).unwrap_or(u32::MAX));
        entity.set_id(id);
        self.items.push(entity);
        id
    }

    /// Append an entity keeping the identifier it already has
    ///
    /// Used when restoring a serialized scene, where the stored identifier
    /// must survive so that validation can see it.
    pub(crate) fn push_raw(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Look an entity up by identifier
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.get(id.index())
    }

    /// Look an entity up by identifier for modification
    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of entities as an identifier-sized count
    pub fn count(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    /// True if nothing was added
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|entity| entity.name() == name)
    }

    /// First entity with the given name, for modification
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|entity| entity.name() == name)
    }

    /// Iterate in identifier order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate mutably in identifier order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Entities as a slice, indexed by identifier
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Move every entity out, leaving the collection empty
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// In-memory scene graph owning every entity of one scene
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneStore {
    /// Scene name
    pub name: String,
    /// Nodes without a parent, in authoring order
    pub root_node_ids: Vec<NodeId>,
    /// Union of every mesh box, refreshed by [`SceneStore::update_aabb`]
    pub aabb: Aabb,
    /// Coordinate convention of positions and directions
    pub axis_system: AxisSystem,
    /// Length unit of positions and distances
    pub unit: Unit,

    /// Transform hierarchy
    pub nodes: EntityCollection<Node>,
    /// Geometry
    pub meshes: EntityCollection<Mesh>,
    /// Surface materials
    pub materials: EntityCollection<Material>,
    /// Texture references
    pub textures: EntityCollection<Texture>,
    /// Light sources
    pub lights: EntityCollection<Light>,
    /// Cameras
    pub cameras: EntityCollection<Camera>,
    /// Mesh-to-skeleton bindings
    pub skins: EntityCollection<Skin>,
    /// Bone hierarchies
    pub skeletons: EntityCollection<Skeleton>,
    /// Bones of every skeleton
    pub bones: EntityCollection<Bone>,
    /// Morph target sets
    pub blend_shapes: EntityCollection<BlendShape>,
    /// Morph targets
    pub morphs: EntityCollection<Morph>,
    /// Animation clips
    pub animations: EntityCollection<Animation>,
    /// Keyframe tracks
    pub tracks: EntityCollection<Track>,
    /// Particle emitters
    pub particle_emitters: EntityCollection<ParticleEmitter>,
}

impl SceneStore {
    /// Create an empty, named store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Node => self.nodes.len(),
            EntityKind::Mesh => self.meshes.len(),
            EntityKind::Material => self.materials.len(),
            EntityKind::Texture => self.textures.len(),
            EntityKind::Light => self.lights.len(),
            EntityKind::Camera => self.cameras.len(),
            EntityKind::Skin => self.skins.len(),
            EntityKind::Skeleton => self.skeletons.len(),
            EntityKind::Bone => self.bones.len(),
            EntityKind::BlendShape => self.blend_shapes.len(),
            EntityKind::Morph => self.morphs.len(),
            EntityKind::Animation => self.animations.len(),
            EntityKind::Track => self.tracks.len(),
            EntityKind::ParticleEmitter => self.particle_emitters.len(),
        }
    }

    /// Total number of entities over all kinds
    pub fn total_count(&self) -> usize {
        EntityKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    /// True if the store holds no entity at all
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Add a node and register it as a root if it has no parent
    pub fn add_root_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.add(node);
        self.root_node_ids.push(id);
        id
    }

    /// Recompute the scene box as the union of every mesh box
    ///
    /// A store without meshes ends up with an empty box.
    pub fn update_aabb(&mut self) {
        let mut aabb = Aabb::empty();
        for mesh in &self.meshes {
            aabb.merge(&mesh.aabb);
        }
        self.aabb = aabb;
    }

    /// Bones of a skeleton in the skeleton's bone-list order
    ///
    /// Dangling bone identifiers are skipped.
    pub fn skeleton_bones(&self, skeleton_id: SkeletonId) -> Vec<&Bone> {
        self.skeletons
            .get(skeleton_id)
            .map(|skeleton| {
                skeleton
                    .bone_ids
                    .iter()
                    .filter_map(|&bone_id| self.bones.get(bone_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Human-readable summary of the store
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

fn dump_names<T: SceneEntity>(
    f: &mut fmt::Formatter<'_>,
    kind: EntityKind,
    collection: &EntityCollection<T>,
) -> fmt::Result {
    if collection.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {kind} ({})", collection.len())?;
    for (index, entity) in collection.iter().enumerate() {
        writeln!(f, "    [{index}] {}", entity.name())?;
    }
    Ok(())
}

impl fmt::Display for SceneStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scene \"{}\": {} entities", self.name, self.total_count())?;
        if self.aabb.is_empty() {
            writeln!(f, "  bounds: empty")?;
        } else {
            let center = self.aabb.center();
            let extents = self.aabb.extents();
            writeln!(
                f,
                "  bounds: center ({:.3}, {:.3}, {:.3}) extents ({:.3}, {:.3}, {:.3})",
                center.x, center.y, center.z, extents.x, extents.y, extents.z
            )?;
        }
        let axes = &self.axis_system;
        writeln!(
            f,
            "  axis system: {}-handed, up {}, front {}",
            axes.handedness, axes.up, axes.front
        )?;
        writeln!(f, "  unit: {}", self.unit)?;
        dump_names(f, EntityKind::Node, &self.nodes)?;
        dump_names(f, EntityKind::Mesh, &self.meshes)?;
        dump_names(f, EntityKind::Material, &self.materials)?;
        dump_names(f, EntityKind::Texture, &self.textures)?;
        dump_names(f, EntityKind::Light, &self.lights)?;
        dump_names(f, EntityKind::Camera, &self.cameras)?;
        dump_names(f, EntityKind::Skin, &self.skins)?;
        dump_names(f, EntityKind::Skeleton, &self.skeletons)?;
        dump_names(f, EntityKind::Bone, &self.bones)?;
        dump_names(f, EntityKind::BlendShape, &self.blend_shapes)?;
        dump_names(f, EntityKind::Morph, &self.morphs)?;
        dump_names(f, EntityKind::Animation, &self.animations)?;
        dump_names(f, EntityKind::Track, &self.tracks)?;
        dump_names(f, EntityKind::ParticleEmitter, &self.particle_emitters)
    }
}
