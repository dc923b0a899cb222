//! Referential and semantic integrity checks
//!
//! Validation walks every collection once and collects every problem it
//! finds. It never mutates the store and never stops at the first error.

use crate::scene::axis_system::Axis;
use crate::scene::entities::{EntityKind, KeyFrame, SceneEntity};
use crate::scene::ids::ObjectId;
use crate::scene::store::{EntityCollection, SceneStore};
use thiserror::Error;

/// One broken invariant found in a store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityViolation {
    /// An entity's identifier differs from its position in the collection
    #[error("{kind} at index {index} carries id {id}")]
    IdMismatch {
        /// Collection
        kind: EntityKind,
        /// Position in the collection
        index: usize,
        /// Identifier stored on the entity
        id: u32,
    },

    /// A reference points past the end of its target collection
    #[error("{kind} {index} field `{field}` references missing {target} {id}")]
    DanglingReference {
        /// Referencing collection
        kind: EntityKind,
        /// Referencing entity
        index: usize,
        /// Field holding the reference
        field: &'static str,
        /// Referenced collection
        target: EntityKind,
        /// Referenced identifier
        id: u32,
    },

    /// A mandatory reference holds the invalid sentinel
    #[error("{kind} {index} field `{field}` has no {target}")]
    MissingReference {
        /// Referencing collection
        kind: EntityKind,
        /// Referencing entity
        index: usize,
        /// Field holding the reference
        field: &'static str,
        /// Referenced collection
        target: EntityKind,
    },

    /// Keyframe times in a channel do not strictly increase
    #[error("track {track} {channel} key {key} at t={time} does not follow t={previous}")]
    KeyframesNotIncreasing {
        /// Track index
        track: usize,
        /// Channel name
        channel: &'static str,
        /// Index of the offending key
        key: usize,
        /// Time of the offending key
        time: f32,
        /// Time of the key before it
        previous: f32,
    },

    /// A track with no key in any channel
    #[error("track {track} has no keyframes")]
    EmptyTrack {
        /// Track index
        track: usize,
    },

    /// Morph weight outside `[0, 1]`
    #[error("morph {morph} weight {weight} is outside [0, 1]")]
    MorphWeightOutOfRange {
        /// Morph index
        morph: usize,
        /// Stored weight
        weight: f32,
    },

    /// Morph source ids and positions differ in length
    #[error("morph {morph} has {sources} source vertices but {positions} positions")]
    MorphArraysMismatch {
        /// Morph index
        morph: usize,
        /// Number of source vertex ids
        sources: usize,
        /// Number of positions
        positions: usize,
    },

    /// A blend shape with no morph target
    #[error("blend shape {blend_shape} has no morphs")]
    EmptyBlendShape {
        /// Blend shape index
        blend_shape: usize,
    },

    /// Skin bone-name and bone-weight arrays differ in shape
    #[error("skin {skin} vertex {vertex} has {names} bone names but {weights} weights")]
    SkinArraysMismatch {
        /// Skin index
        skin: usize,
        /// Vertex index, or the vertex count when the outer arrays differ
        vertex: usize,
        /// Number of names
        names: usize,
        /// Number of weights
        weights: usize,
    },

    /// More material slots than polygon groups
    #[error("mesh {mesh} has {materials} materials for {groups} polygon groups")]
    TooManyMaterials {
        /// Mesh index
        mesh: usize,
        /// Number of material ids
        materials: usize,
        /// Number of polygon groups
        groups: usize,
    },

    /// A polygon or vertex instance refers past the mesh's vertex data
    #[error("mesh {mesh} {field} references vertex {vertex} of {count}")]
    VertexOutOfRange {
        /// Mesh index
        mesh: usize,
        /// Which array holds the bad index
        field: &'static str,
        /// The bad vertex index
        vertex: u32,
        /// Number of addressable vertices
        count: usize,
    },

    /// Up and front axes lie on the same line
    #[error("axis system has up {up} parallel to front {front}")]
    DegenerateAxisSystem {
        /// Up axis
        up: Axis,
        /// Front axis
        front: Axis,
    },
}

/// A failed validation with every violation found
#[derive(Debug, Clone, PartialEq, Error)]
#[error("scene failed validation with {} violation(s)", .violations.len())]
pub struct ValidationError {
    /// All violations, in discovery order
    pub violations: Vec<IntegrityViolation>,
}

struct Validator<'a> {
    store: &'a SceneStore,
    violations: Vec<IntegrityViolation>,
}

impl<'a> Validator<'a> {
    fn new(store: &'a SceneStore) -> Self {
        Self {
            store,
            violations: Vec::new(),
        }
    }

    fn check_ids<T: SceneEntity>(&mut self, collection: &EntityCollection<T>) {
        for (index, entity) in collection.iter().enumerate() {
            if entity.id().index() != index {
                self.violations.push(IntegrityViolation::IdMismatch {
                    kind: T::KIND,
                    index,
                    id: entity.id().data(),
                });
            }
        }
    }

    /// Check an optional reference: the sentinel is allowed, anything else must resolve
    fn optional<I: ObjectId>(&mut self, kind: EntityKind, index: usize, field: &'static str, target: EntityKind, id: I) {
        if id.is_valid() && id.index() >= self.store.count(target) {
            self.violations.push(IntegrityViolation::DanglingReference {
                kind,
                index,
                field,
                target,
                id: id.data(),
            });
        }
    }

    /// Check a mandatory reference
    fn required<I: ObjectId>(&mut self, kind: EntityKind, index: usize, field: &'static str, target: EntityKind, id: I) {
        if id.is_valid() {
            self.optional(kind, index, field, target, id);
        } else {
            self.violations.push(IntegrityViolation::MissingReference {
                kind,
                index,
                field,
                target,
            });
        }
    }

    fn all<I: ObjectId + Copy>(&mut self, kind: EntityKind, index: usize, field: &'static str, target: EntityKind, ids: &[I]) {
        for &id in ids {
            self.required(kind, index, field, target, id);
        }
    }

    fn check_keys<T>(&mut self, track: usize, channel: &'static str, keys: &[KeyFrame<T>]) {
        for (offset, pair) in keys.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                self.violations.push(IntegrityViolation::KeyframesNotIncreasing {
                    track,
                    channel,
                    key: offset + 1,
                    time: pair[1].time,
                    previous: pair[0].time,
                });
            }
        }
    }

    fn check_vertex(&mut self, mesh: usize, field: &'static str, vertex: u32, count: usize) {
        if vertex as usize >= count {
            self.violations.push(IntegrityViolation::VertexOutOfRange {
                mesh,
                field,
                vertex,
                count,
            });
        }
    }

    fn run(mut self) -> Vec<IntegrityViolation> {
        let store = self.store;

        self.check_ids(&store.nodes);
        self.check_ids(&store.meshes);
        self.check_ids(&store.materials);
        self.check_ids(&store.textures);
        self.check_ids(&store.lights);
        self.check_ids(&store.cameras);
        self.check_ids(&store.skins);
        self.check_ids(&store.skeletons);
        self.check_ids(&store.bones);
        self.check_ids(&store.blend_shapes);
        self.check_ids(&store.morphs);
        self.check_ids(&store.animations);
        self.check_ids(&store.tracks);
        self.check_ids(&store.particle_emitters);

        if !store.axis_system.is_valid() {
            self.violations.push(IntegrityViolation::DegenerateAxisSystem {
                up: store.axis_system.up,
                front: store.axis_system.front,
            });
        }

        for &root in &store.root_node_ids {
            self.required(EntityKind::Node, root.index(), "root_node_ids", EntityKind::Node, root);
        }

        for (i, node) in store.nodes.iter().enumerate() {
            self.optional(EntityKind::Node, i, "parent_id", EntityKind::Node, node.parent_id);
            self.all(EntityKind::Node, i, "child_ids", EntityKind::Node, &node.child_ids);
            self.all(EntityKind::Node, i, "mesh_ids", EntityKind::Mesh, &node.mesh_ids);
        }

        for (i, mesh) in store.meshes.iter().enumerate() {
            for &material in &mesh.material_ids {
                self.optional(EntityKind::Mesh, i, "material_ids", EntityKind::Material, material);
            }
            self.all(EntityKind::Mesh, i, "blend_shape_ids", EntityKind::BlendShape, &mesh.blend_shape_ids);
            self.all(EntityKind::Mesh, i, "skin_ids", EntityKind::Skin, &mesh.skin_ids);

            if mesh.material_ids.len() > mesh.polygon_groups.len() {
                self.violations.push(IntegrityViolation::TooManyMaterials {
                    mesh: i,
                    materials: mesh.material_ids.len(),
                    groups: mesh.polygon_groups.len(),
                });
            }
            for &vertex in &mesh.vertex_instance_to_vertex {
                self.check_vertex(i, "vertex_instance_to_vertex", vertex.data(), mesh.vertex_count());
            }
            let addressable = mesh.buffer_vertex_count();
            for corner in mesh.polygon_groups.iter().flatten().flatten() {
                self.check_vertex(i, "polygon_groups", corner.data(), addressable);
            }
        }

        for (i, material) in store.materials.iter().enumerate() {
            for texture in material.textures.values() {
                self.required(EntityKind::Material, i, "textures", EntityKind::Texture, texture.texture_id);
            }
        }

        for (i, skin) in store.skins.iter().enumerate() {
            self.required(EntityKind::Skin, i, "mesh_id", EntityKind::Mesh, skin.mesh_id);
            self.required(EntityKind::Skin, i, "skeleton_id", EntityKind::Skeleton, skin.skeleton_id);

            let names = &skin.vertex_bone_names;
            let weights = &skin.vertex_bone_weights;
            if names.len() == weights.len() {
                for (vertex, (n, w)) in names.iter().zip(weights).enumerate() {
                    if n.len() != w.len() {
                        self.violations.push(IntegrityViolation::SkinArraysMismatch {
                            skin: i,
                            vertex,
                            names: n.len(),
                            weights: w.len(),
                        });
                    }
                }
            } else {
                self.violations.push(IntegrityViolation::SkinArraysMismatch {
                    skin: i,
                    vertex: names.len().max(weights.len()),
                    names: names.len(),
                    weights: weights.len(),
                });
            }
        }

        for (i, skeleton) in store.skeletons.iter().enumerate() {
            self.optional(EntityKind::Skeleton, i, "root_bone_id", EntityKind::Bone, skeleton.root_bone_id);
            self.all(EntityKind::Skeleton, i, "bone_ids", EntityKind::Bone, &skeleton.bone_ids);
        }

        for (i, bone) in store.bones.iter().enumerate() {
            self.required(EntityKind::Bone, i, "skeleton_id", EntityKind::Skeleton, bone.skeleton_id);
            self.optional(EntityKind::Bone, i, "parent_id", EntityKind::Bone, bone.parent_id);
            self.all(EntityKind::Bone, i, "child_ids", EntityKind::Bone, &bone.child_ids);
        }

        for (i, blend_shape) in store.blend_shapes.iter().enumerate() {
            self.required(EntityKind::BlendShape, i, "mesh_id", EntityKind::Mesh, blend_shape.mesh_id);
            if blend_shape.morph_ids.is_empty() {
                self.violations.push(IntegrityViolation::EmptyBlendShape { blend_shape: i });
            }
            self.all(EntityKind::BlendShape, i, "morph_ids", EntityKind::Morph, &blend_shape.morph_ids);
        }

        for (i, morph) in store.morphs.iter().enumerate() {
            self.required(EntityKind::Morph, i, "blend_shape_id", EntityKind::BlendShape, morph.blend_shape_id);
            if !(0.0..=1.0).contains(&morph.weight) {
                self.violations.push(IntegrityViolation::MorphWeightOutOfRange {
                    morph: i,
                    weight: morph.weight,
                });
            }
            if morph.vertex_source_ids.len() != morph.vertex_positions.len() {
                self.violations.push(IntegrityViolation::MorphArraysMismatch {
                    morph: i,
                    sources: morph.vertex_source_ids.len(),
                    positions: morph.vertex_positions.len(),
                });
            }
        }

        for (i, animation) in store.animations.iter().enumerate() {
            self.all(EntityKind::Animation, i, "track_ids", EntityKind::Track, &animation.track_ids);
        }

        for (i, track) in store.tracks.iter().enumerate() {
            if track.is_empty() {
                self.violations.push(IntegrityViolation::EmptyTrack { track: i });
            }
            self.check_keys(i, "translation", &track.translation_keys);
            self.check_keys(i, "rotation", &track.rotation_keys);
            self.check_keys(i, "scale", &track.scale_keys);
        }

        self.violations
    }
}

impl SceneStore {
    /// Check every invariant and return all violations found
    ///
    /// An empty result means the store is consistent.
    pub fn validate(&self) -> Vec<IntegrityViolation> {
        Validator::new(self).run()
    }

    /// [`SceneStore::validate`] as a `Result`
    pub fn ensure_valid(&self) -> Result<(), ValidationError> {
        let violations = self.validate();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Quat, Vec3};
    use crate::scene::axis_system::{AxisSystem, Handedness};
    use crate::scene::entities::{
        BlendShape, Bone, Mesh, Morph, Node, RotationKey, ScaleKey, Track, TranslationKey,
    };
    use crate::scene::ids::{BlendShapeId, MeshId, NodeId, SkeletonId};
    use crate::test_fixtures;

    #[test]
    fn test_fixture_scene_is_valid() {
        let store = test_fixtures::full_scene();
        assert_eq!(store.validate(), Vec::new());
        assert!(store.ensure_valid().is_ok());
    }

    #[test]
    fn test_non_monotonic_keys() {
        let mut store = SceneStore::new("anim");
        let mut track = Track::new("hip");
        track.translation_keys = vec![
            TranslationKey::new(0.0, Vec3::zeros()),
            TranslationKey::new(0.5, Vec3::zeros()),
            TranslationKey::new(0.3, Vec3::zeros()),
        ];
        store.tracks.add(track);

        let violations = store.validate();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            IntegrityViolation::KeyframesNotIncreasing { track: 0, channel: "translation", key: 2, .. }
        ));
    }

    #[test]
    fn test_non_monotonic_rotation_keys() {
        let mut store = SceneStore::new("anim");
        let mut track = Track::new("spine");
        track.rotation_keys = vec![
            RotationKey::new(0.0, Quat::identity()),
            RotationKey::new(0.5, Quat::identity()),
            RotationKey::new(0.3, Quat::identity()),
        ];
        store.tracks.add(track);

        let violations = store.validate();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            IntegrityViolation::KeyframesNotIncreasing { track: 0, channel: "rotation", key: 2, .. }
        ));
    }

    #[test]
    fn test_degenerate_axis_system() {
        let mut store = SceneStore::new("axes");
        store.axis_system = AxisSystem::new(Handedness::Left, Axis::PositiveY, Axis::NegativeY);

        assert_eq!(
            store.validate(),
            vec![IntegrityViolation::DegenerateAxisSystem {
                up: Axis::PositiveY,
                front: Axis::NegativeY
            }]
        );
    }

    #[test]
    fn test_equal_key_times_are_rejected() {
        let mut store = SceneStore::new("anim");
        let mut track = Track::new("hip");
        track.scale_keys = vec![
            ScaleKey::new(1.0, Vec3::zeros()),
            ScaleKey::new(1.0, Vec3::zeros()),
        ];
        store.tracks.add(track);

        assert_eq!(store.validate().len(), 1);
    }

    #[test]
    fn test_empty_track() {
        let mut store = SceneStore::new("anim");
        store.tracks.add(Track::new("idle"));
        assert_eq!(store.validate(), vec![IntegrityViolation::EmptyTrack { track: 0 }]);
    }

    #[test]
    fn test_morph_weight_and_empty_blend_shape() {
        let mut store = SceneStore::new("morph");
        let mesh_id = store.meshes.add(Mesh::new("face"));
        let blend_shape_id = store.blend_shapes.add(BlendShape::new("smile", mesh_id));
        store.morphs.add(Morph::new("corner", blend_shape_id, 1.5));

        let violations = store.validate();
        assert!(violations.contains(&IntegrityViolation::EmptyBlendShape { blend_shape: 0 }));
        assert!(violations.contains(&IntegrityViolation::MorphWeightOutOfRange { morph: 0, weight: 1.5 }));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_bone_requires_skeleton() {
        let mut store = SceneStore::new("bones");
        store.bones.add(Bone::new("orphan", SkeletonId::invalid()));
        store.bones.add(Bone::new("lost", SkeletonId::new(3)));

        let violations = store.validate();
        assert_eq!(violations.len(), 2);
        assert!(matches!(
            violations[0],
            IntegrityViolation::MissingReference { kind: EntityKind::Bone, index: 0, .. }
        ));
        assert!(matches!(
            violations[1],
            IntegrityViolation::DanglingReference { kind: EntityKind::Bone, index: 1, id: 3, .. }
        ));
    }

    #[test]
    fn test_id_mismatch_and_dangling_child() {
        let mut store = SceneStore::new("nodes");
        let mut node = Node::new("root");
        node.id = NodeId::new(7);
        node.child_ids.push(NodeId::new(1));
        store.nodes.push_raw(node);

        let violations = store.validate();
        assert!(violations.contains(&IntegrityViolation::IdMismatch {
            kind: EntityKind::Node,
            index: 0,
            id: 7
        }));
        assert!(violations.iter().any(|v| matches!(
            v,
            IntegrityViolation::DanglingReference { field: "child_ids", id: 1, .. }
        )));
    }

    #[test]
    fn test_validation_does_not_stop_at_first_error() {
        let mut store = SceneStore::new("many");
        store.blend_shapes.add(BlendShape::new("a", MeshId::new(9)));
        store.morphs.add(Morph::new("m", BlendShapeId::new(0), -0.1));

        let error = store.ensure_valid().unwrap_err();
        assert_eq!(error.violations.len(), 3);
    }
}
