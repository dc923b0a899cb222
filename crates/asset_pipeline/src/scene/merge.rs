//! Merging one scene store into another
//!
//! Every entity of the source is appended to the destination with a new
//! identifier equal to the destination's count at that moment. Because
//! collections are dense, every reference in the source shifts by the size
//! the referenced collection had before the merge started.

use crate::scene::entities::EntityKind;
use crate::scene::store::SceneStore;

/// Collection sizes of the destination captured before a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OriginCounts {
    nodes: u32,
    meshes: u32,
    materials: u32,
    textures: u32,
    skins: u32,
    skeletons: u32,
    bones: u32,
    blend_shapes: u32,
    morphs: u32,
    tracks: u32,
}

impl OriginCounts {
    /// Snapshot the sizes of every referenced collection
    pub fn capture(store: &SceneStore) -> Self {
        Self {
            nodes: store.nodes.count(),
            meshes: store.meshes.count(),
            materials: store.materials.count(),
            textures: store.textures.count(),
            skins: store.skins.count(),
            skeletons: store.skeletons.count(),
            bones: store.bones.count(),
            blend_shapes: store.blend_shapes.count(),
            morphs: store.morphs.count(),
            tracks: store.tracks.count(),
        }
    }
}

impl SceneStore {
    /// Append every entity of `source`, leaving `source` empty
    ///
    /// No validation happens here; a consistent source merged into a
    /// consistent destination stays consistent. Invalid sentinel references
    /// are kept as they are. The destination keeps its own axis system and
    /// unit; source positions are not converted.
    pub fn merge_from(&mut self, source: &mut SceneStore) {
        let origin = OriginCounts::capture(self);
        log::info!(
            "Merging scene \"{}\" ({} entities) into \"{}\" ({} entities)",
            source.name,
            source.total_count(),
            self.name,
            self.total_count()
        );

        if source.axis_system != self.axis_system || source.unit != self.unit {
            log::warn!(
                "Source \"{}\" uses {:?} in {}; keeping {:?} in {} without conversion",
                source.name,
                source.axis_system,
                source.unit,
                self.axis_system,
                self.unit
            );
        }

        for mut node in source.nodes.take() {
            node.parent_id = node.parent_id.offset(origin.nodes);
            for child_id in &mut node.child_ids {
                *child_id = child_id.offset(origin.nodes);
            }
            for mesh_id in &mut node.mesh_ids {
                *mesh_id = mesh_id.offset(origin.meshes);
            }
            self.nodes.add(node);
        }

        for mut mesh in source.meshes.take() {
            for material_id in &mut mesh.material_ids {
                *material_id = material_id.offset(origin.materials);
            }
            for blend_shape_id in &mut mesh.blend_shape_ids {
                *blend_shape_id = blend_shape_id.offset(origin.blend_shapes);
            }
            for skin_id in &mut mesh.skin_ids {
                *skin_id = skin_id.offset(origin.skins);
            }
            self.meshes.add(mesh);
        }

        for mut skin in source.skins.take() {
            skin.mesh_id = skin.mesh_id.offset(origin.meshes);
            skin.skeleton_id = skin.skeleton_id.offset(origin.skeletons);
            self.skins.add(skin);
        }

        for mut blend_shape in source.blend_shapes.take() {
            blend_shape.mesh_id = blend_shape.mesh_id.offset(origin.meshes);
            for morph_id in &mut blend_shape.morph_ids {
                *morph_id = morph_id.offset(origin.morphs);
            }
            self.blend_shapes.add(blend_shape);
        }

        for mut morph in source.morphs.take() {
            morph.blend_shape_id = morph.blend_shape_id.offset(origin.blend_shapes);
            self.morphs.add(morph);
        }

        for mut material in source.materials.take() {
            for texture in material.textures.values_mut() {
                texture.texture_id = texture.texture_id.offset(origin.textures);
            }
            self.materials.add(material);
        }

        for texture in source.textures.take() {
            self.textures.add(texture);
        }

        for mut animation in source.animations.take() {
            for track_id in &mut animation.track_ids {
                *track_id = track_id.offset(origin.tracks);
            }
            self.animations.add(animation);
        }

        for track in source.tracks.take() {
            self.tracks.add(track);
        }

        for mut skeleton in source.skeletons.take() {
            skeleton.root_bone_id = skeleton.root_bone_id.offset(origin.bones);
            for bone_id in &mut skeleton.bone_ids {
                *bone_id = bone_id.offset(origin.bones);
            }
            self.skeletons.add(skeleton);
        }

        for mut bone in source.bones.take() {
            bone.skeleton_id = bone.skeleton_id.offset(origin.skeletons);
            bone.parent_id = bone.parent_id.offset(origin.bones);
            for child_id in &mut bone.child_ids {
                *child_id = child_id.offset(origin.bones);
            }
            self.bones.add(bone);
        }

        for camera in source.cameras.take() {
            self.cameras.add(camera);
        }

        for light in source.lights.take() {
            self.lights.add(light);
        }

        for emitter in source.particle_emitters.take() {
            self.particle_emitters.add(emitter);
        }

        self.root_node_ids.extend(
            source
                .root_node_ids
                .drain(..)
                .map(|root| root.offset(origin.nodes)),
        );
        self.aabb.merge(&source.aabb);
        source.aabb = crate::foundation::math::Aabb::empty();

        for &kind in EntityKind::ALL {
            log::debug!("  {kind}: {}", self.count(kind));
        }
    }

    /// Consume `source` and append all of its entities
    pub fn merge(&mut self, mut source: SceneStore) {
        self.merge_from(&mut source);
    }
}
