//! Scenes shared by unit tests

use crate::foundation::math::{Mat4, Quat, Transform, Vec2, Vec3, Vec4};
use crate::scene::axis_system::{AxisSystem, Unit};
use crate::scene::entities::{
    Animation, BlendMode, BlendShape, Bone, Camera, Light, LightType, Material, MaterialTextureType, Mesh,
    Morph, Node, ParticleEmitter, ParticleEmitterType, RotationKey, ScaleKey, Skeleton, Skin, Texture,
    TextureMapMode, Track, TranslationKey,
};
use crate::scene::ids::{BlendShapeId, BoneId, MaterialId, MeshId, MorphId, NodeId, SkinId, TrackId, VertexId};
use crate::scene::store::SceneStore;
use crate::scene::vertex_format::VertexFormat;

/// Index of the skinned, morphed mesh in [`full_scene`]
pub const SKINNED_MESH_INDEX: u32 = 1;

fn v(a: u32, b: u32, c: u32) -> [VertexId; 3] {
    [VertexId::new(a), VertexId::new(b), VertexId::new(c)]
}

fn quad_positions() -> Vec<Vec3> {
    vec![
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 1.0),
    ]
}

fn static_quad(material_id: MaterialId) -> Mesh {
    let mut mesh = Mesh::new("static_quad");
    mesh.vertex_positions = quad_positions();
    mesh.vertex_normals = vec![Vec3::new(0.0, 1.0, 0.0); 4];
    mesh.vertex_tangents = vec![Vec3::new(1.0, 0.0, 0.0); 4];
    mesh.vertex_bitangents = vec![Vec3::new(0.0, 0.0, 1.0); 4];
    mesh.vertex_uv_sets = vec![vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ]];
    mesh.vertex_color_sets = vec![vec![Vec4::new(1.0, 0.5, 0.25, 1.0); 4]];
    mesh.polygon_groups = vec![vec![v(0, 2, 1), v(0, 3, 2)]];
    mesh.material_ids = vec![material_id];
    mesh.vertex_format = VertexFormat::position_normal_uv();
    mesh.update_aabb();
    mesh
}

fn skinned_strip(material_id: MaterialId) -> Mesh {
    let mut mesh = Mesh::new("skinned_strip");
    mesh.vertex_positions = quad_positions()
        .into_iter()
        .map(|p| Vec3::new(p.x, p.z + 1.0, 0.0))
        .collect();
    mesh.vertex_instance_to_vertex = [0, 1, 2, 2, 3, 0].into_iter().map(VertexId::new).collect();
    mesh.vertex_normals = vec![Vec3::new(0.0, 0.0, 1.0); 6];
    mesh.vertex_uv_sets = vec![vec![Vec2::new(0.25, 0.75); 6]];
    mesh.polygon_groups = vec![vec![v(0, 1, 2), v(3, 4, 5)]];
    mesh.material_ids = vec![material_id];
    mesh.blend_shape_ids = vec![BlendShapeId::new(0)];
    mesh.skin_ids = vec![SkinId::new(0)];
    mesh.vertex_format = VertexFormat::position_normal_uv_skinned();
    mesh.update_aabb();
    mesh
}

/// A consistent scene with at least one entity of every kind
pub fn full_scene() -> SceneStore {
    let mut store = SceneStore::new("fixture");
    store.axis_system = AxisSystem::right_handed_y_up();
    store.unit = Unit::Meter;

    let albedo = store.textures.add(Texture::new("albedo", "textures/albedo.png"));
    let mut normal_map = Texture::new("normal", "textures/normal.png");
    normal_map.u_map_mode = TextureMapMode::Clamp;
    normal_map.v_map_mode = TextureMapMode::Mirror;
    let normal = store.textures.add(normal_map);

    let mut material = Material::new("painted");
    material.blend_mode = BlendMode::Mask;
    material.metallic = 0.25;
    material.set_texture(MaterialTextureType::BaseColor, albedo);
    material.set_texture(MaterialTextureType::Normal, normal);
    if let Some(texture) = material.textures.get_mut(&MaterialTextureType::Normal) {
        texture.uv_scale = Vec2::new(2.0, 2.0);
    }
    let material_id = store.materials.add(material);

    let quad_id = store.meshes.add(static_quad(material_id));
    let strip_id = store.meshes.add(skinned_strip(material_id));

    let skeleton_id = store.skeletons.add(Skeleton::new("rig"));
    let mut hip = Bone::new("hip", skeleton_id);
    hip.child_ids.push(BoneId::new(1));
    let hip_id = store.bones.add(hip);
    let mut spine = Bone::new("spine", skeleton_id);
    spine.parent_id = hip_id;
    spine.offset = Mat4::new_translation(&Vec3::new(0.0, -1.0, 0.0));
    spine.transform = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
    let spine_id = store.bones.add(spine);
    if let Some(skeleton) = store.skeletons.get_mut(skeleton_id) {
        skeleton.root_bone_id = hip_id;
        skeleton.bone_ids = vec![hip_id, spine_id];
    }

    let mut skin = Skin::new("strip_skin", strip_id, skeleton_id);
    skin.push_vertex_influences(&[("hip", 1.0)]);
    skin.push_vertex_influences(&[("hip", 0.5), ("spine", 0.5)]);
    skin.push_vertex_influences(&[("spine", 1.0)]);
    skin.push_vertex_influences(&[("spine", 0.7), ("hip", 0.3)]);
    store.skins.add(skin);

    let mut blend_shape = BlendShape::new("smile", strip_id);
    blend_shape.morph_ids.push(MorphId::new(0));
    let blend_shape_id = store.blend_shapes.add(blend_shape);
    let mut morph = Morph::new("raise", blend_shape_id, 0.25);
    morph.vertex_source_ids = vec![VertexId::new(2), VertexId::new(3)];
    morph.vertex_positions = vec![Vec3::new(1.0, 2.5, 0.0), Vec3::new(-1.0, 2.5, 0.0)];
    store.morphs.add(morph);

    let mut hip_track = Track::new("hip");
    hip_track.translation_keys = vec![
        TranslationKey::new(0.0, Vec3::zeros()),
        TranslationKey::new(1.0, Vec3::new(0.0, 0.5, 0.0)),
    ];
    hip_track.rotation_keys = vec![
        RotationKey::new(0.0, Quat::identity()),
        RotationKey::new(0.5, Quat::from_euler_angles(0.0, 0.3, 0.0)),
        RotationKey::new(1.0, Quat::from_euler_angles(0.0, 0.6, 0.0)),
    ];
    store.tracks.add(hip_track);
    let mut spine_track = Track::new("spine");
    spine_track.scale_keys = vec![
        ScaleKey::new(0.0, Vec3::new(1.0, 1.0, 1.0)),
        ScaleKey::new(2.0, Vec3::new(1.0, 1.25, 1.0)),
    ];
    store.tracks.add(spine_track);
    let mut walk = Animation::new("walk", 48.0, 24.0);
    walk.track_ids = vec![TrackId::new(0), TrackId::new(1)];
    store.animations.add(walk);

    let mut root = Node::new("root");
    root.child_ids.push(NodeId::new(1));
    root.mesh_ids.push(quad_id);
    let root_id = store.add_root_node(root);
    let mut child = Node::new("character").with_transform(Transform {
        position: Vec3::new(0.0, 0.0, -3.0),
        rotation: Quat::from_euler_angles(0.0, 1.0, 0.0),
        scale: Vec3::new(2.0, 2.0, 2.0),
    });
    child.parent_id = root_id;
    child.mesh_ids.push(strip_id);
    store.nodes.add(child);

    store.lights.add(Light::point(
        "bulb",
        Vec3::new(0.0, 3.0, 0.0),
        Vec3::new(1.0, 0.9, 0.8),
        20.0,
        10.0,
    ));
    let mut spot = Light::new("spot", LightType::Spot);
    spot.set_spot_angles(0.3, 0.6);
    store.lights.add(spot);

    store.cameras.add(Camera::new("main", Vec3::new(0.0, 2.0, 8.0), Vec3::zeros()));

    let mut sparks = ParticleEmitter::new("sparks", ParticleEmitterType::Sprite, 256);
    sparks.velocity = Vec3::new(0.0, 2.0, 0.0);
    sparks.accelerate = Vec3::new(0.0, -9.8, 0.0);
    store.particle_emitters.add(sparks);

    store.update_aabb();
    store
}

#[test]
fn test_full_scene_covers_every_kind() {
    let store = full_scene();
    for &kind in crate::scene::EntityKind::ALL {
        assert!(store.count(kind) > 0, "{kind} is empty");
    }
    assert_eq!(
        store.meshes.get(MeshId::new(SKINNED_MESH_INDEX)).map(|m| m.name.as_str()),
        Some("skinned_strip")
    );
}
