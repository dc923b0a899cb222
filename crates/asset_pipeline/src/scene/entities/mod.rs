//! Scene entity definitions
//!
//! Entities are plain data. They reference each other only through typed
//! identifiers; the store owns every entity and resolves references by index.

pub mod animation;
pub mod blend_shape;
pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;
pub mod node;
pub mod particle;
pub mod skeleton;

pub use animation::{Animation, KeyFrame, RotationKey, ScaleKey, Track, TranslationKey};
pub use blend_shape::{BlendShape, Morph};
pub use camera::Camera;
pub use light::{Light, LightType};
pub use material::{BlendMode, Material, MaterialTexture, MaterialTextureType, Texture, TextureMapMode};
pub use mesh::{Mesh, Polygon, PolygonGroup};
pub use node::Node;
pub use particle::{ParticleEmitter, ParticleEmitterType};
pub use skeleton::{Bone, Skeleton, Skin};

use crate::scene::ids::ObjectId;

named_enum! {
    /// The fourteen kinds of entity held by a store
    pub enum EntityKind {
        /// Transform hierarchy node
        Node = 0,
        /// Triangle mesh
        Mesh = 1,
        /// Surface material
        Material = 2,
        /// Texture reference
        Texture = 3,
        /// Light source
        Light = 4,
        /// Camera
        Camera = 5,
        /// Mesh-to-skeleton binding
        Skin = 6,
        /// Bone hierarchy
        Skeleton = 7,
        /// Single bone
        Bone = 8,
        /// Set of morph targets on a mesh
        BlendShape = 9,
        /// Single morph target
        Morph = 10,
        /// Animation clip
        Animation = 11,
        /// Keyframe channels for one animated target
        Track = 12,
        /// Particle emitter
        ParticleEmitter = 13,
    }
}

/// Behaviour shared by every entity stored in a scene
pub trait SceneEntity {
    /// Typed identifier of this kind
    type Id: ObjectId;

    /// Which collection this entity lives in
    const KIND: EntityKind;

    /// Current identifier
    fn id(&self) -> Self::Id;

    /// Overwrite the identifier. Only the store and the merge engine do this.
    fn set_id(&mut self, id: Self::Id);

    /// Display name, used by name lookups
    fn name(&self) -> &str;
}
