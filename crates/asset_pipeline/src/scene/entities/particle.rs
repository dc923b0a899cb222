//! Particle emitters

use crate::foundation::math::{Vec3, Vec4};
use crate::scene::ids::ParticleEmitterId;

named_enum! {
    /// Particle primitive
    pub enum ParticleEmitterType {
        /// Camera-facing quads
        Sprite = 0,
        /// Connected strip
        Ribbon = 1,
        /// Trail following the emitter
        Track = 2,
        /// Expanding ring
        Ring = 3,
        /// Instanced mesh
        Model = 4,
    }
}

/// Emitter parameters as authored
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleEmitter {
    pub(crate) id: ParticleEmitterId,
    /// Display name
    pub name: String,
    /// Primitive type
    pub emitter_type: ParticleEmitterType,
    /// Pool size
    pub max_count: u32,
    /// Emitter position
    pub position: Vec3,
    /// Initial particle velocity
    pub velocity: Vec3,
    /// Constant acceleration
    pub accelerate: Vec3,
    /// Particle color
    pub color: Vec4,
    /// Fixed rotation in Euler angles
    pub fixed_rotation: Vec3,
    /// Fixed scale
    pub fixed_scale: Vec3,
}

impl ParticleEmitter {
    /// Create an emitter at the origin
    pub fn new(name: impl Into<String>, emitter_type: ParticleEmitterType, max_count: u32) -> Self {
        Self {
            id: ParticleEmitterId::invalid(),
            name: name.into(),
            emitter_type,
            max_count,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            accelerate: Vec3::zeros(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            fixed_rotation: Vec3::zeros(),
            fixed_scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl_scene_entity!(ParticleEmitter, ParticleEmitterId, ParticleEmitter);
