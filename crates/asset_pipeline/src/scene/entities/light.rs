//! Light sources
//!
//! Pure data, including the shape parameters used by area lights. Which
//! fields matter depends on [`LightType`]: a directional light ignores
//! position and range, a point light ignores direction.

use crate::foundation::math::Vec3;
use crate::scene::ids::LightId;

named_enum! {
    /// Types of lights carried through the pipeline
    pub enum LightType {
        /// Point light that radiates in all directions from a position
        Point = 0,
        /// Spot light that creates a cone of light from a position
        Spot = 1,
        /// Directional light (like sunlight) with parallel rays
        Directional = 2,
        /// Spherical area light
        Sphere = 3,
        /// Capsule-shaped area light
        Tube = 4,
        /// Rectangular area light
        Rectangle = 5,
        /// Disk area light
        Disk = 6,
    }
}

/// A light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub(crate) id: LightId,
    /// Display name
    pub name: String,
    /// The type of light
    pub light_type: LightType,
    /// Light intensity multiplier
    pub intensity: f32,
    /// Maximum range for point/spot lights
    pub range: f32,
    /// Radius for sphere/tube/disk lights
    pub radius: f32,
    /// Width for rectangle/tube lights
    pub width: f32,
    /// Height for rectangle lights
    pub height: f32,
    /// Spot cone attenuation scale, see [`Light::set_spot_angles`]
    pub angle_scale: f32,
    /// Spot cone attenuation offset, see [`Light::set_spot_angles`]
    pub angle_offset: f32,
    /// Position in world space
    pub position: Vec3,
    /// RGB color values (0.0 to 1.0 range)
    pub color: Vec3,
    /// Direction in world space
    pub direction: Vec3,
    /// Up vector for oriented area lights
    pub up: Vec3,
}

impl Light {
    /// Create a white light of the given type
    pub fn new(name: impl Into<String>, light_type: LightType) -> Self {
        Self {
            id: LightId::invalid(),
            name: name.into(),
            light_type,
            intensity: 1.0,
            range: 0.0,
            radius: 0.0,
            width: 0.0,
            height: 0.0,
            angle_scale: 0.0,
            angle_offset: 0.0,
            position: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            up: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Create point light with world-space position
    pub fn point(name: impl Into<String>, position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            range,
            ..Self::new(name, LightType::Point)
        }
    }

    /// Create directional light with world-space direction
    pub fn directional(name: impl Into<String>, direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
            ..Self::new(name, LightType::Directional)
        }
    }

    /// Scale and offset that turn `dot(L, -dir)` into a [0, 1] cone falloff
    ///
    /// Angles are half-angles in radians. The difference of cosines is
    /// clamped so that identical inner and outer angles stay finite.
    pub fn spot_scale_and_offset(inner_angle: f32, outer_angle: f32) -> (f32, f32) {
        let cos_outer = outer_angle.cos();
        let cos_inner = inner_angle.cos();
        let scale = 1.0 / (cos_inner - cos_outer).max(0.001);
        let offset = -cos_outer * scale;
        (scale, offset)
    }

    /// Store the cone falloff for the given inner and outer half-angles
    pub fn set_spot_angles(&mut self, inner_angle: f32, outer_angle: f32) {
        let (scale, offset) = Self::spot_scale_and_offset(inner_angle, outer_angle);
        self.angle_scale = scale;
        self.angle_offset = offset;
    }
}

impl_scene_entity!(Light, LightId, Light);
