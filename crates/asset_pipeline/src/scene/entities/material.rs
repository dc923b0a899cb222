//! Materials and the textures they sample

use crate::foundation::math::{Vec2, Vec3};
use crate::scene::ids::{MaterialId, TextureId};
use std::collections::BTreeMap;

named_enum! {
    /// Which input of the shading model a texture feeds
    pub enum MaterialTextureType {
        /// Albedo / base color
        BaseColor = 0,
        /// Tangent-space normal map
        Normal = 1,
        /// Ambient occlusion
        Occlusion = 2,
        /// Roughness
        Roughness = 3,
        /// Metallic
        Metallic = 4,
        /// Emissive color
        Emissive = 5,
        /// Height / displacement
        Elevation = 6,
    }
}

named_enum! {
    /// How alpha is applied
    pub enum BlendMode {
        /// Alpha ignored
        Opaque = 0,
        /// Alpha tested against the cutoff
        Mask = 1,
        /// Alpha blended
        Blend = 2,
    }
}

named_enum! {
    /// Texture addressing outside [0, 1]
    pub enum TextureMapMode {
        /// Repeat
        Wrap = 0,
        /// Clamp to edge
        Clamp = 1,
        /// Mirrored repeat
        Mirror = 2,
        /// Clamp to border color
        Border = 3,
    }
}

/// A texture bound to one material slot
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTexture {
    /// Texture sampled by this slot
    pub texture_id: TextureId,
    /// UV scale applied before sampling
    pub uv_scale: Vec2,
    /// UV offset applied after scaling
    pub uv_offset: Vec2,
}

impl MaterialTexture {
    /// Slot with identity UV transform
    pub fn new(texture_id: TextureId) -> Self {
        Self {
            texture_id,
            uv_scale: Vec2::new(1.0, 1.0),
            uv_offset: Vec2::zeros(),
        }
    }
}

/// Metallic-roughness surface description
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub(crate) id: MaterialId,
    /// Display name
    pub name: String,
    /// Metallic factor in [0, 1]
    pub metallic: f32,
    /// Roughness factor in [0, 1]
    pub roughness: f32,
    /// Alpha cutoff used with [`BlendMode::Mask`]
    pub alpha_cutoff: f32,
    /// Render both faces
    pub two_sided: bool,
    /// Alpha handling
    pub blend_mode: BlendMode,
    /// Texture slots
    pub textures: BTreeMap<MaterialTextureType, MaterialTexture>,
    /// Base color factor
    pub base_color: Vec3,
    /// Emissive color factor
    pub emissive: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            id: MaterialId::invalid(),
            name: String::new(),
            metallic: 0.0,
            roughness: 0.9,
            alpha_cutoff: 0.5,
            two_sided: false,
            blend_mode: BlendMode::Opaque,
            textures: BTreeMap::new(),
            base_color: Vec3::new(1.0, 1.0, 1.0),
            emissive: Vec3::zeros(),
        }
    }
}

impl Material {
    /// Create a default white material
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Bind a texture to a slot, replacing any previous binding
    pub fn set_texture(&mut self, texture_type: MaterialTextureType, texture_id: TextureId) {
        self.textures.insert(texture_type, MaterialTexture::new(texture_id));
    }

    /// Texture bound to a slot
    pub fn texture_id(&self, texture_type: MaterialTextureType) -> Option<TextureId> {
        self.textures.get(&texture_type).map(|t| t.texture_id)
    }

    /// True if the slot has a texture
    pub fn is_texture_setup(&self, texture_type: MaterialTextureType) -> bool {
        self.textures.contains_key(&texture_type)
    }
}

impl_scene_entity!(Material, MaterialId, Material);

/// An image referenced by path
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub(crate) id: TextureId,
    /// Display name
    pub name: String,
    /// File path, as written by the producer
    pub path: String,
    /// Addressing along U
    pub u_map_mode: TextureMapMode,
    /// Addressing along V
    pub v_map_mode: TextureMapMode,
}

impl Texture {
    /// Create a wrapping texture
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: TextureId::invalid(),
            name: name.into(),
            path: path.into(),
            u_map_mode: TextureMapMode::Wrap,
            v_map_mode: TextureMapMode::Wrap,
        }
    }
}

impl_scene_entity!(Texture, TextureId, Texture);
