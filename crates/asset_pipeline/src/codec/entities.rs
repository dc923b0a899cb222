//! Field order of every entity on the wire
//!
//! Each entity writes its fixed-size scalars first, then its variable-length
//! sequences (each with a length prefix), then its math values as packed
//! floats. Decoding reads the same fields in the same order.

use crate::codec::archive::{InputArchive, OutputArchive};
use crate::codec::error::CodecError;
use crate::codec::{Decode, Encode};
use crate::scene::entities::{
    Animation, BlendMode, BlendShape, Bone, Camera, KeyFrame, Light, LightType, Material,
    MaterialTexture, MaterialTextureType, Mesh, Morph, Node, ParticleEmitter, ParticleEmitterType,
    Skeleton, Skin, Texture, TextureMapMode, Track,
};
use crate::scene::vertex_format::{AttributeValueType, VertexAttributeType, VertexFormat};
use std::io::{Read, Write};

impl Encode for Node {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_id(self.parent_id)?;
        out.write_str(&self.name)?;
        out.write_ids(&self.child_ids)?;
        out.write_ids(&self.mesh_ids)?;
        out.write_transform(&self.transform)
    }
}

impl Decode for Node {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            parent_id: input.read_id()?,
            name: input.read_string()?,
            child_ids: input.read_ids()?,
            mesh_ids: input.read_ids()?,
            transform: input.read_transform()?,
        })
    }
}

fn encode_vertex_format<W: Write>(out: &mut OutputArchive<W>, format: &VertexFormat) -> Result<(), CodecError> {
    out.write_seq(format.layouts(), |out, layout| {
        out.write_u8(layout.kind.as_u8())?;
        out.write_u8(layout.value_type.as_u8())?;
        out.write_u8(layout.count)
    })
}

fn decode_vertex_format<R: Read>(input: &mut InputArchive<R>) -> Result<VertexFormat, CodecError> {
    let layouts = input.read_seq(|input| {
        let kind = input.read_enum("VertexAttributeType", VertexAttributeType::from_u8)?;
        let value_type = input.read_enum("AttributeValueType", AttributeValueType::from_u8)?;
        let count = input.read_u8()?;
        Ok((kind, value_type, count))
    })?;
    let mut format = VertexFormat::new();
    for (kind, value_type, count) in layouts {
        format.add_attribute(kind, value_type, count);
    }
    Ok(format)
}

impl Encode for Mesh {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_str(&self.name)?;
        out.write_seq(&self.vertex_positions, |out, v| out.write_vec3(v))?;
        out.write_ids(&self.vertex_instance_to_vertex)?;
        out.write_seq(&self.vertex_normals, |out, v| out.write_vec3(v))?;
        out.write_seq(&self.vertex_tangents, |out, v| out.write_vec3(v))?;
        out.write_seq(&self.vertex_bitangents, |out, v| out.write_vec3(v))?;
        out.write_seq(&self.vertex_uv_sets, |out, set| {
            out.write_seq(set, |out, uv| out.write_vec2(uv))
        })?;
        out.write_seq(&self.vertex_color_sets, |out, set| {
            out.write_seq(set, |out, color| out.write_vec4(color))
        })?;
        out.write_seq(&self.polygon_groups, |out, group| {
            out.write_seq(group, |out, polygon| {
                polygon.iter().try_for_each(|&corner| out.write_id(corner))
            })
        })?;
        out.write_ids(&self.material_ids)?;
        out.write_ids(&self.blend_shape_ids)?;
        out.write_ids(&self.skin_ids)?;
        encode_vertex_format(out, &self.vertex_format)?;
        out.write_aabb(&self.aabb)
    }
}

impl Decode for Mesh {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            name: input.read_string()?,
            vertex_positions: input.read_seq(InputArchive::read_vec3)?,
            vertex_instance_to_vertex: input.read_ids()?,
            vertex_normals: input.read_seq(InputArchive::read_vec3)?,
            vertex_tangents: input.read_seq(InputArchive::read_vec3)?,
            vertex_bitangents: input.read_seq(InputArchive::read_vec3)?,
            vertex_uv_sets: input.read_seq(|input| input.read_seq(InputArchive::read_vec2))?,
            vertex_color_sets: input.read_seq(|input| input.read_seq(InputArchive::read_vec4))?,
            polygon_groups: input.read_seq(|input| {
                input.read_seq(|input| Ok([input.read_id()?, input.read_id()?, input.read_id()?]))
            })?,
            material_ids: input.read_ids()?,
            blend_shape_ids: input.read_ids()?,
            skin_ids: input.read_ids()?,
            vertex_format: decode_vertex_format(input)?,
            aabb: input.read_aabb()?,
        })
    }
}

impl Encode for Material {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_u8(self.blend_mode.as_u8())?;
        out.write_f32(self.metallic)?;
        out.write_f32(self.roughness)?;
        out.write_f32(self.alpha_cutoff)?;
        out.write_bool(self.two_sided)?;
        out.write_str(&self.name)?;
        out.write_len(self.textures.len())?;
        for (texture_type, texture) in &self.textures {
            out.write_u8(texture_type.as_u8())?;
            out.write_id(texture.texture_id)?;
            out.write_vec2(&texture.uv_scale)?;
            out.write_vec2(&texture.uv_offset)?;
        }
        out.write_vec3(&self.base_color)?;
        out.write_vec3(&self.emissive)
    }
}

impl Decode for Material {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        let id = input.read_id()?;
        let blend_mode = input.read_enum("BlendMode", BlendMode::from_u8)?;
        let metallic = input.read_f32()?;
        let roughness = input.read_f32()?;
        let alpha_cutoff = input.read_f32()?;
        let two_sided = input.read_bool()?;
        let name = input.read_string()?;
        let textures = input
            .read_seq(|input| {
                let texture_type = input.read_enum("MaterialTextureType", MaterialTextureType::from_u8)?;
                let texture = MaterialTexture {
                    texture_id: input.read_id()?,
                    uv_scale: input.read_vec2()?,
                    uv_offset: input.read_vec2()?,
                };
                Ok((texture_type, texture))
            })?
            .into_iter()
            .collect();
        Ok(Self {
            id,
            name,
            metallic,
            roughness,
            alpha_cutoff,
            two_sided,
            blend_mode,
            textures,
            base_color: input.read_vec3()?,
            emissive: input.read_vec3()?,
        })
    }
}

impl Encode for Texture {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_u8(self.u_map_mode.as_u8())?;
        out.write_u8(self.v_map_mode.as_u8())?;
        out.write_str(&self.name)?;
        out.write_str(&self.path)
    }
}

impl Decode for Texture {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            u_map_mode: input.read_enum("TextureMapMode", TextureMapMode::from_u8)?,
            v_map_mode: input.read_enum("TextureMapMode", TextureMapMode::from_u8)?,
            name: input.read_string()?,
            path: input.read_string()?,
        })
    }
}

impl Encode for Light {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_u8(self.light_type.as_u8())?;
        out.write_floats(&[
            self.intensity,
            self.range,
            self.radius,
            self.width,
            self.height,
            self.angle_scale,
            self.angle_offset,
        ])?;
        out.write_str(&self.name)?;
        out.write_vec3(&self.position)?;
        out.write_vec3(&self.color)?;
        out.write_vec3(&self.direction)?;
        out.write_vec3(&self.up)
    }
}

impl Decode for Light {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            light_type: input.read_enum("LightType", LightType::from_u8)?,
            intensity: input.read_f32()?,
            range: input.read_f32()?,
            radius: input.read_f32()?,
            width: input.read_f32()?,
            height: input.read_f32()?,
            angle_scale: input.read_f32()?,
            angle_offset: input.read_f32()?,
            name: input.read_string()?,
            position: input.read_vec3()?,
            color: input.read_vec3()?,
            direction: input.read_vec3()?,
            up: input.read_vec3()?,
        })
    }
}

impl Encode for Camera {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_floats(&[self.near_plane, self.far_plane, self.aspect, self.fov])?;
        out.write_str(&self.name)?;
        out.write_vec3(&self.eye)?;
        out.write_vec3(&self.look_at)?;
        out.write_vec3(&self.up)
    }
}

impl Decode for Camera {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            near_plane: input.read_f32()?,
            far_plane: input.read_f32()?,
            aspect: input.read_f32()?,
            fov: input.read_f32()?,
            name: input.read_string()?,
            eye: input.read_vec3()?,
            look_at: input.read_vec3()?,
            up: input.read_vec3()?,
        })
    }
}

impl Encode for Skin {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_id(self.mesh_id)?;
        out.write_id(self.skeleton_id)?;
        out.write_u32(self.max_vertex_influence_count)?;
        out.write_str(&self.name)?;
        out.write_seq(&self.vertex_bone_names, |out, names| {
            out.write_seq(names, |out, name| out.write_str(name))
        })?;
        out.write_seq(&self.vertex_bone_weights, |out, weights| {
            out.write_seq(weights, |out, &weight| out.write_f32(weight))
        })
    }
}

impl Decode for Skin {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            mesh_id: input.read_id()?,
            skeleton_id: input.read_id()?,
            max_vertex_influence_count: input.read_u32()?,
            name: input.read_string()?,
            vertex_bone_names: input.read_seq(|input| input.read_seq(InputArchive::read_string))?,
            vertex_bone_weights: input.read_seq(|input| input.read_seq(InputArchive::read_f32))?,
        })
    }
}

impl Encode for Skeleton {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_id(self.root_bone_id)?;
        out.write_str(&self.name)?;
        out.write_ids(&self.bone_ids)
    }
}

impl Decode for Skeleton {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            root_bone_id: input.read_id()?,
            name: input.read_string()?,
            bone_ids: input.read_ids()?,
        })
    }
}

impl Encode for Bone {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_id(self.parent_id)?;
        out.write_id(self.skeleton_id)?;
        out.write_str(&self.name)?;
        out.write_ids(&self.child_ids)?;
        out.write_mat4(&self.offset)?;
        out.write_transform(&self.transform)
    }
}

impl Decode for Bone {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            parent_id: input.read_id()?,
            skeleton_id: input.read_id()?,
            name: input.read_string()?,
            child_ids: input.read_ids()?,
            offset: input.read_mat4()?,
            transform: input.read_transform()?,
        })
    }
}

impl Encode for BlendShape {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_id(self.mesh_id)?;
        out.write_str(&self.name)?;
        out.write_ids(&self.morph_ids)
    }
}

impl Decode for BlendShape {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            mesh_id: input.read_id()?,
            name: input.read_string()?,
            morph_ids: input.read_ids()?,
        })
    }
}

impl Encode for Morph {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_id(self.blend_shape_id)?;
        out.write_f32(self.weight)?;
        out.write_str(&self.name)?;
        out.write_ids(&self.vertex_source_ids)?;
        out.write_seq(&self.vertex_positions, |out, v| out.write_vec3(v))
    }
}

impl Decode for Morph {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            blend_shape_id: input.read_id()?,
            weight: input.read_f32()?,
            name: input.read_string()?,
            vertex_source_ids: input.read_ids()?,
            vertex_positions: input.read_seq(InputArchive::read_vec3)?,
        })
    }
}

impl Encode for Animation {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_f32(self.duration)?;
        out.write_f32(self.ticks_per_second)?;
        out.write_str(&self.name)?;
        out.write_ids(&self.track_ids)
    }
}

impl Decode for Animation {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            duration: input.read_f32()?,
            ticks_per_second: input.read_f32()?,
            name: input.read_string()?,
            track_ids: input.read_ids()?,
        })
    }
}

fn decode_key<R: Read, T>(
    input: &mut InputArchive<R>,
    read_value: fn(&mut InputArchive<R>) -> Result<T, CodecError>,
) -> Result<KeyFrame<T>, CodecError> {
    let time = input.read_f32()?;
    Ok(KeyFrame::new(time, read_value(input)?))
}

impl Encode for Track {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_str(&self.name)?;
        out.write_seq(&self.translation_keys, |out, key| {
            out.write_f32(key.time)?;
            out.write_vec3(&key.value)
        })?;
        out.write_seq(&self.rotation_keys, |out, key| {
            out.write_f32(key.time)?;
            out.write_quat(&key.value)
        })?;
        out.write_seq(&self.scale_keys, |out, key| {
            out.write_f32(key.time)?;
            out.write_vec3(&key.value)
        })
    }
}

impl Decode for Track {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            name: input.read_string()?,
            translation_keys: input.read_seq(|input| decode_key(input, InputArchive::read_vec3))?,
            rotation_keys: input.read_seq(|input| decode_key(input, InputArchive::read_quat))?,
            scale_keys: input.read_seq(|input| decode_key(input, InputArchive::read_vec3))?,
        })
    }
}

impl Encode for ParticleEmitter {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_id(self.id)?;
        out.write_u8(self.emitter_type.as_u8())?;
        out.write_u32(self.max_count)?;
        out.write_str(&self.name)?;
        out.write_vec3(&self.position)?;
        out.write_vec3(&self.velocity)?;
        out.write_vec3(&self.accelerate)?;
        out.write_vec4(&self.color)?;
        out.write_vec3(&self.fixed_rotation)?;
        out.write_vec3(&self.fixed_scale)
    }
}

impl Decode for ParticleEmitter {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.read_id()?,
            emitter_type: input.read_enum("ParticleEmitterType", ParticleEmitterType::from_u8)?,
            max_count: input.read_u32()?,
            name: input.read_string()?,
            position: input.read_vec3()?,
            velocity: input.read_vec3()?,
            accelerate: input.read_vec3()?,
            color: input.read_vec4()?,
            fixed_rotation: input.read_vec3()?,
            fixed_scale: input.read_vec3()?,
        })
    }
}
