//! Binary scene codec
//!
//! A stream is the store header (name, axis system, unit, root nodes, scene
//! box) followed by
//! one block per entity kind in [`EntityKind`] order. Each block is a `u32`
//! count and that many entities. There is no magic number and no version;
//! reader and writer must agree on the byte order out of band.

pub mod archive;
pub mod entities;
pub mod error;

pub use archive::{ByteOrder, InputArchive, OutputArchive};
pub use error::CodecError;

use crate::scene::axis_system::{Axis, AxisSystem, Handedness, Unit};
use crate::scene::entities::{EntityKind, SceneEntity};
use crate::scene::store::{EntityCollection, SceneStore};
use std::io::{Read, Write};

/// Writes a value to an [`OutputArchive`]
pub trait Encode {
    /// Write every field in wire order
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError>;
}

/// Reads a value from an [`InputArchive`]
pub trait Decode: Sized {
    /// Read every field in wire order
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError>;
}

fn encode_collection<T, W>(out: &mut OutputArchive<W>, collection: &EntityCollection<T>) -> Result<(), CodecError>
where
    T: SceneEntity + Encode,
    W: Write,
{
    out.write_len(collection.len())?;
    for entity in collection {
        entity.encode(out)?;
    }
    Ok(())
}

fn decode_collection<T, R>(input: &mut InputArchive<R>, collection: &mut EntityCollection<T>) -> Result<(), CodecError>
where
    T: SceneEntity + Decode,
    R: Read,
{
    let count = input.read_len()?;
    for _ in 0..count {
        collection.push_raw(T::decode(input)?);
    }
    log::debug!("Decoded {count} {}", T::KIND);
    Ok(())
}

impl Encode for AxisSystem {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_u8(self.handedness.as_u8())?;
        out.write_u8(self.up.as_u8())?;
        out.write_u8(self.front.as_u8())
    }
}

impl Decode for AxisSystem {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        Ok(Self {
            handedness: input.read_enum("Handedness", Handedness::from_u8)?,
            up: input.read_enum("Axis", Axis::from_u8)?,
            front: input.read_enum("Axis", Axis::from_u8)?,
        })
    }
}

impl Encode for SceneStore {
    fn encode<W: Write>(&self, out: &mut OutputArchive<W>) -> Result<(), CodecError> {
        out.write_str(&self.name)?;
        self.axis_system.encode(out)?;
        out.write_u8(self.unit.as_u8())?;
        out.write_ids(&self.root_node_ids)?;
        out.write_aabb(&self.aabb)?;

        for &kind in EntityKind::ALL {
            match kind {
                EntityKind::Node => encode_collection(out, &self.nodes)?,
                EntityKind::Mesh => encode_collection(out, &self.meshes)?,
                EntityKind::Material => encode_collection(out, &self.materials)?,
                EntityKind::Texture => encode_collection(out, &self.textures)?,
                EntityKind::Light => encode_collection(out, &self.lights)?,
                EntityKind::Camera => encode_collection(out, &self.cameras)?,
                EntityKind::Skin => encode_collection(out, &self.skins)?,
                EntityKind::Skeleton => encode_collection(out, &self.skeletons)?,
                EntityKind::Bone => encode_collection(out, &self.bones)?,
                EntityKind::BlendShape => encode_collection(out, &self.blend_shapes)?,
                EntityKind::Morph => encode_collection(out, &self.morphs)?,
                EntityKind::Animation => encode_collection(out, &self.animations)?,
                EntityKind::Track => encode_collection(out, &self.tracks)?,
                EntityKind::ParticleEmitter => encode_collection(out, &self.particle_emitters)?,
            }
        }
        Ok(())
    }
}

impl Decode for SceneStore {
    fn decode<R: Read>(input: &mut InputArchive<R>) -> Result<Self, CodecError> {
        let mut store = SceneStore::new(input.read_string()?);
        store.axis_system = AxisSystem::decode(input)?;
        store.unit = input.read_enum("Unit", Unit::from_u8)?;
        store.root_node_ids = input.read_ids()?;
        store.aabb = input.read_aabb()?;

        for &kind in EntityKind::ALL {
            match kind {
                EntityKind::Node => decode_collection(input, &mut store.nodes)?,
                EntityKind::Mesh => decode_collection(input, &mut store.meshes)?,
                EntityKind::Material => decode_collection(input, &mut store.materials)?,
                EntityKind::Texture => decode_collection(input, &mut store.textures)?,
                EntityKind::Light => decode_collection(input, &mut store.lights)?,
                EntityKind::Camera => decode_collection(input, &mut store.cameras)?,
                EntityKind::Skin => decode_collection(input, &mut store.skins)?,
                EntityKind::Skeleton => decode_collection(input, &mut store.skeletons)?,
                EntityKind::Bone => decode_collection(input, &mut store.bones)?,
                EntityKind::BlendShape => decode_collection(input, &mut store.blend_shapes)?,
                EntityKind::Morph => decode_collection(input, &mut store.morphs)?,
                EntityKind::Animation => decode_collection(input, &mut store.animations)?,
                EntityKind::Track => decode_collection(input, &mut store.tracks)?,
                EntityKind::ParticleEmitter => decode_collection(input, &mut store.particle_emitters)?,
            }
        }
        Ok(store)
    }
}

/// Encode a whole store into a writer
pub fn encode_store<W: Write>(store: &SceneStore, writer: W, order: ByteOrder) -> Result<W, CodecError> {
    let mut out = OutputArchive::new(writer, order);
    store.encode(&mut out)?;
    out.flush()?;
    Ok(out.into_inner())
}

/// Decode a whole store from a reader
///
/// Identifiers are restored exactly as stored, so a corrupted stream shows
/// up in [`SceneStore::validate`] rather than being silently renumbered.
pub fn decode_store<R: Read>(reader: R, order: ByteOrder) -> Result<SceneStore, CodecError> {
    let mut input = InputArchive::new(reader, order);
    SceneStore::decode(&mut input)
}

/// Encode a store into a fresh byte vector
pub fn to_bytes(store: &SceneStore, order: ByteOrder) -> Result<Vec<u8>, CodecError> {
    encode_store(store, Vec::new(), order)
}

/// Decode a store from a byte slice
pub fn from_bytes(bytes: &[u8], order: ByteOrder) -> Result<SceneStore, CodecError> {
    decode_store(bytes, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::entities::{Light, LightType, Node};
    use crate::scene::ids::NodeId;
    use crate::test_fixtures;

    #[test]
    fn test_round_trip_little_endian() {
        let store = test_fixtures::full_scene();
        let bytes = to_bytes(&store, ByteOrder::Little).unwrap();
        let decoded = from_bytes(&bytes, ByteOrder::Little).unwrap();
        assert_eq!(decoded, store);
    }

    #[test]
    fn test_round_trip_big_endian() {
        let store = test_fixtures::full_scene();
        let bytes = to_bytes(&store, ByteOrder::Big).unwrap();
        let decoded = from_bytes(&bytes, ByteOrder::Big).unwrap();
        assert_eq!(decoded, store);
    }

    #[test]
    fn test_byte_orders_differ_only_in_layout() {
        let store = test_fixtures::full_scene();
        let little = to_bytes(&store, ByteOrder::Little).unwrap();
        let big = to_bytes(&store, ByteOrder::Big).unwrap();
        assert_eq!(little.len(), big.len());
        assert_ne!(little, big);
    }

    #[test]
    fn test_empty_store_layout() {
        let store = SceneStore::new("");
        let bytes = to_bytes(&store, ByteOrder::Little).unwrap();
        // name length, axis system and unit, root count, box, then fourteen zero counts
        assert_eq!(bytes.len(), 4 + 4 + 4 + 24 + 14 * 4);
        assert_eq!(from_bytes(&bytes, ByteOrder::Little).unwrap(), store);
    }

    #[test]
    fn test_first_node_starts_after_header() {
        let mut store = SceneStore::new("n");
        store.add_root_node(Node::new("root"));
        let bytes = to_bytes(&store, ByteOrder::Big).unwrap();

        // name "n" (4 + 1), axes and unit (4), one root id (4 + 4), box (24), node count (4)
        let node = &bytes[5 + 4 + 8 + 24 + 4..];
        assert_eq!(&node[..4], &[0, 0, 0, 0]);
        assert_eq!(&node[4..8], &[0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_decoded_ids_are_kept_verbatim() {
        let mut store = SceneStore::new("ids");
        store.nodes.add(Node::new("a"));
        let mut bytes = to_bytes(&store, ByteOrder::Little).unwrap();

        // Patch the node id, which follows name (4 + 3), axes and unit (4), roots (4), box (24), count (4).
        let offset = 7 + 4 + 4 + 24 + 4;
        bytes[offset..offset + 4].copy_from_slice(&5u32.to_le_bytes());

        let decoded = from_bytes(&bytes, ByteOrder::Little).unwrap();
        assert_eq!(decoded.nodes.iter().next().map(|n| n.id), Some(NodeId::new(5)));
        assert!(!decoded.validate().is_empty());
    }

    #[test]
    fn test_axis_system_and_unit_follow_name() {
        let mut store = SceneStore::new("");
        store.axis_system = AxisSystem::right_handed_z_up();
        store.unit = Unit::Meter;
        let bytes = to_bytes(&store, ByteOrder::Big).unwrap();

        assert_eq!(
            &bytes[4..8],
            &[
                Handedness::Right.as_u8(),
                Axis::PositiveZ.as_u8(),
                Axis::NegativeY.as_u8(),
                Unit::Meter.as_u8()
            ]
        );
        assert_eq!(from_bytes(&bytes, ByteOrder::Big).unwrap(), store);
    }

    #[test]
    fn test_unknown_unit() {
        let mut bytes = to_bytes(&SceneStore::new(""), ByteOrder::Little).unwrap();
        bytes[7] = 9;

        assert!(matches!(
            from_bytes(&bytes, ByteOrder::Little),
            Err(CodecError::UnknownEnumValue { kind: "Unit", value: 9 })
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let store = test_fixtures::full_scene();
        let bytes = to_bytes(&store, ByteOrder::Little).unwrap();
        let error = from_bytes(&bytes[..bytes.len() - 3], ByteOrder::Little).unwrap_err();
        assert!(error.is_truncated());
    }

    #[test]
    fn test_unknown_light_type() {
        let mut store = SceneStore::new("");
        store.lights.add(Light::new("sun", LightType::Directional));
        let mut bytes = to_bytes(&store, ByteOrder::Little).unwrap();

        // Header (4 + 4 + 4 + 24), four empty blocks before lights, light count, light id.
        let offset = 36 + 4 * 4 + 4 + 4;
        assert_eq!(bytes[offset], LightType::Directional.as_u8());
        bytes[offset] = 200;

        assert!(matches!(
            from_bytes(&bytes, ByteOrder::Little),
            Err(CodecError::UnknownEnumValue { kind: "LightType", value: 200 })
        ));
    }
}
