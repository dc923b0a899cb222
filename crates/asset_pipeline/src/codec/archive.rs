//! Byte-order-aware primitive readers and writers
//!
//! Every multi-byte scalar goes through the archive's [`ByteOrder`], so a
//! stream written big-endian reads back identically on any host as long as
//! the reader is given the same order. Sequences carry a `u32` element
//! count; strings are a `u32` byte count followed by UTF-8.

use crate::codec::error::CodecError;
use crate::foundation::math::{Aabb, Mat4, Quat, Quaternion, Transform, Vec2, Vec3, Vec4};
use crate::scene::ids::ObjectId;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// Upper bound on speculative preallocation from an untrusted length prefix
const PREALLOC_LIMIT: usize = 4096;

/// Byte order applied to every scalar of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Least significant byte first
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

macro_rules! write_scalar {
    ($self:ident, $method:ident, $value:expr) => {
        match $self.order {
            ByteOrder::Little => $self.writer.$method::<LittleEndian>($value)?,
            ByteOrder::Big => $self.writer.$method::<BigEndian>($value)?,
        }
    };
}

macro_rules! read_scalar {
    ($self:ident, $method:ident) => {
        match $self.order {
            ByteOrder::Little => $self.reader.$method::<LittleEndian>()?,
            ByteOrder::Big => $self.reader.$method::<BigEndian>()?,
        }
    };
}

/// Writes primitives to a byte stream in a fixed byte order
pub struct OutputArchive<W: Write> {
    writer: W,
    order: ByteOrder,
}

impl<W: Write> OutputArchive<W> {
    /// Wrap a writer
    pub fn new(writer: W, order: ByteOrder) -> Self {
        Self { writer, order }
    }

    /// Byte order in use
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), CodecError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Give the writer back
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write one byte
    pub fn write_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.writer.write_u8(value)?;
        Ok(())
    }

    /// Write a bool as one byte
    pub fn write_bool(&mut self, value: bool) -> Result<(), CodecError> {
        self.write_u8(u8::from(value))
    }

    /// Write a `u32`
    pub fn write_u32(&mut self, value: u32) -> Result<(), CodecError> {
        write_scalar!(self, write_u32, value);
        Ok(())
    }

    /// Write an `f32`
    pub fn write_f32(&mut self, value: f32) -> Result<(), CodecError> {
        write_scalar!(self, write_f32, value);
        Ok(())
    }

    /// Write a sequence length prefix
    pub fn write_len(&mut self, len: usize) -> Result<(), CodecError> {
        let len = u32::try_from(len).map_err(|_| CodecError::LengthOverflow(len))?;
        self.write_u32(len)
    }

    /// Write a length-prefixed UTF-8 string
    pub fn write_str(&mut self, value: &str) -> Result<(), CodecError> {
        self.write_len(value.len())?;
        self.writer.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Write an identifier's raw value
    pub fn write_id<I: ObjectId>(&mut self, id: I) -> Result<(), CodecError> {
        self.write_u32(id.data())
    }

    /// Write a length-prefixed sequence, one element at a time
    pub fn write_seq<T>(
        &mut self,
        items: &[T],
        mut write: impl FnMut(&mut Self, &T) -> Result<(), CodecError>,
    ) -> Result<(), CodecError> {
        self.write_len(items.len())?;
        for item in items {
            write(self, item)?;
        }
        Ok(())
    }

    /// Write a length-prefixed run of identifiers
    pub fn write_ids<I: ObjectId>(&mut self, ids: &[I]) -> Result<(), CodecError> {
        self.write_seq(ids, |out, &id| out.write_id(id))
    }

    /// Write packed `f32` components
    pub fn write_floats(&mut self, values: &[f32]) -> Result<(), CodecError> {
        for &value in values {
            self.write_f32(value)?;
        }
        Ok(())
    }

    /// Write x, y
    pub fn write_vec2(&mut self, value: &Vec2) -> Result<(), CodecError> {
        self.write_floats(value.as_slice())
    }

    /// Write x, y, z
    pub fn write_vec3(&mut self, value: &Vec3) -> Result<(), CodecError> {
        self.write_floats(value.as_slice())
    }

    /// Write x, y, z, w
    pub fn write_vec4(&mut self, value: &Vec4) -> Result<(), CodecError> {
        self.write_floats(value.as_slice())
    }

    /// Write a rotation as i, j, k, w
    pub fn write_quat(&mut self, value: &Quat) -> Result<(), CodecError> {
        self.write_floats(value.quaternion().coords.as_slice())
    }

    /// Write sixteen floats in column-major order
    pub fn write_mat4(&mut self, value: &Mat4) -> Result<(), CodecError> {
        self.write_floats(value.as_slice())
    }

    /// Write position, rotation, scale
    pub fn write_transform(&mut self, value: &Transform) -> Result<(), CodecError> {
        self.write_vec3(&value.position)?;
        self.write_quat(&value.rotation)?;
        self.write_vec3(&value.scale)
    }

    /// Write min then max
    pub fn write_aabb(&mut self, value: &Aabb) -> Result<(), CodecError> {
        self.write_vec3(&value.min)?;
        self.write_vec3(&value.max)
    }
}

/// Reads primitives from a byte stream in a fixed byte order
pub struct InputArchive<R: Read> {
    reader: R,
    order: ByteOrder,
}

impl<R: Read> InputArchive<R> {
    /// Wrap a reader
    pub fn new(reader: R, order: ByteOrder) -> Self {
        Self { reader, order }
    }

    /// Byte order in use
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Give the reader back
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.reader.read_u8()?)
    }

    /// Read a bool; any nonzero byte is `true`
    pub fn read_bool(&mut self) -> Result<bool, CodecError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a `u32`
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(read_scalar!(self, read_u32))
    }

    /// Read an `f32`
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(read_scalar!(self, read_f32))
    }

    /// Read a byte and map it to an enumeration variant
    pub fn read_enum<T>(&mut self, kind: &'static str, from_u8: fn(u8) -> Option<T>) -> Result<T, CodecError> {
        let value = self.read_u8()?;
        from_u8(value).ok_or(CodecError::UnknownEnumValue { kind, value })
    }

    /// Read a sequence length prefix
    pub fn read_len(&mut self) -> Result<usize, CodecError> {
        Ok(self.read_u32()? as usize)
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let len = self.read_len()?;
        let mut bytes = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        self.reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(String::from_utf8(bytes)?)
    }

    /// Read an identifier
    pub fn read_id<I: ObjectId>(&mut self) -> Result<I, CodecError> {
        Ok(I::from_raw(self.read_u32()?))
    }

    /// Read a length-prefixed sequence, one element at a time
    pub fn read_seq<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> Result<T, CodecError>,
    ) -> Result<Vec<T>, CodecError> {
        let len = self.read_len()?;
        let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            items.push(read(self)?);
        }
        Ok(items)
    }

    /// Read a length-prefixed run of identifiers
    pub fn read_ids<I: ObjectId>(&mut self) -> Result<Vec<I>, CodecError> {
        self.read_seq(Self::read_id::<I>)
    }

    fn read_floats<const N: usize>(&mut self) -> Result<[f32; N], CodecError> {
        let mut values = [0.0; N];
        for value in &mut values {
            *value = self.read_f32()?;
        }
        Ok(values)
    }

    /// Read x, y
    pub fn read_vec2(&mut self) -> Result<Vec2, CodecError> {
        let [x, y] = self.read_floats()?;
        Ok(Vec2::new(x, y))
    }

    /// Read x, y, z
    pub fn read_vec3(&mut self) -> Result<Vec3, CodecError> {
        let [x, y, z] = self.read_floats()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read x, y, z, w
    pub fn read_vec4(&mut self) -> Result<Vec4, CodecError> {
        let [x, y, z, w] = self.read_floats()?;
        Ok(Vec4::new(x, y, z, w))
    }

    /// Read a rotation stored as i, j, k, w
    ///
    /// The stored components are taken as-is, without renormalizing.
    pub fn read_quat(&mut self) -> Result<Quat, CodecError> {
        let [i, j, k, w] = self.read_floats()?;
        Ok(Quat::new_unchecked(Quaternion::new(w, i, j, k)))
    }

    /// Read sixteen floats in column-major order
    pub fn read_mat4(&mut self) -> Result<Mat4, CodecError> {
        let values: [f32; 16] = self.read_floats()?;
        Ok(Mat4::from_column_slice(&values))
    }

    /// Read position, rotation, scale
    pub fn read_transform(&mut self) -> Result<Transform, CodecError> {
        Ok(Transform {
            position: self.read_vec3()?,
            rotation: self.read_quat()?,
            scale: self.read_vec3()?,
        })
    }

    /// Read min then max
    pub fn read_aabb(&mut self) -> Result<Aabb, CodecError> {
        let min = self.read_vec3()?;
        let max = self.read_vec3()?;
        Ok(Aabb::new(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ids::MeshId;

    #[test]
    fn test_scalar_byte_order() {
        let mut little = OutputArchive::new(Vec::new(), ByteOrder::Little);
        little.write_u32(0x0102_0304).unwrap();
        assert_eq!(little.into_inner(), vec![0x04, 0x03, 0x02, 0x01]);

        let mut big = OutputArchive::new(Vec::new(), ByteOrder::Big);
        big.write_u32(0x0102_0304).unwrap();
        big.write_f32(1.0).unwrap();
        assert_eq!(big.into_inner(), vec![0x01, 0x02, 0x03, 0x04, 0x3f, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let mut out = OutputArchive::new(Vec::new(), ByteOrder::Big);
        out.write_str("box").unwrap();
        let bytes = out.into_inner();
        assert_eq!(bytes, vec![0, 0, 0, 3, b'b', b'o', b'x']);

        let mut input = InputArchive::new(bytes.as_slice(), ByteOrder::Big);
        assert_eq!(input.read_string().unwrap(), "box");
    }

    #[test]
    fn test_truncated_string() {
        let bytes = [5u8, 0, 0, 0, b'a', b'b'];
        let mut input = InputArchive::new(&bytes[..], ByteOrder::Little);
        assert!(input.read_string().unwrap_err().is_truncated());
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = [2u8, 0, 0, 0, 0xff, 0xfe];
        let mut input = InputArchive::new(&bytes[..], ByteOrder::Little);
        assert!(matches!(input.read_string(), Err(CodecError::InvalidUtf8(_))));
    }

    #[test]
    fn test_ids_and_math() {
        let rotation = Quat::from_euler_angles(0.1, 0.2, 0.3);
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let ids = vec![MeshId::new(3), MeshId::invalid()];

        let mut out = OutputArchive::new(Vec::new(), ByteOrder::Big);
        out.write_ids(&ids).unwrap();
        out.write_quat(&rotation).unwrap();
        out.write_mat4(&matrix).unwrap();
        let bytes = out.into_inner();
        assert_eq!(bytes.len(), 4 + 2 * 4 + 4 * 4 + 16 * 4);

        let mut input = InputArchive::new(bytes.as_slice(), ByteOrder::Big);
        assert_eq!(input.read_ids::<MeshId>().unwrap(), ids);
        assert_eq!(input.read_quat().unwrap(), rotation);
        assert_eq!(input.read_mat4().unwrap(), matrix);
    }

    #[test]
    fn test_unknown_enum_value() {
        let bytes = [9u8];
        let mut input = InputArchive::new(&bytes[..], ByteOrder::Little);
        let result = input.read_enum("LightType", crate::scene::entities::LightType::from_u8);
        assert!(matches!(
            result,
            Err(CodecError::UnknownEnumValue { kind: "LightType", value: 9 })
        ));
    }
}
