//! Strongly-typed entity identifiers
//!
//! Every entity kind gets its own `u32` newtype so that a `MeshId` can never
//! be stored where a `MaterialId` is expected. Identifiers double as indices
//! into the owning collection of the store. `u32::MAX` is reserved as the
//! invalid sentinel meaning "no reference".

use std::fmt;

/// Common behaviour of every typed identifier
pub trait ObjectId: Copy + Eq + std::hash::Hash + fmt::Debug {
    /// Type name used in diagnostics
    const NAME: &'static str;
    /// Smallest identifier value an allocator may hand out
    const MIN: u32 = 0;
    /// Largest identifier value an allocator may hand out
    const MAX: u32 = u32::MAX - 1;
    /// Sentinel for "no reference"
    const INVALID: u32 = u32::MAX;

    /// Wrap a raw value
    fn from_raw(raw: u32) -> Self;

    /// The raw value
    fn data(self) -> u32;

    /// True unless this is the invalid sentinel
    fn is_valid(self) -> bool {
        self.data() != Self::INVALID
    }

    /// Identifier used as a collection index
    fn index(self) -> usize {
        self.data() as usize
    }
}

macro_rules! define_object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Identifier with the given raw value
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// The "no reference" sentinel
            pub const fn invalid() -> Self {
                Self(u32::MAX)
            }

            /// The raw value
            pub const fn data(self) -> u32 {
                self.0
            }

            /// True unless this is the invalid sentinel
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }

            /// Identifier used as a collection index
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Shift a valid identifier by `offset`; the sentinel stays invalid.
            #[must_use]
            pub fn offset(self, offset: u32) -> Self {
                if self.is_valid() {
                    Self(self.0.saturating_add(offset))
                } else {
                    self
                }
            }
        }

        impl ObjectId for $name {
            const NAME: &'static str = stringify!($name);

            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            fn data(self) -> u32 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}", self.0)
                } else {
                    f.write_str("invalid")
                }
            }
        }
    };
}

define_object_id!(
    /// Identifies a node in the transform hierarchy.
    NodeId
);
define_object_id!(
    /// Identifies a mesh.
    MeshId
);
define_object_id!(
    /// Identifies a material.
    MaterialId
);
define_object_id!(
    /// Identifies a texture.
    TextureId
);
define_object_id!(
    /// Identifies a light.
    LightId
);
define_object_id!(
    /// Identifies a camera.
    CameraId
);
define_object_id!(
    /// Identifies a skin binding a mesh to a skeleton.
    SkinId
);
define_object_id!(
    /// Identifies a skeleton.
    SkeletonId
);
define_object_id!(
    /// Identifies a bone.
    BoneId
);
define_object_id!(
    /// Identifies a blend shape.
    BlendShapeId
);
define_object_id!(
    /// Identifies a morph target.
    MorphId
);
define_object_id!(
    /// Identifies an animation clip.
    AnimationId
);
define_object_id!(
    /// Identifies an animation track.
    TrackId
);
define_object_id!(
    /// Identifies a particle emitter.
    ParticleEmitterId
);
define_object_id!(
    /// Mesh-local vertex (or vertex instance) index.
    VertexId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_keeps_sentinel_invalid() {
        assert_eq!(MeshId::new(3).offset(4), MeshId::new(7));
        assert_eq!(MeshId::invalid().offset(4), MeshId::invalid());
        assert!(!NodeId::default().is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(BoneId::new(12).to_string(), "12");
        assert_eq!(BoneId::invalid().to_string(), "invalid");
    }
}
