//! Vertex layout descriptions
//!
//! A [`VertexFormat`] is an ordered list of attribute layouts. The buffer
//! builder packs attributes in exactly this order with no padding, so the
//! stride is the plain sum of every attribute's byte size.

named_enum! {
    /// Semantic of a vertex attribute
    pub enum VertexAttributeType {
        /// Object-space position
        Position = 0,
        /// Surface normal
        Normal = 1,
        /// Tangent for normal mapping
        Tangent = 2,
        /// Bitangent for normal mapping
        Bitangent = 3,
        /// Texture coordinate (first UV set)
        UV = 4,
        /// Vertex color (first color set)
        Color = 5,
        /// Skinning bone indices
        BoneIndex = 6,
        /// Skinning bone weights
        BoneWeight = 7,
    }
}

named_enum! {
    /// Scalar type of every component in an attribute
    pub enum AttributeValueType {
        /// Unsigned 8-bit integer
        Uint8 = 0,
        /// Unsigned 16-bit integer
        Uint16 = 1,
        /// Unsigned 32-bit integer
        Uint32 = 2,
        /// IEEE 754 single precision float
        Float32 = 3,
    }
}

impl AttributeValueType {
    /// Size in bytes of one component
    pub const fn size(self) -> usize {
        match self {
            Self::Uint8 => 1,
            Self::Uint16 => 2,
            Self::Uint32 | Self::Float32 => 4,
        }
    }
}

/// One attribute inside a vertex format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttributeLayout {
    /// Semantic
    pub kind: VertexAttributeType,
    /// Scalar type of each component
    pub value_type: AttributeValueType,
    /// Number of components
    pub count: u8,
}

impl VertexAttributeLayout {
    /// Size in bytes of the whole attribute
    pub const fn size(&self) -> usize {
        self.value_type.size() * self.count as usize
    }
}

/// Ordered set of vertex attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexFormat {
    layouts: Vec<VertexAttributeLayout>,
}

impl VertexFormat {
    /// Create an empty format
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute. A kind that is already present is replaced in place.
    pub fn add_attribute(&mut self, kind: VertexAttributeType, value_type: AttributeValueType, count: u8) {
        let layout = VertexAttributeLayout { kind, value_type, count };
        match self.layouts.iter_mut().find(|l| l.kind == kind) {
            Some(existing) => *existing = layout,
            None => self.layouts.push(layout),
        }
    }

    /// Builder form of [`Self::add_attribute`]
    #[must_use]
    pub fn with(mut self, kind: VertexAttributeType, value_type: AttributeValueType, count: u8) -> Self {
        self.add_attribute(kind, value_type, count);
        self
    }

    /// Position, normal and one UV set as floats
    pub fn position_normal_uv() -> Self {
        Self::new()
            .with(VertexAttributeType::Position, AttributeValueType::Float32, 3)
            .with(VertexAttributeType::Normal, AttributeValueType::Float32, 3)
            .with(VertexAttributeType::UV, AttributeValueType::Float32, 2)
    }

    /// [`Self::position_normal_uv`] plus four 16-bit bone indices and four weights
    pub fn position_normal_uv_skinned() -> Self {
        Self::position_normal_uv()
            .with(VertexAttributeType::BoneIndex, AttributeValueType::Uint16, 4)
            .with(VertexAttributeType::BoneWeight, AttributeValueType::Float32, 4)
    }

    /// True if the format has an attribute of this kind
    pub fn contains(&self, kind: VertexAttributeType) -> bool {
        self.layouts.iter().any(|l| l.kind == kind)
    }

    /// Layout of the attribute of this kind, if present
    pub fn get(&self, kind: VertexAttributeType) -> Option<&VertexAttributeLayout> {
        self.layouts.iter().find(|l| l.kind == kind)
    }

    /// Attributes in declaration order
    pub fn layouts(&self) -> &[VertexAttributeLayout] {
        &self.layouts
    }

    /// Bytes per vertex
    pub fn stride(&self) -> usize {
        self.layouts.iter().map(VertexAttributeLayout::size).sum()
    }

    /// True if no attribute is declared
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
