//! Scene database
//!
//! The [`SceneStore`] owns every entity of a scene in fourteen dense,
//! append-only collections. An entity's identifier is its position in its
//! collection; cross-entity references are plain identifiers resolved by
//! index.

#[macro_use]
mod macros;

pub mod allocator;
pub mod axis_system;
pub mod entities;
pub mod ids;
pub mod merge;
pub mod store;
pub mod validate;
pub mod vertex_format;

pub use allocator::{IdAllocator, IdError};
pub use axis_system::{Axis, AxisSystem, Handedness, Unit};
pub use entities::{EntityKind, SceneEntity};
pub use ids::ObjectId;
pub use store::{EntityCollection, SceneStore};
pub use validate::IntegrityViolation;
pub use vertex_format::{AttributeValueType, VertexAttributeLayout, VertexAttributeType, VertexFormat};
