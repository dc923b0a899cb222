//! # Asset Pipeline
//!
//! In-memory scene database and conversion toolkit for 3D assets.
//!
//! ## Features
//!
//! - **Scene Store**: Dense, typed entity collections where an identifier is an index
//! - **Identifier Allocation**: Hash-keyed, deduplicating, range-bounded
//! - **Merging**: Append one scene into another with every reference rebased
//! - **Binary Codec**: Field-order-exact encoding in either byte order
//! - **GPU Buffers**: Interleaved vertex and 16/32-bit index buffers per layout
//! - **Pipeline**: Producer/consumer processing with validation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use asset_pipeline::prelude::*;
//!
//! fn main() -> Result<(), PipelineError> {
//!     let config = PipelineConfig::default();
//!     let producer = BoxMeshProducer::new("box", 0.5);
//!     let consumer = BinaryConsumer::new("box.bin", config.codec.byte_order);
//!
//!     let mut processor = Processor::new(producer, consumer).with_config(&config);
//!     processor.run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod buffer;
pub mod codec;
pub mod config;
pub mod foundation;
pub mod pipeline;
pub mod scene;

#[cfg(test)]
mod test_fixtures;

/// Common imports for pipeline users
pub mod prelude {
    pub use crate::{
        buffer::{
            build_index_buffers, build_mesh_buffers, build_skeletal_vertex_buffer, build_vertex_buffer,
            index_format, BufferError, IndexFormat, MeshBuffers,
        },
        codec::{decode_store, encode_store, ByteOrder, CodecError},
        config::{Config, ConfigError, PipelineConfig},
        foundation::math::{Aabb, Mat4, Quat, Transform, Vec2, Vec3, Vec4},
        pipeline::{BinaryConsumer, BinaryProducer, BoxMeshProducer, Consumer, PipelineError, Processor, Producer},
        scene::{
            entities::*,
            ids::*,
            Axis, AxisSystem, EntityCollection, EntityKind, Handedness, IdAllocator, IdError, IntegrityViolation,
            SceneEntity, SceneStore, Unit, VertexFormat,
        },
    };
}
