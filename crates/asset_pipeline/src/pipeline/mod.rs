//! Producer/consumer pipeline
//!
//! A [`Producer`] fills a scene store, a [`Consumer`] turns a finished store
//! into some artifact. The [`Processor`] owns the store between the two and
//! optionally validates and summarizes it on the way through.

pub mod binary;
pub mod box_mesh;

pub use binary::{BinaryConsumer, BinaryProducer};
pub use box_mesh::BoxMeshProducer;

use crate::buffer::BufferError;
use crate::codec::CodecError;
use crate::config::{ConfigError, PipelineConfig};
use crate::scene::allocator::IdError;
use crate::scene::store::SceneStore;
use crate::scene::validate::ValidationError;
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Identifier allocation left its range
    #[error("Identifier allocation failed: {0}")]
    Id(#[from] IdError),

    /// Reading or writing a scene stream failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Building GPU buffers failed
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// The produced scene is inconsistent
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Populates a scene store
pub trait Producer {
    /// Add this producer's entities to `store`, which may already hold some
    fn execute(&mut self, store: &mut SceneStore) -> Result<(), PipelineError>;
}

/// Emits an artifact from a finished scene store
pub trait Consumer {
    /// Read `store` and write the artifact
    fn execute(&mut self, store: &SceneStore) -> Result<(), PipelineError>;
}

/// Runs one producer into one consumer through a shared store
pub struct Processor<P: Producer, C: Consumer> {
    producer: P,
    consumer: C,
    store: SceneStore,
    validate: bool,
    dump: bool,
}

impl<P: Producer, C: Consumer> Processor<P, C> {
    /// Create a processor with an empty store, validation on and dump off
    pub fn new(producer: P, consumer: C) -> Self {
        Self {
            producer,
            consumer,
            store: SceneStore::default(),
            validate: true,
            dump: false,
        }
    }

    /// Apply the validation and dump switches of a configuration
    #[must_use]
    pub fn with_config(mut self, config: &PipelineConfig) -> Self {
        self.validate = config.validate;
        self.dump = config.dump;
        self
    }

    /// Start from an existing store instead of an empty one
    #[must_use]
    pub fn with_store(mut self, store: SceneStore) -> Self {
        self.store = store;
        self
    }

    /// The store as it currently stands
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Take the store out of the processor
    pub fn into_store(self) -> SceneStore {
        self.store
    }

    /// Run producer, checks, then consumer
    ///
    /// The consumer never sees a store that failed validation.
    pub fn run(&mut self) -> Result<(), PipelineError> {
        log::info!("Running producer...");
        self.producer.execute(&mut self.store)?;
        self.store.update_aabb();
        log::info!(
            "Produced scene \"{}\" with {} entities",
            self.store.name,
            self.store.total_count()
        );

        if self.dump {
            log::info!("{}", self.store.dump());
        }

        if self.validate {
            if let Err(error) = self.store.ensure_valid() {
                for violation in &error.violations {
                    log::error!("{violation}");
                }
                return Err(error.into());
            }
            log::debug!("Scene passed validation");
        }

        log::info!("Running consumer...");
        self.consumer.execute(&self.store)?;
        log::info!("Pipeline complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::entities::Track;

    struct TrackProducer;

    impl Producer for TrackProducer {
        fn execute(&mut self, store: &mut SceneStore) -> Result<(), PipelineError> {
            store.tracks.add(Track::new("empty"));
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingConsumer {
        runs: usize,
        entities: usize,
    }

    impl Consumer for CountingConsumer {
        fn execute(&mut self, store: &SceneStore) -> Result<(), PipelineError> {
            self.runs += 1;
            self.entities = store.total_count();
            Ok(())
        }
    }

    impl Consumer for &mut CountingConsumer {
        fn execute(&mut self, store: &SceneStore) -> Result<(), PipelineError> {
            (**self).execute(store)
        }
    }

    #[test]
    fn test_invalid_scene_stops_before_consumer() {
        let mut consumer = CountingConsumer::default();
        let mut processor = Processor::new(TrackProducer, &mut consumer);

        let result = processor.run();
        assert!(matches!(result, Err(PipelineError::Validation(_))));
        drop(processor);
        assert_eq!(consumer.runs, 0);
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let mut consumer = CountingConsumer::default();
        let config = PipelineConfig::new().with_validation(false).with_dump(true);
        let mut processor = Processor::new(TrackProducer, &mut consumer).with_config(&config);

        processor.run().unwrap();
        assert_eq!(processor.store().tracks.len(), 1);
        drop(processor);
        assert_eq!(consumer.runs, 1);
        assert_eq!(consumer.entities, 1);
    }

    #[test]
    fn test_producer_extends_existing_store() {
        let existing = crate::test_fixtures::full_scene();
        let mut consumer = CountingConsumer::default();
        let mut processor =
            Processor::new(BoxMeshProducer::new("crate", 0.5), &mut consumer).with_store(existing.clone());

        processor.run().unwrap();
        let store = processor.into_store();
        assert_eq!(store.name, existing.name);
        assert_eq!(store.meshes.len(), existing.meshes.len() + 1);
        assert_eq!(store.root_node_ids.len(), existing.root_node_ids.len() + 1);
        assert_eq!(consumer.entities, existing.total_count() + 3);
    }

    #[test]
    fn test_box_into_counting_consumer() {
        let mut consumer = CountingConsumer::default();
        let mut processor = Processor::new(BoxMeshProducer::new("crate", 0.5), &mut consumer);

        processor.run().unwrap();
        let store = processor.into_store();
        assert!(!store.aabb.is_empty());
        assert_eq!(consumer.entities, store.total_count());
    }
}
