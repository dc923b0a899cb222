//! Scene files in the binary codec layout

use crate::codec::{self, ByteOrder};
use crate::pipeline::{Consumer, PipelineError, Producer};
use crate::scene::store::SceneStore;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Reads a scene file and merges it into the target store
///
/// An empty target takes over the file's name, axis system and unit.
#[derive(Debug, Clone)]
pub struct BinaryProducer {
    path: PathBuf,
    byte_order: ByteOrder,
}

impl BinaryProducer {
    /// Read `path` with the given byte order
    pub fn new(path: impl Into<PathBuf>, byte_order: ByteOrder) -> Self {
        Self {
            path: path.into(),
            byte_order,
        }
    }

    /// Source file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Producer for BinaryProducer {
    fn execute(&mut self, store: &mut SceneStore) -> Result<(), PipelineError> {
        log::info!("Reading scene from {}", self.path.display());
        let reader = BufReader::new(File::open(&self.path)?);
        let scene = codec::decode_store(reader, self.byte_order)?;
        log::debug!("Decoded {} entities", scene.total_count());

        if store.is_empty() {
            if store.name.is_empty() {
                store.name.clone_from(&scene.name);
            }
            store.axis_system = scene.axis_system;
            store.unit = scene.unit;
        }
        store.merge(scene);
        Ok(())
    }
}

/// Writes the store to a scene file
#[derive(Debug, Clone)]
pub struct BinaryConsumer {
    path: PathBuf,
    byte_order: ByteOrder,
}

impl BinaryConsumer {
    /// Write `path` with the given byte order
    pub fn new(path: impl Into<PathBuf>, byte_order: ByteOrder) -> Self {
        Self {
            path: path.into(),
            byte_order,
        }
    }

    /// Destination file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Consumer for BinaryConsumer {
    fn execute(&mut self, store: &SceneStore) -> Result<(), PipelineError> {
        log::info!("Writing scene \"{}\" to {}", store.name, self.path.display());
        let writer = BufWriter::new(File::create(&self.path)?);
        let writer = codec::encode_store(store, writer, self.byte_order)?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(())
    }
}
