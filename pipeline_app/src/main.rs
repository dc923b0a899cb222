//! Box-to-binary pipeline application
//!
//! Generates a box mesh scene, writes it with the binary codec, reads it
//! back and builds GPU buffers for every mesh.
//!
//! Usage: `box_to_binary [config.toml|config.ron]`

use asset_pipeline::foundation::logging;
use asset_pipeline::prelude::*;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "box_scene.bin";

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Keeps a copy of the scene a run produced
struct SceneCollector(SceneStore);

impl Consumer for &mut SceneCollector {
    fn execute(&mut self, store: &SceneStore) -> Result<(), PipelineError> {
        self.0 = store.clone();
        Ok(())
    }
}

fn load_config() -> Result<PipelineConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::load_from_file(path)?,
        None => PipelineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(config: &PipelineConfig) -> Result<(), AppError> {
    let output = config
        .output_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let order = config.codec.byte_order;

    log::info!("Writing box scene to {} ({order:?})", output.display());
    let mut writer = Processor::new(
        BoxMeshProducer::new("box", 0.5),
        BinaryConsumer::new(&output, order),
    )
    .with_config(config);
    writer.run()?;

    let mut collector = SceneCollector(SceneStore::default());
    Processor::new(BinaryProducer::new(&output, order), &mut collector)
        .with_config(config)
        .run()?;
    let scene = collector.0;
    log::info!("Read back '{}' with {} entities", scene.name, scene.total_count());
    log::debug!("{}", scene.dump());

    for mesh in &scene.meshes {
        let buffers = build_mesh_buffers(&scene, mesh.id(), &mesh.vertex_format, config.buffers.force_index32)?;
        log::info!(
            "Mesh '{}': {} vertex bytes, {} index buffer(s) as {:?}",
            mesh.name,
            buffers.vertices.len(),
            buffers.indices.len(),
            buffers.index_format
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init();
            log::error!("Failed to load configuration: {e}");
            return Err(e.into());
        }
    };
    logging::init_with_level(&config.log_level);

    if let Err(e) = run(&config) {
        log::error!("Pipeline failed: {e}");
        return Err(e.into());
    }
    log::info!("Pipeline completed successfully");
    Ok(())
}
