use crate::config::PipelineConfig;
use crate::core::align::GridAligner;
use crate::core::indices::{IndexEngine, IndexProducts};
use crate::types::IndexResult;

/// End-to-end batch pipeline: read -> align -> index.
///
/// Strictly sequential and single-threaded; any stage error aborts the
/// whole run before any product exists, so there is never partial output.
pub struct IndexPipeline {
    config: PipelineConfig,
    aligner: GridAligner,
    engine: IndexEngine,
}

impl IndexPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let aligner = GridAligner::new(config.reference);
        let engine = IndexEngine::new(config.indices);
        Self {
            config,
            aligner,
            engine,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over the configured scene
    pub fn run(&self) -> IndexResult<IndexProducts> {
        log::info!(
            "Starting index pipeline over {}",
            self.config.input_dir.display()
        );

        let paths = self.config.scene_paths();
        let scene = self.aligner.align(&paths)?;
        let products = self.engine.compute_all(&scene)?;

        log::info!("Pipeline complete");
        Ok(products)
    }
}
