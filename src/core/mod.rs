//! Core raster alignment and index computation modules

pub mod align;
pub mod indices;
pub mod pipeline;

// Re-export main types
pub use align::{AlignedScene, GridAligner, ScenePaths};
pub use indices::{
    IndexEngine, IndexParams, IndexProducts, SarMoistureCoefficients, SarSocCoefficients,
    SocCoefficients, DEFAULT_EPSILON,
};
pub use pipeline::IndexPipeline;
