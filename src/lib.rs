//! soilsense: A Fast, Modular Vegetation, Moisture and Soil-Carbon Index Processor
//!
//! This library derives vegetation, moisture, and soil-organic-carbon raster
//! products from multi-band optical (Sentinel-2) and radar (SAR VV/VH)
//! imagery: six single-band rasters are read, aligned onto one reference
//! grid, run through six elementwise index formulas, and rendered as
//! color-mapped PNG products.

pub mod config;
pub mod core;
pub mod io;
pub mod output;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{
    Band, BandRole, BoundingBox, GeoTransform, IndexError, IndexKind, IndexRaster, IndexResult,
    RasterGrid, ReferenceGrid,
};

pub use config::{BandFilenames, PipelineConfig};
pub use core::{
    AlignedScene, GridAligner, IndexEngine, IndexParams, IndexPipeline, IndexProducts, ScenePaths,
};
pub use io::RasterSource;
pub use output::OutputSink;
