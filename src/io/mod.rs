//! I/O modules for reading single-band rasters

pub mod raster;

pub use raster::RasterSource;
