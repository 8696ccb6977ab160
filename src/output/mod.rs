//! Visualization output: color-mapped PNG rendering and sample reporting

pub mod colormap;
pub mod sink;

pub use colormap::{ColorRamp, Rgb};
pub use sink::OutputSink;
