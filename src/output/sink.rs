use crate::core::indices::IndexProducts;
use crate::output::colormap::ColorRamp;
use crate::types::{IndexRaster, IndexResult, RasterGrid};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Renders index rasters as color-mapped PNG files and reports scalar
/// samples. Consumes the pipeline's products read-only.
pub struct OutputSink {
    output_dir: PathBuf,
}

impl OutputSink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Render and save every product under the output directory.
    ///
    /// The directory is created first; any write failure aborts with no
    /// further products attempted.
    pub fn save_all(&self, products: &IndexProducts) -> IndexResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::new();
        for raster in products.iter() {
            written.push(self.save_png(raster)?);
        }

        log::info!(
            "Saved {} products to {}",
            written.len(),
            self.output_dir.display()
        );
        Ok(written)
    }

    /// Render one product to `<output_dir>/<fixed name>.png`
    pub fn save_png(&self, raster: &IndexRaster) -> IndexResult<PathBuf> {
        let (rows, cols) = raster.data.dim();
        let ramp = ColorRamp::for_index(raster.kind);
        let rgb = render_rgb(&raster.data, ramp);

        let img = RgbImage::from_raw(cols as u32, rows as u32, rgb).ok_or_else(|| {
            crate::types::IndexError::Processing(format!(
                "RGB buffer does not match {}x{} image",
                rows, cols
            ))
        })?;

        let path = self.output_dir.join(raster.kind.file_name());
        img.save(&path)?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Print the value at pixel [0,0] of each product to stdout
    pub fn print_samples(&self, products: &IndexProducts) {
        for raster in products.iter() {
            if let Some(value) = raster.data.get((0, 0)) {
                println!("{} Sample: {}", raster.kind, value);
            }
        }
    }
}

/// Scan the finite value range of a grid for normalization.
///
/// All-non-finite grids fall back to 0..1; constant grids widen to a unit
/// range so every pixel lands on the ramp's low endpoint.
fn finite_range(data: &RasterGrid) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;

    for &v in data.iter() {
        if v.is_finite() {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if (max - min).abs() < f32::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Normalize a grid over its finite range and render it through a ramp.
///
/// Returns a `rows * cols * 3` RGB buffer in row-major order. Non-finite
/// pixels render black.
fn render_rgb(data: &RasterGrid, ramp: ColorRamp) -> Vec<u8> {
    let (min, max) = finite_range(data);
    let inv_range = 1.0 / (max - min);

    let mut rgb = Vec::with_capacity(data.len() * 3);
    for &v in data.iter() {
        if v.is_finite() {
            let t = (v - min) * inv_range;
            let color = ramp.evaluate(t);
            rgb.extend_from_slice(&[color.r, color.g, color.b]);
        } else {
            rgb.extend_from_slice(&[0, 0, 0]);
        }
    }
    rgb
}
