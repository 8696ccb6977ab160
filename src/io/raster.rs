use crate::types::{Band, BandRole, GeoTransform, IndexError, IndexResult, RasterGrid};
use gdal::raster::ResampleAlg;
use gdal::Dataset;
use ndarray::Array2;
use std::path::Path;

/// Single-band raster reader
///
/// Every call opens the file, reads band 1, and releases the handle before
/// returning. No caching, no retries; an unreadable input is fatal to the
/// run.
pub struct RasterSource;

impl RasterSource {
    /// Read the sole band of a raster file at its native shape.
    ///
    /// Returns the pixel grid together with the file's affine transform and
    /// the world-coordinate bounds derived from it.
    pub fn read_band<P: AsRef<Path>>(path: P, role: BandRole) -> IndexResult<Band> {
        let path = path.as_ref();
        log::info!("Reading {} band from: {}", role, path.display());

        let dataset = Self::open(path)?;
        let (width, height) = dataset.raster_size();
        log::debug!("{} native size: {}x{}", role, width, height);

        let geo_transform = GeoTransform::from_gdal(dataset.geo_transform()?);
        let data = Self::read_first_band(&dataset, path, (width, height))?;
        let bounds = geo_transform.bounds(height, width);

        Ok(Band {
            role,
            data,
            bounds,
            transform: geo_transform,
        })
    }

    /// Read the sole band of a raster file directly into `target_shape`
    /// using bilinear interpolation.
    ///
    /// The file's own resolution and transform are discarded; the caller is
    /// responsible for associating the result with the target grid's
    /// transform.
    pub fn read_band_resampled<P: AsRef<Path>>(
        path: P,
        target_shape: (usize, usize),
    ) -> IndexResult<RasterGrid> {
        let path = path.as_ref();
        let (target_rows, target_cols) = target_shape;
        log::info!(
            "Reading {} resampled to {}x{} (bilinear)",
            path.display(),
            target_rows,
            target_cols
        );

        let dataset = Self::open(path)?;
        let (width, height) = dataset.raster_size();
        if (height, width) != target_shape {
            log::debug!(
                "Resampling {}x{} -> {}x{}",
                height,
                width,
                target_rows,
                target_cols
            );
        }

        if dataset.raster_count() < 1 {
            return Err(IndexError::BandMissing {
                path: path.to_path_buf(),
            });
        }

        let rasterband = dataset.rasterband(1)?;
        let band_data = rasterband.read_as::<f32>(
            (0, 0),
            (width, height),
            (target_cols, target_rows),
            Some(ResampleAlg::Bilinear),
        )?;

        Array2::from_shape_vec((target_rows, target_cols), band_data.data)
            .map_err(|e| IndexError::Processing(format!("Failed to reshape raster data: {}", e)))
    }

    fn open(path: &Path) -> IndexResult<Dataset> {
        Dataset::open(path).map_err(|e| IndexError::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn read_first_band(
        dataset: &Dataset,
        path: &Path,
        size: (usize, usize),
    ) -> IndexResult<RasterGrid> {
        if dataset.raster_count() < 1 {
            return Err(IndexError::BandMissing {
                path: path.to_path_buf(),
            });
        }

        let (width, height) = size;
        let rasterband = dataset.rasterband(1)?;
        let band_data = rasterband.read_as::<f32>((0, 0), (width, height), (width, height), None)?;

        Array2::from_shape_vec((height, width), band_data.data)
            .map_err(|e| IndexError::Processing(format!("Failed to reshape raster data: {}", e)))
    }
}
