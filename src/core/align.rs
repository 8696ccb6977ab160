use crate::io::RasterSource;
use crate::types::{BandRole, IndexError, IndexResult, RasterGrid, ReferenceGrid};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File locations for one six-band scene
#[derive(Debug, Clone)]
pub struct ScenePaths {
    pub nir: PathBuf,
    pub red: PathBuf,
    pub swir: PathBuf,
    pub blue: PathBuf,
    pub vv: PathBuf,
    pub vh: PathBuf,
}

impl ScenePaths {
    pub fn path(&self, role: BandRole) -> &Path {
        match role {
            BandRole::Nir => &self.nir,
            BandRole::Red => &self.red,
            BandRole::Swir => &self.swir,
            BandRole::Blue => &self.blue,
            BandRole::SarVv => &self.vv,
            BandRole::SarVh => &self.vh,
        }
    }
}

/// All six bands coerced onto one reference grid.
///
/// Owning every array makes partial alignment unrepresentable: the index
/// engine can only ever see a fully aligned scene.
#[derive(Debug, Clone)]
pub struct AlignedScene {
    pub grid: ReferenceGrid,
    pub nir: RasterGrid,
    pub red: RasterGrid,
    pub swir: RasterGrid,
    pub blue: RasterGrid,
    pub vv: RasterGrid,
    pub vh: RasterGrid,
}

impl AlignedScene {
    pub fn band(&self, role: BandRole) -> &RasterGrid {
        match role {
            BandRole::Nir => &self.nir,
            BandRole::Red => &self.red,
            BandRole::Swir => &self.swir,
            BandRole::Blue => &self.blue,
            BandRole::SarVv => &self.vv,
            BandRole::SarVh => &self.vh,
        }
    }

    fn from_bands(
        grid: ReferenceGrid,
        mut bands: HashMap<BandRole, RasterGrid>,
    ) -> IndexResult<Self> {
        let mut take = |role: BandRole| {
            bands
                .remove(&role)
                .ok_or_else(|| IndexError::Processing(format!("aligned {} band missing", role)))
        };

        Ok(Self {
            grid,
            nir: take(BandRole::Nir)?,
            red: take(BandRole::Red)?,
            swir: take(BandRole::Swir)?,
            blue: take(BandRole::Blue)?,
            vv: take(BandRole::SarVv)?,
            vh: take(BandRole::SarVh)?,
        })
    }
}

/// Aligns a scene's bands onto the grid of one designated reference band.
///
/// The reference role is an explicit parameter rather than a read-order
/// convention, so reordering the inputs can never silently change which
/// band defines the grid.
#[derive(Debug, Clone)]
pub struct GridAligner {
    reference: BandRole,
}

impl GridAligner {
    /// Create an aligner using `reference` as the grid-defining band
    pub fn new(reference: BandRole) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> BandRole {
        self.reference
    }

    /// Read the reference band unresampled, then coerce every other band
    /// onto its grid via bilinear resampling.
    ///
    /// Bilinear is chosen over nearest-neighbor to avoid blocky artifacts
    /// in the derived continuous indices, at the cost of slightly smoothing
    /// sharp edges such as SAR speckle. Resampled bands carry only the
    /// reference transform forward; their native bounding boxes are not
    /// recomputed.
    pub fn align(&self, paths: &ScenePaths) -> IndexResult<AlignedScene> {
        let reference_band = RasterSource::read_band(paths.path(self.reference), self.reference)?;
        let shape = reference_band.data.dim();
        let grid = ReferenceGrid {
            shape,
            transform: reference_band.transform.clone(),
        };
        log::info!(
            "Reference grid from {}: {}x{} pixels",
            self.reference,
            shape.0,
            shape.1
        );

        let mut bands: HashMap<BandRole, RasterGrid> = HashMap::new();
        bands.insert(self.reference, reference_band.data);

        for role in BandRole::ALL {
            if role == self.reference {
                continue;
            }
            let data = RasterSource::read_band_resampled(paths.path(role), shape)?;
            bands.insert(role, data);
        }

        log::info!("Aligned {} bands onto the reference grid", bands.len());
        AlignedScene::from_bands(grid, bands)
    }
}

impl Default for GridAligner {
    fn default() -> Self {
        Self::new(BandRole::Nir)
    }
}
