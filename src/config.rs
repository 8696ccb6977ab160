use crate::core::align::ScenePaths;
use crate::core::indices::IndexParams;
use crate::types::{BandRole, IndexError, IndexResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input filenames for the six band roles, relative to the input directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandFilenames {
    pub nir: String,
    pub red: String,
    pub swir: String,
    pub blue: String,
    pub vv: String,
    pub vh: String,
}

impl Default for BandFilenames {
    fn default() -> Self {
        Self {
            nir: "Sentinel2_B8.tif".to_string(),
            red: "Sentinel2_B4.tif".to_string(),
            swir: "Sentinel2_B11.tif".to_string(),
            blue: "Sentinel2_B2.tif".to_string(),
            vv: "VV.tif".to_string(),
            vh: "Vh.tif".to_string(),
        }
    }
}

impl BandFilenames {
    pub fn file_name(&self, role: BandRole) -> &str {
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

/// Static configuration for one pipeline run.
///
/// The only external surface is the two directories; everything else has
/// documented defaults and is overridable from a JSON config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the six input rasters
    pub input_dir: PathBuf,
    /// Directory the PNG products are written to
    pub output_dir: PathBuf,
    /// Per-role input filenames
    pub bands: BandFilenames,
    /// Band whose native grid every other band is resampled onto
    pub reference: BandRole,
    /// Formula coefficients and the denominator guard
    pub indices: IndexParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            bands: BandFilenames::default(),
            reference: BandRole::Nir,
            indices: IndexParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Config with the given directories and all defaults otherwise
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_dir: Q) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> IndexResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            IndexError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            IndexError::InvalidConfig(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// Absolute path of one band file
    pub fn band_path(&self, role: BandRole) -> PathBuf {
        self.input_dir.join(self.bands.file_name(role))
    }

    /// Full set of scene paths for the aligner
    pub fn scene_paths(&self) -> ScenePaths {
        ScenePaths {
            nir: self.band_path(BandRole::Nir),
            red: self.band_path(BandRole::Red),
            swir: self.band_path(BandRole::Swir),
            blue: self.band_path(BandRole::Blue),
            vv: self.band_path(BandRole::SarVv),
            vh: self.band_path(BandRole::SarVh),
        }
    }
}
