use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Real-valued reflectance or backscatter data
pub type PixelValue = f32;

/// 2D raster grid (rows x cols)
pub type RasterGrid = Array2<PixelValue>;

/// Fixed input roles for the six-band scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandRole {
    /// Near-infrared (Sentinel-2 B8)
    Nir,
    /// Red (Sentinel-2 B4)
    Red,
    /// Short-wave infrared (Sentinel-2 B11)
    Swir,
    /// Blue (Sentinel-2 B2)
    Blue,
    /// SAR backscatter, VV polarization
    SarVv,
    /// SAR backscatter, VH polarization
    SarVh,
}

impl BandRole {
    /// All roles in the order the pipeline reads them
    pub const ALL: [BandRole; 6] = [
        BandRole::Nir,
        BandRole::Red,
        BandRole::Swir,
        BandRole::Blue,
        BandRole::SarVv,
        BandRole::SarVh,
    ];
}

impl std::fmt::Display for BandRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandRole::Nir => write!(f, "NIR"),
            BandRole::Red => write!(f, "RED"),
            BandRole::Swir => write!(f, "SWIR"),
            BandRole::Blue => write!(f, "BLUE"),
            BandRole::SarVv => write!(f, "VV"),
            BandRole::SarVh => write!(f, "VH"),
        }
    }
}

/// Geospatial transformation parameters (GDAL affine order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub top_left_x: f64,
    pub pixel_width: f64,
    pub rotation_x: f64,
    pub top_left_y: f64,
    pub rotation_y: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    /// Build from GDAL's six-element affine array
    pub fn from_gdal(gt: [f64; 6]) -> Self {
        Self {
            top_left_x: gt[0],
            pixel_width: gt[1],
            rotation_x: gt[2],
            top_left_y: gt[3],
            rotation_y: gt[4],
            pixel_height: gt[5],
        }
    }

    /// Convert back to GDAL's six-element affine array
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.top_left_x,
            self.pixel_width,
            self.rotation_x,
            self.top_left_y,
            self.rotation_y,
            self.pixel_height,
        ]
    }

    /// World-coordinate extent of a raster with this transform.
    ///
    /// Assumes a north-up transform (zero rotation terms), which is all
    /// this pipeline ever produces or consumes.
    pub fn bounds(&self, rows: usize, cols: usize) -> BoundingBox {
        let x0 = self.top_left_x;
        let x1 = self.top_left_x + self.pixel_width * cols as f64;
        let y0 = self.top_left_y;
        let y1 = self.top_left_y + self.pixel_height * rows as f64;
        BoundingBox {
            min_x: x0.min(x1),
            max_x: x0.max(x1),
            min_y: y0.min(y1),
            max_y: y0.max(y1),
        }
    }
}

/// Geospatial bounding box in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// One single-band raster as read from disk.
///
/// Immutable after creation; resampling produces a new grid rather than
/// mutating this one.
#[derive(Debug, Clone)]
pub struct Band {
    pub role: BandRole,
    pub data: RasterGrid,
    pub bounds: BoundingBox,
    pub transform: GeoTransform,
}

/// The (shape, transform) pair every band is aligned to before any index
/// formula runs. Taken from exactly one explicitly designated band.
#[derive(Debug, Clone)]
pub struct ReferenceGrid {
    /// (rows, cols)
    pub shape: (usize, usize),
    pub transform: GeoTransform,
}

/// The six derived products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    Ndmi,
    Ndvi,
    Evi,
    SoilMoistureSar,
    Soc,
    SocSar,
}

impl IndexKind {
    /// All products in computation order
    pub const ALL: [IndexKind; 6] = [
        IndexKind::Ndmi,
        IndexKind::Ndvi,
        IndexKind::Evi,
        IndexKind::SoilMoistureSar,
        IndexKind::Soc,
        IndexKind::SocSar,
    ];

    /// Fixed output filename for this product
    pub fn file_name(&self) -> &'static str {
        match self {
            IndexKind::Ndmi => "NDMI.png",
            IndexKind::Ndvi => "NDVI.png",
            IndexKind::Evi => "EVI.png",
            IndexKind::SoilMoistureSar => "Soil_Moisture_SAR.png",
            IndexKind::Soc => "SOC.png",
            IndexKind::SocSar => "SOC_SAR.png",
        }
    }

    /// Long-form product title
    pub fn title(&self) -> &'static str {
        match self {
            IndexKind::Ndmi => "NDMI (Normalized Difference Moisture Index)",
            IndexKind::Ndvi => "NDVI (Normalized Difference Vegetation Index)",
            IndexKind::Evi => "EVI (Enhanced Vegetation Index)",
            IndexKind::SoilMoistureSar => "Soil Moisture (SAR)",
            IndexKind::Soc => "Soil Organic Carbon (SOC)",
            IndexKind::SocSar => "Soil Organic Carbon (SAR)",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Ndmi => write!(f, "NDMI"),
            IndexKind::Ndvi => write!(f, "NDVI"),
            IndexKind::Evi => write!(f, "EVI"),
            IndexKind::SoilMoistureSar => write!(f, "Soil Moisture (SAR)"),
            IndexKind::Soc => write!(f, "SOC"),
            IndexKind::SocSar => write!(f, "SOC (SAR)"),
        }
    }
}

/// One derived index raster, same shape as the reference grid
#[derive(Debug, Clone)]
pub struct IndexRaster {
    pub kind: IndexKind,
    pub data: RasterGrid,
}

/// Error types for index processing
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("raster source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: gdal::errors::GdalError,
    },

    #[error("no readable band in raster: {path}")]
    BandMissing { path: PathBuf },

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("output write failure: {0}")]
    OutputWrite(#[from] std::io::Error),

    #[error("image encoding failure: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("processing error: {0}")]
    Processing(String),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
