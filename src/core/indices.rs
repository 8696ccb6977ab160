use crate::core::align::AlignedScene;
use crate::types::{
    BandRole, IndexError, IndexKind, IndexRaster, IndexResult, RasterGrid, ReferenceGrid,
};
use serde::{Deserialize, Serialize};

/// Default denominator guard for the normalized-difference ratios.
///
/// Keeps a uniformly zero denominator from producing NaN/inf; it is not a
/// general stability guarantee for near-zero cancellation. Its effective
/// strength depends on the input scaling convention (reflectance 0-1 vs.
/// raw DN), which is why it is a parameter rather than a constant baked
/// into each formula.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Linear soil-moisture model over SAR backscatter: a + b*VV + c*VH
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarMoistureCoefficients {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Default for SarMoistureCoefficients {
    fn default() -> Self {
        Self {
            a: 0.1,
            b: 0.2,
            c: 0.3,
        }
    }
}

/// Linear SOC proxy over vegetation indices: alpha + beta*NDVI + gamma*EVI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocCoefficients {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for SocCoefficients {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.3,
            gamma: 0.2,
        }
    }
}

/// Linear SOC proxy over SAR backscatter: a + b*VH + c*VV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarSocCoefficients {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Default for SarSocCoefficients {
    fn default() -> Self {
        Self {
            a: 0.2,
            b: 0.3,
            c: 0.4,
        }
    }
}

/// Full coefficient set for the six index formulas.
///
/// All values are fixed constants, not fitted; substituting calibrated
/// coefficients needs no code change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexParams {
    pub epsilon: f32,
    pub sar_moisture: SarMoistureCoefficients,
    pub soc: SocCoefficients,
    pub sar_soc: SarSocCoefficients,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            sar_moisture: SarMoistureCoefficients::default(),
            soc: SocCoefficients::default(),
            sar_soc: SarSocCoefficients::default(),
        }
    }
}

/// The six derived products of one pipeline run
#[derive(Debug, Clone)]
pub struct IndexProducts {
    pub grid: ReferenceGrid,
    pub ndmi: IndexRaster,
    pub ndvi: IndexRaster,
    pub evi: IndexRaster,
    pub soil_moisture_sar: IndexRaster,
    pub soc: IndexRaster,
    pub soc_sar: IndexRaster,
}

impl IndexProducts {
    /// Products in computation order
    pub fn iter(&self) -> impl Iterator<Item = &IndexRaster> {
        [
            &self.ndmi,
            &self.ndvi,
            &self.evi,
            &self.soil_moisture_sar,
            &self.soc,
            &self.soc_sar,
        ]
        .into_iter()
    }

    pub fn get(&self, kind: IndexKind) -> &IndexRaster {
        match kind {
            IndexKind::Ndmi => &self.ndmi,
            IndexKind::Ndvi => &self.ndvi,
            IndexKind::Evi => &self.evi,
            IndexKind::SoilMoistureSar => &self.soil_moisture_sar,
            IndexKind::Soc => &self.soc,
            IndexKind::SocSar => &self.soc_sar,
        }
    }
}

/// Pure elementwise index formulas over aligned same-shape grids.
///
/// The engine trusts its inputs: no validation of physical reflectance
/// ranges, no NaN handling beyond the epsilon guard. Mismatched input
/// shapes indicate an alignment defect and surface as a hard error.
#[derive(Debug, Clone)]
pub struct IndexEngine {
    params: IndexParams,
}

impl IndexEngine {
    pub fn new(params: IndexParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndexParams {
        &self.params
    }

    /// NDMI = (NIR - SWIR) / (NIR + SWIR + eps)
    pub fn ndmi(&self, nir: &RasterGrid, swir: &RasterGrid) -> IndexResult<RasterGrid> {
        check_shape(nir.dim(), swir.dim())?;
        let numerator = nir - swir;
        let denominator = nir + swir + self.params.epsilon;
        Ok(numerator / denominator)
    }

    /// NDVI = (NIR - RED) / (NIR + RED + eps)
    pub fn ndvi(&self, nir: &RasterGrid, red: &RasterGrid) -> IndexResult<RasterGrid> {
        check_shape(nir.dim(), red.dim())?;
        let numerator = nir - red;
        let denominator = nir + red + self.params.epsilon;
        Ok(numerator / denominator)
    }

    /// EVI = 2.5 * (NIR - RED) / (NIR + 6*RED - 7.5*BLUE + 1 + eps)
    pub fn evi(
        &self,
        nir: &RasterGrid,
        red: &RasterGrid,
        blue: &RasterGrid,
    ) -> IndexResult<RasterGrid> {
        check_shape(nir.dim(), red.dim())?;
        check_shape(nir.dim(), blue.dim())?;
        let numerator = (nir - red) * 2.5;
        let denominator = nir + &(red * 6.0) - &(blue * 7.5) + 1.0 + self.params.epsilon;
        Ok(numerator / denominator)
    }

    /// Soil moisture from SAR backscatter: a + b*VV + c*VH
    pub fn soil_moisture_sar(&self, vv: &RasterGrid, vh: &RasterGrid) -> IndexResult<RasterGrid> {
        check_shape(vv.dim(), vh.dim())?;
        let c = self.params.sar_moisture;
        Ok(vv * c.b + &(vh * c.c) + c.a)
    }

    /// Soil organic carbon from vegetation indices: alpha + beta*NDVI + gamma*EVI.
    ///
    /// Consumes the NDVI and EVI products, so it must run after them.
    pub fn soc(&self, ndvi: &RasterGrid, evi: &RasterGrid) -> IndexResult<RasterGrid> {
        check_shape(ndvi.dim(), evi.dim())?;
        let c = self.params.soc;
        Ok(ndvi * c.beta + &(evi * c.gamma) + c.alpha)
    }

    /// Soil organic carbon from SAR backscatter: a + b*VH + c*VV
    pub fn soc_sar(&self, vh: &RasterGrid, vv: &RasterGrid) -> IndexResult<RasterGrid> {
        check_shape(vh.dim(), vv.dim())?;
        let c = self.params.sar_soc;
        Ok(vh * c.b + &(vv * c.c) + c.a)
    }

    /// Evaluate all six formulas in dependency order.
    ///
    /// Every band is checked against the reference grid shape first, so a
    /// misaligned scene fails before any formula runs.
    pub fn compute_all(&self, scene: &AlignedScene) -> IndexResult<IndexProducts> {
        let shape = scene.grid.shape;
        for role in BandRole::ALL {
            check_shape(shape, scene.band(role).dim())?;
        }
        log::info!(
            "Computing {} index products on {}x{} grid",
            IndexKind::ALL.len(),
            shape.0,
            shape.1
        );

        let ndmi = self.ndmi(&scene.nir, &scene.swir)?;
        let ndvi = self.ndvi(&scene.nir, &scene.red)?;
        let evi = self.evi(&scene.nir, &scene.red, &scene.blue)?;
        let soil_moisture_sar = self.soil_moisture_sar(&scene.vv, &scene.vh)?;
        let soc = self.soc(&ndvi, &evi)?;
        let soc_sar = self.soc_sar(&scene.vh, &scene.vv)?;

        log::info!("Index computation complete");
        Ok(IndexProducts {
            grid: scene.grid.clone(),
            ndmi: IndexRaster {
                kind: IndexKind::Ndmi,
                data: ndmi,
            },
            ndvi: IndexRaster {
                kind: IndexKind::Ndvi,
                data: ndvi,
            },
            evi: IndexRaster {
                kind: IndexKind::Evi,
                data: evi,
            },
            soil_moisture_sar: IndexRaster {
                kind: IndexKind::SoilMoistureSar,
                data: soil_moisture_sar,
            },
            soc: IndexRaster {
                kind: IndexKind::Soc,
                data: soc,
            },
            soc_sar: IndexRaster {
                kind: IndexKind::SocSar,
                data: soc_sar,
            },
        })
    }
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::new(IndexParams::default())
    }
}

fn check_shape(expected: (usize, usize), actual: (usize, usize)) -> IndexResult<()> {
    if expected != actual {
        return Err(IndexError::ShapeMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_ndmi_known_values() {
        // NIR all 0.5, SWIR all 0.3 -> (0.5-0.3)/(0.8+1e-6)
        let nir = Array2::from_elem((2, 2), 0.5f32);
        let swir = Array2::from_elem((2, 2), 0.3f32);

        let engine = IndexEngine::default();
        let ndmi = engine.ndmi(&nir, &swir).unwrap();

        assert_eq!(ndmi.dim(), (2, 2));
        assert_relative_eq!(ndmi[[0, 0]], 0.24999969, max_relative = 1e-6);
    }

    #[test]
    fn test_ndmi_zero_division_guard() {
        // Uniformly zero inputs evaluate to 0/eps = 0, not NaN/inf
        let zeros = Array2::<f32>::zeros((3, 3));

        let engine = IndexEngine::default();
        let ndmi = engine.ndmi(&zeros, &zeros).unwrap();

        for &v in ndmi.iter() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_ndvi_antisymmetric() {
        let nir = Array2::from_elem((2, 3), 0.8f32);
        let red = Array2::from_elem((2, 3), 0.2f32);

        let engine = IndexEngine::default();
        let forward = engine.ndvi(&nir, &red).unwrap();
        let reverse = engine.ndvi(&red, &nir).unwrap();

        for (f, r) in forward.iter().zip(reverse.iter()) {
            assert_relative_eq!(*f, -*r, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_ndvi_bounded_for_reflectances() {
        let nir = Array2::from_shape_vec((2, 2), vec![0.9f32, 0.5, 0.1, 0.7]).unwrap();
        let red = Array2::from_shape_vec((2, 2), vec![0.1f32, 0.5, 0.9, 0.0]).unwrap();

        let engine = IndexEngine::default();
        let ndvi = engine.ndvi(&nir, &red).unwrap();

        for &v in ndvi.iter() {
            assert!(v > -1.0 - 1e-3 && v < 1.0 + 1e-3, "ndvi out of range: {}", v);
        }
    }

    #[test]
    fn test_evi_known_value() {
        // NIR=0.5, RED=0.2, BLUE=0.1: 2.5*0.3 / (0.5+1.2-0.75+1)
        let nir = Array2::from_elem((2, 2), 0.5f32);
        let red = Array2::from_elem((2, 2), 0.2f32);
        let blue = Array2::from_elem((2, 2), 0.1f32);

        let engine = IndexEngine::default();
        let evi = engine.evi(&nir, &red, &blue).unwrap();

        assert_relative_eq!(evi[[1, 1]], 0.75 / 1.950001, max_relative = 1e-5);
    }

    #[test]
    fn test_soil_moisture_sar_defaults() {
        // VV=VH=1.0 -> 0.1 + 0.2 + 0.3 = 0.6 everywhere
        let vv = Array2::from_elem((2, 2), 1.0f32);
        let vh = Array2::from_elem((2, 2), 1.0f32);

        let engine = IndexEngine::default();
        let moisture = engine.soil_moisture_sar(&vv, &vh).unwrap();

        for &v in moisture.iter() {
            assert_relative_eq!(v, 0.6, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_soc_defaults() {
        // NDVI=EVI=0.5 -> 0.5 + 0.3*0.5 + 0.2*0.5 = 0.75
        let ndvi = Array2::from_elem((2, 2), 0.5f32);
        let evi = Array2::from_elem((2, 2), 0.5f32);

        let engine = IndexEngine::default();
        let soc = engine.soc(&ndvi, &evi).unwrap();

        assert_relative_eq!(soc[[0, 0]], 0.75, max_relative = 1e-6);
    }

    #[test]
    fn test_soc_sar_defaults() {
        // VH=0.5, VV=0.25 -> 0.2 + 0.3*0.5 + 0.4*0.25 = 0.45
        let vh = Array2::from_elem((2, 2), 0.5f32);
        let vv = Array2::from_elem((2, 2), 0.25f32);

        let engine = IndexEngine::default();
        let soc_sar = engine.soc_sar(&vh, &vv).unwrap();

        assert_relative_eq!(soc_sar[[0, 0]], 0.45, max_relative = 1e-6);
    }

    #[test]
    fn test_custom_coefficients() {
        let params = IndexParams {
            sar_moisture: SarMoistureCoefficients {
                a: 1.0,
                b: 0.0,
                c: 0.0,
            },
            ..IndexParams::default()
        };
        let vv = Array2::from_elem((2, 2), 5.0f32);
        let vh = Array2::from_elem((2, 2), 7.0f32);

        let engine = IndexEngine::new(params);
        let moisture = engine.soil_moisture_sar(&vv, &vh).unwrap();

        assert_relative_eq!(moisture[[0, 0]], 1.0, max_relative = 1e-6);
    }

    #[test]
    fn test_shape_mismatch_is_hard_error() {
        let nir = Array2::<f32>::zeros((2, 2));
        let swir = Array2::<f32>::zeros((3, 2));

        let engine = IndexEngine::default();
        let result = engine.ndmi(&nir, &swir);

        assert!(matches!(
            result,
            Err(IndexError::ShapeMismatch {
                expected: (2, 2),
                actual: (3, 2),
            })
        ));
    }

    #[test]
    fn test_evi_shape_mismatch_on_blue() {
        let nir = Array2::<f32>::zeros((2, 2));
        let red = Array2::<f32>::zeros((2, 2));
        let blue = Array2::<f32>::zeros((2, 3));

        let engine = IndexEngine::default();
        assert!(matches!(
            engine.evi(&nir, &red, &blue),
            Err(IndexError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_output_shape_matches_input() {
        let nir = Array2::<f32>::zeros((7, 5));
        let red = Array2::<f32>::zeros((7, 5));

        let engine = IndexEngine::default();
        let ndvi = engine.ndvi(&nir, &red).unwrap();

        assert_eq!(ndvi.dim(), (7, 5));
    }

    #[test]
    fn test_every_formula_rejects_mismatched_shapes() {
        let a = Array2::<f32>::zeros((2, 2));
        let b = Array2::<f32>::zeros((2, 3));

        let engine = IndexEngine::default();
        let results = [
            engine.ndmi(&a, &b),
            engine.ndvi(&a, &b),
            engine.evi(&a, &a, &b),
            engine.soil_moisture_sar(&a, &b),
            engine.soc(&a, &b),
            engine.soc_sar(&a, &b),
        ];

        for result in results {
            assert!(matches!(result, Err(IndexError::ShapeMismatch { .. })));
        }
    }

    #[test]
    fn test_compute_all_on_synthetic_scene() {
        use crate::types::GeoTransform;

        let shape = (3, 4);
        let scene = AlignedScene {
            grid: ReferenceGrid {
                shape,
                transform: GeoTransform::from_gdal([0.0, 10.0, 0.0, 0.0, 0.0, -10.0]),
            },
            nir: Array2::from_elem(shape, 0.5),
            red: Array2::from_elem(shape, 0.2),
            swir: Array2::from_elem(shape, 0.3),
            blue: Array2::from_elem(shape, 0.1),
            vv: Array2::from_elem(shape, 1.0),
            vh: Array2::from_elem(shape, 1.0),
        };

        let products = IndexEngine::default().compute_all(&scene).unwrap();

        for raster in products.iter() {
            assert_eq!(raster.data.dim(), shape, "{} off-grid", raster.kind);
        }
        assert_relative_eq!(
            products.soil_moisture_sar.data[[2, 3]],
            0.6,
            max_relative = 1e-6
        );
        // SOC consumes the computed NDVI/EVI products
        let expected_soc =
            0.5 + 0.3 * products.ndvi.data[[0, 0]] + 0.2 * products.evi.data[[0, 0]];
        assert_relative_eq!(products.soc.data[[0, 0]], expected_soc, max_relative = 1e-6);
    }

    #[test]
    fn test_compute_all_rejects_off_grid_band() {
        use crate::types::GeoTransform;

        let scene = AlignedScene {
            grid: ReferenceGrid {
                shape: (2, 2),
                transform: GeoTransform::from_gdal([0.0, 10.0, 0.0, 0.0, 0.0, -10.0]),
            },
            nir: Array2::zeros((2, 2)),
            red: Array2::zeros((2, 2)),
            swir: Array2::zeros((2, 2)),
            blue: Array2::zeros((2, 2)),
            vv: Array2::zeros((2, 2)),
            vh: Array2::zeros((3, 3)),
        };

        let result = IndexEngine::default().compute_all(&scene);
        assert!(matches!(result, Err(IndexError::ShapeMismatch { .. })));
    }
}
