//! A single raster cell: basement elevation, sediment layers, and the
//! per-timestep wave/shadow-zone attributes the rest of this crate mutates.

use crate::constants::DBL_NODATA;

/// One stratigraphic layer: consolidated and unconsolidated sediment thickness.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layer {
    pub consolidated_thickness: f64,
    pub unconsolidated_thickness: f64,
}

impl Layer {
    pub fn total_thickness(&self) -> f64 {
        self.consolidated_thickness + self.unconsolidated_thickness
    }
}

/// Where a cell stands in shadow-zone processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadowZoneCode {
    #[default]
    NotIn,
    Boundary,
    InNotYetDone,
    InDone,
    Downdrift,
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub basement_elevation: f64,
    layers: Vec<Layer>,

    pub still_water_depth: f64,
    pub wave_height: f64,
    pub wave_orientation: f64,
    pub in_active_zone: bool,
    pub shadow_zone_code: ShadowZoneCode,

    pub is_coastline: bool,
    pub is_profile: bool,

    /// Per-timestep aggregates reset at S0; not otherwise touched by this crate,
    /// but carried so that a host simulation's erosion pass has somewhere to write.
    pub potential_erosion: f64,
    pub actual_erosion: f64,
    pub collapse_depth: f64,
    pub local_slope: f64,
    pub inv_dist_from_profile: f64,

    /// Opaque polygon bookkeeping inputs for the S7 D50 accumulation pass.
    /// `None` when the cell carries no sediment sample or is not assigned to a polygon.
    pub polygon_id: Option<usize>,
    pub unconsolidated_d50: Option<f64>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            basement_elevation: 0.0,
            layers: Vec::new(),
            still_water_depth: 0.0,
            wave_height: DBL_NODATA,
            wave_orientation: DBL_NODATA,
            in_active_zone: false,
            shadow_zone_code: ShadowZoneCode::NotIn,
            is_coastline: false,
            is_profile: false,
            potential_erosion: 0.0,
            actual_erosion: 0.0,
            collapse_depth: 0.0,
            local_slope: 0.0,
            inv_dist_from_profile: 0.0,
            polygon_id: None,
            unconsolidated_d50: None,
        }
    }
}

impl Cell {
    pub fn with_basement(elevation: f64) -> Self {
        Self {
            basement_elevation: elevation,
            ..Self::default()
        }
    }

    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Elevation of the top of sediment: basement plus every layer's thickness.
    pub fn top_of_sediment(&self) -> f64 {
        self.basement_elevation
            + self
                .layers
                .iter()
                .map(Layer::total_thickness)
                .sum::<f64>()
    }

    /// A cell is "sea" iff its sediment top sits below the still-water level.
    pub fn is_sea(&self, still_water_level: f64) -> bool {
        self.top_of_sediment() < still_water_level
    }

    /// True once the cell has been classified as part of the contiguous sea body
    /// this timestep (i.e. it has a defined, non-NODATA wave height).
    pub fn is_contiguous_sea(&self) -> bool {
        self.wave_height != DBL_NODATA
    }

    /// True if the cell has no layer carrying any sediment at all (basement exposed).
    pub fn has_no_top_layer(&self) -> bool {
        self.layers.iter().all(|l| l.total_thickness() <= 0.0)
    }
}
