//! Simulation-wide tunable constants for the wave-field pipeline.
//!
//! Mirrors the compiled-in constants of the source model. Grouped by the stage
//! that consumes them, with a `Default` impl carrying the source's tuned values.

pub const DBL_NODATA: f64 = -9999.0;
pub const INT_NODATA: i32 = -9999;

/// Tunable constants for shadow-zone detection, feasibility, and sweep attenuation.
#[derive(Clone, Debug, PartialEq)]
pub struct Constants {
    // =========================================================================
    // Cape selection (S6 stage 1)
    // =========================================================================
    /// Coast points within this many indices of either end of the coastline are
    /// excluded from cape selection.
    pub grid_margin: usize,

    /// Minimum along-coast index spacing enforced between successive accepted capes.
    pub cape_point_min_spacing: usize,

    /// Maximum number of cape candidates considered before stopping.
    pub max_capes: usize,

    /// Hard cap on the number of shadow-zone candidates retained after stage 1.
    pub max_num_shadow_zones: usize,

    /// If true, use the deep-water wave orientation (rather than the local
    /// breaking orientation) to orient every shadow-zone boundary line.
    pub use_deep_water_for_shadow_line: bool,

    // =========================================================================
    // Boundary line tracing (S6 stage 2)
    // =========================================================================
    /// Minimum number of cells that must be walked past first-hit-sea before a
    /// coast re-encounter is accepted as the candidate's terminal.
    pub shadow_line_min_since_hit_sea: usize,

    /// Minimum in-sea length (metres) of an accepted boundary line.
    pub min_sea_length_of_shadow_zone_line: f64,

    /// Maximum overland length (metres) walked before hitting sea.
    pub max_land_length_of_shadow_zone_line: f64,

    /// If true, a boundary line that exits the grid (rather than re-hitting the
    /// coast) can still be accepted, with a synthetic virtual terminal index.
    pub create_shadow_zone_if_hits_grid_edge: bool,

    /// Boundary lines shorter than this are tolerated: if their flood-fill seed
    /// search fails, the zone is silently dropped instead of erroring.
    pub max_len_shadow_line_to_ignore: f64,

    // =========================================================================
    // Flood fill (S6 stage 4 step 2)
    // =========================================================================
    /// Perpendicular offset (in cells) from the boundary line used when
    /// searching for a flood-fill seed.
    pub flood_fill_start_offset: f64,

    // =========================================================================
    // Wave breaking and energy
    // =========================================================================
    /// Ratio of wave height to water depth at which waves are declared breaking.
    pub waveheight_over_waterdepth_at_breaking: f64,

    /// Walkden-Hall wave-energy exponent applied to breaking wave height.
    pub walkden_hall_param_1: f64,

    /// Walkden-Hall wave-energy exponent applied to wave period.
    pub walkden_hall_param_2: f64,

    /// Ratio of water depth to deep-water wave height beyond which a profile
    /// point is considered unaffected by the bed (left at deep-water defaults).
    pub wave_depth_ratio_for_wave_calcs: f64,

    /// General floating-point comparison tolerance.
    pub tolerance: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            grid_margin: 5,
            cape_point_min_spacing: 10,
            max_capes: 10,
            max_num_shadow_zones: 10,
            use_deep_water_for_shadow_line: true,

            shadow_line_min_since_hit_sea: 2,
            min_sea_length_of_shadow_zone_line: 10.0,
            max_land_length_of_shadow_zone_line: 50.0,
            create_shadow_zone_if_hits_grid_edge: true,
            max_len_shadow_line_to_ignore: 20.0,

            flood_fill_start_offset: 3.0,

            waveheight_over_waterdepth_at_breaking: 0.78,
            walkden_hall_param_1: 2.5,
            walkden_hall_param_2: 1.0,
            wave_depth_ratio_for_wave_calcs: 3.0,
            tolerance: 1e-6,
        }
    }
}

/// Per-run physical parameters supplied by the caller (not tuned constants).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    /// Still-water level, in the same vertical datum as cell elevations (m).
    pub still_water_level: f64,
    /// Deep-water (offshore) significant wave height H0 (m).
    pub deep_water_wave_height: f64,
    /// Deep-water wave orientation θ0, azimuth degrees clockwise from north.
    pub deep_water_wave_orientation: f64,
    /// Wave period T (s).
    pub wave_period: f64,
    /// Timestep duration, in hours.
    pub timestep_hours: f64,
    /// Gravitational acceleration (m/s^2).
    pub gravity: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            still_water_level: 0.0,
            deep_water_wave_height: 1.0,
            deep_water_wave_orientation: 90.0,
            wave_period: 6.0,
            timestep_hours: 1.0,
            gravity: 9.81,
        }
    }
}

impl Environment {
    /// Deep-water wave celerity `C0 = gT / 2pi` (m/s), following Airy theory.
    pub fn deep_water_celerity(&self) -> f64 {
        (self.gravity * self.wave_period) / (2.0 * std::f64::consts::PI)
    }

    /// Deep-water wavelength `L0 = C0 * T` (m).
    pub fn deep_water_wavelength(&self) -> f64 {
        self.deep_water_celerity() * self.wave_period
    }

    /// Timestep duration in seconds.
    pub fn timestep_seconds(&self) -> f64 {
        self.timestep_hours * 3600.0
    }
}
