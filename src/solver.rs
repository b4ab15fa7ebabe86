//! The 1-D cross-shore wave solver boundary and its reference implementation.
//!
//! The solver's internals are explicitly out of scope:
//! callers depend only on the `WaveSolver1D` trait. `LinearWaveSolver` is the one
//! bundled implementation, following the source's linear (Airy) shoaling/refraction
//! branch.

use crate::coast::Handedness;

/// Everything a 1-D wave solver needs to propagate waves along one profile.
pub struct ProfileWaveInput<'a> {
    /// Along-profile horizontal distance from the seaward terminus (metres),
    /// indexed the same as `elevations` and `cells`: index 0 is the coast point,
    /// the last index is the seaward terminus.
    pub distances: &'a [f64],
    /// Sediment-top elevation under each profile point, same indexing.
    pub elevations: &'a [f64],
    pub wave_period: f64,
    pub deep_water_wave_height: f64,
    /// Wave-to-coast-normal angle (degrees), already corrected for high-angle
    /// waves per the Ashton-Murray rule.
    pub wave_to_normal_angle_deg: f64,
    pub surge_level: f64,
    pub friction_factor: f64,
    pub still_water_level: f64,
    pub gravity: f64,
    /// Wave-height/depth ratio at which breaking is declared.
    pub breaking_gamma: f64,
    /// Depth, relative to deep-water wave height, beyond which a point is left
    /// untouched at the deep-water defaults.
    pub depth_ratio_for_wave_calcs: f64,
    pub sea_handedness: Handedness,
    /// Local coast flux orientation (tangent azimuth) at this profile's coast point.
    pub flux_orientation_deg: f64,
    pub deep_water_wave_orientation_deg: f64,
}

/// Per-profile-point results, index 0 = coast point .. last = seaward terminus.
pub struct ProfileWaveOutput {
    pub wave_height: Vec<f64>,
    pub wave_orientation: Vec<f64>,
    pub breaking: Vec<bool>,
    /// Index (into the same arrays) of the first point found to be breaking,
    /// walking from the sea toward the shore. `None` if no point broke.
    pub breaking_index: Option<usize>,
}

pub trait WaveSolver1D {
    fn solve(&self, input: &ProfileWaveInput) -> ProfileWaveOutput;
}

fn keep_within_360(mut deg: f64) -> f64 {
    deg %= 360.0;
    if deg < 0.0 {
        deg += 360.0;
    }
    deg
}

/// Linear (Airy) wave theory shoaling and refraction, following the source's
/// COVE branch of `CalcWavePropertiesOnProfile`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearWaveSolver;

impl WaveSolver1D for LinearWaveSolver {
    fn solve(&self, input: &ProfileWaveInput) -> ProfileWaveOutput {
        let n = input.elevations.len();
        let mut wave_height = vec![input.deep_water_wave_height; n];
        let mut wave_orientation = vec![input.deep_water_wave_orientation_deg; n];
        let mut breaking = vec![false; n];
        let mut breaking_index = None;

        let c0 = (input.gravity * input.wave_period) / (2.0 * std::f64::consts::PI);
        let l0 = c0 * input.wave_period;
        let depth_lookup_max = input.depth_ratio_for_wave_calcs * input.deep_water_wave_height;

        let mut is_breaking = false;
        let mut breaking_height = 0.0;
        let mut breaking_orientation = 0.0;
        let mut breaking_point = 0usize;

        // Walk landward (from the seaward terminus, last index, toward the
        // coast at index 0), matching the source's `nProfilePoint` descent.
        for i in (1..n).rev() {
            let sea_depth = (input.still_water_level + input.surge_level - input.elevations[i]).max(0.0);

            if sea_depth > depth_lookup_max {
                wave_height[i] = input.deep_water_wave_height;
                wave_orientation[i] = input.deep_water_wave_orientation_deg;
                continue;
            }

            if !is_breaking {
                let l = l0 * ((2.0 * std::f64::consts::PI * sea_depth / l0).tanh()).sqrt();
                let c = c0 * (2.0 * std::f64::consts::PI * sea_depth / l).tanh();
                let k = 2.0 * std::f64::consts::PI / l;
                let n_shoal = ((2.0 * sea_depth * k) / (2.0 * sea_depth * k).sinh() + 1.0) / 2.0;
                let ks = (c0 / (n_shoal * c * 2.0)).sqrt();
                let psi_rad = input.wave_to_normal_angle_deg.to_radians();
                let alpha_rad = ((c / c0) * psi_rad.sin()).asin();
                let kr = (psi_rad.cos() / alpha_rad.cos()).sqrt();
                let h = input.deep_water_wave_height * ks * kr;
                let alpha_deg = alpha_rad.to_degrees();

                let orientation = match input.sea_handedness {
                    Handedness::Left => keep_within_360(alpha_deg + 90.0 + input.flux_orientation_deg),
                    Handedness::Right => keep_within_360(alpha_deg + 270.0 + input.flux_orientation_deg),
                };

                if h > sea_depth * input.breaking_gamma {
                    is_breaking = true;
                    breaking_height = h;
                    breaking_orientation = orientation;
                    breaking_point = i;
                    breaking_index = Some(i);
                }

                wave_height[i] = h;
                wave_orientation[i] = orientation;
            } else {
                wave_orientation[i] = breaking_orientation;
                wave_height[i] = breaking_height * (i as f64 / breaking_point as f64);
            }

            breaking[i] = is_breaking;
        }

        ProfileWaveOutput {
            wave_height,
            wave_orientation,
            breaking,
            breaking_index,
        }
    }
}
