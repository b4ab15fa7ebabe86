//! S2: per-profile wave solve.

use crate::cell::Cell;
use crate::coast::Coast;
use crate::constants::{Constants, Environment, DBL_NODATA};
use crate::grid::Grid;
use crate::interpolate::ScatterSample;
use crate::solver::{ProfileWaveInput, WaveSolver1D};
use crate::stages::wave_angle::wave_angle_to_coast_normal;

/// Scattered samples collected across every profile, ready for S5.
#[derive(Default)]
pub struct ProfileWaveSamples {
    pub hx: Vec<ScatterSample>,
    pub hy: Vec<ScatterSample>,
    pub active_zone: Vec<ScatterSample>,
}

/// Apply the Ashton-Murray (2006) high-angle wave correction.
///
/// If the wave-to-normal angle and its up-coast neighbour are both positive
/// (down-coast-directed flux), clamp toward the flux-maximising 45 degrees
/// using the previous profile; mirror for the negative/next-profile case.
fn apply_high_angle_correction(psi: f64, psi_prev: f64, psi_next: f64, flux_prev: f64, flux_next: f64) -> f64 {
    if psi > 0.0 && psi_prev != DBL_NODATA && psi_prev > 0.0 {
        if psi > 45.0 {
            if psi_prev < 45.0 {
                return 45.0;
            }
            return flux_prev;
        }
        psi
    } else if psi < 0.0 && psi_next != DBL_NODATA && psi_next < 0.0 {
        if psi < -45.0 {
            if psi_next > -45.0 {
                return -45.0;
            }
            return flux_next;
        }
        psi
    } else if psi > 45.0 && psi_prev != DBL_NODATA && psi_prev > 0.0 {
        flux_prev
    } else if psi < -45.0 && psi_next != DBL_NODATA && psi_next < 0.0 {
        flux_next
    } else {
        psi
    }
}

/// Run the wave solve for every profile on `coast` whose geometry is usable,
/// writing results into `cells` and collecting scatter samples for S5.
pub fn run(
    cells: &mut Grid<Cell>,
    coast: &mut Coast,
    env: &Environment,
    constants: &Constants,
    solver: &dyn WaveSolver1D,
) -> ProfileWaveSamples {
    let mut samples = ProfileWaveSamples::default();
    let n = coast.len();
    if n == 0 {
        return samples;
    }

    // Collect indices first: profiles borrow `coast.profiles` while we also need
    // `&mut coast.flux_orientation` and other arrays, so index rather than alias.
    for profile_idx in 0..coast.profiles.len() {
        let coast_point = coast.profiles[profile_idx].coast_point;

        if !coast.profiles[profile_idx].is_ok_for_wave_solve() {
            continue;
        }

        if let Some(&(x, y)) = coast.profiles[profile_idx].cells.iter().find(|&&(x, y)| cells.get(x, y).has_no_top_layer()) {
            // No non-zero sediment/basement layer under this profile point:
            // the solver cannot run here. Abort just this profile, leaving its
            // cells at whatever S0/earlier stages already wrote.
            tracing::debug!(%x, %y, error = %crate::error::WaveFieldError::NoTopLayer { x, y }, "aborting profile");
            coast.breaking_wave_height[coast_point] = DBL_NODATA;
            coast.breaking_wave_orientation[coast_point] = DBL_NODATA;
            coast.depth_of_breaking[coast_point] = DBL_NODATA;
            coast.breaking_distance[coast_point] = crate::constants::INT_NODATA;
            continue;
        }

        let flux_this = coast.flux_orientation[coast_point];
        let flux_prev = if coast_point == 0 { flux_this } else { coast.flux_orientation[coast_point - 1] };
        let flux_next = if coast_point == n - 1 { flux_this } else { coast.flux_orientation[coast_point + 1] };

        let psi_this = wave_angle_to_coast_normal(flux_this, env.deep_water_wave_orientation, coast.handedness);
        if psi_this == DBL_NODATA {
            // Offshore: leave the cells at their deep-water defaults (already
            // set by S0) and clear this coast point's breaking slots.
            coast.breaking_wave_height[coast_point] = DBL_NODATA;
            coast.breaking_wave_orientation[coast_point] = DBL_NODATA;
            coast.depth_of_breaking[coast_point] = DBL_NODATA;
            coast.breaking_distance[coast_point] = crate::constants::INT_NODATA;
            continue;
        }

        let psi_prev = if coast_point > 0 {
            wave_angle_to_coast_normal(flux_prev, env.deep_water_wave_orientation, coast.handedness)
        } else {
            psi_this
        };
        let psi_next = if coast_point < n - 1 {
            wave_angle_to_coast_normal(flux_next, env.deep_water_wave_orientation, coast.handedness)
        } else {
            psi_this
        };

        let corrected_psi = apply_high_angle_correction(psi_this, psi_prev, psi_next, flux_prev, flux_next);

        let profile = &coast.profiles[profile_idx];
        let input = ProfileWaveInput {
            distances: &profile.distances,
            elevations: &profile.elevations,
            wave_period: env.wave_period,
            deep_water_wave_height: env.deep_water_wave_height,
            wave_to_normal_angle_deg: corrected_psi,
            surge_level: 0.0,
            friction_factor: 0.015,
            still_water_level: env.still_water_level,
            gravity: env.gravity,
            breaking_gamma: constants.waveheight_over_waterdepth_at_breaking,
            depth_ratio_for_wave_calcs: constants.wave_depth_ratio_for_wave_calcs,
            sea_handedness: coast.handedness,
            flux_orientation_deg: flux_this,
            deep_water_wave_orientation_deg: env.deep_water_wave_orientation,
        };
        let output = solver.solve(&input);

        let profile_cells = coast.profiles[profile_idx].cells.clone();
        for (i, &(x, y)) in profile_cells.iter().enumerate().skip(1) {
            if !cells.get(x, y).is_contiguous_sea() {
                continue;
            }
            let h = output.wave_height[i];
            let theta = output.wave_orientation[i];
            let breaking = output.breaking[i];

            let cell = cells.get_mut(x, y);
            cell.is_profile = true;
            cell.in_active_zone = breaking;
            cell.wave_height = h;
            cell.wave_orientation = theta;

            samples.hx.push(ScatterSample { x, y, value: h * theta.to_radians().sin() });
            samples.hy.push(ScatterSample { x, y, value: h * theta.to_radians().cos() });
            samples.active_zone.push(ScatterSample { x, y, value: if breaking { 1.0 } else { 0.0 } });
        }

        if let Some(break_idx) = output.breaking_index {
            let (bx, by) = profile_cells[break_idx];
            coast.breaking_wave_height[coast_point] = output.wave_height[break_idx];
            coast.breaking_wave_orientation[coast_point] = output.wave_orientation[break_idx];
            coast.depth_of_breaking[coast_point] = (env.still_water_level - cells.get(bx, by).top_of_sediment()).max(0.0);
            coast.breaking_distance[coast_point] = break_idx as i32;
        } else {
            coast.breaking_wave_height[coast_point] = DBL_NODATA;
            coast.breaking_wave_orientation[coast_point] = DBL_NODATA;
            coast.depth_of_breaking[coast_point] = DBL_NODATA;
            coast.breaking_distance[coast_point] = crate::constants::INT_NODATA;
        }
    }

    samples
}
