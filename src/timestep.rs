//! Drives the S0-S7 wave-field pipeline for a single timestep, in strict
//! order, over every coast sharing one grid.

use std::collections::HashMap;

use tracing::debug;

use crate::cell::Cell;
use crate::coast::Coast;
use crate::constants::{Constants, Environment};
use crate::error::Result;
use crate::grid::{Grid, GridGeometry};
use crate::interpolate::ScatteredInterpolator2D;
use crate::shadow;
use crate::solver::WaveSolver1D;
use crate::stages::{coast_interp, energy, hole_fill, profile_waves, reset, scatter_to_grid, tangent};

/// Run one full timestep: S0 grid reset, then S1-S6 per coast, then the
/// global S7 hole-fill/D50 pass.
///
/// Returns each coastal polygon's mean unconsolidated D50 from S7.
pub fn run_timestep(
    cells: &mut Grid<Cell>,
    coasts: &mut [Coast],
    grid: &GridGeometry,
    env: &Environment,
    constants: &Constants,
    solver: &dyn WaveSolver1D,
    interpolator: &dyn ScatteredInterpolator2D,
) -> Result<HashMap<usize, f64>> {
    reset::run(cells, coasts, env);

    for (coast_idx, coast) in coasts.iter_mut().enumerate() {
        tangent::run(coast);

        let samples = profile_waves::run(cells, coast, env, constants, solver);

        coast_interp::run(coast);
        energy::run(coast, env.wave_period, env.timestep_seconds(), constants);

        scatter_to_grid::run(cells, &samples, interpolator);

        shadow::run(coast_idx, coast, cells, grid, env, constants)?;
        debug!(coast_idx, shadow_zones = coast.shadow_boundaries.len(), "shadow zones resolved");
    }

    let d50_by_polygon = hole_fill::run(cells, env);
    Ok(d50_by_polygon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coast::Handedness;
    use crate::interpolate::IdwInterpolator;
    use crate::solver::LinearWaveSolver;

    #[test]
    fn timestep_runs_end_to_end_on_a_flat_straight_coast() {
        let n = 20;
        let width = 20;
        let polyline: Vec<(f64, f64)> = (0..n).map(|i| (5.0, i as f64)).collect();
        let cells_marked: Vec<(usize, usize)> = (0..n).map(|i| (5, i)).collect();
        let mut coast = Coast::new(Handedness::Right, polyline, cells_marked);
        coast.curvature = vec![0.0; n];

        let mut grid: Grid<Cell> = Grid::new(width, n);
        for y in 0..n {
            for x in 0..width {
                let elevation = if x < 5 { 10.0 } else { -10.0 };
                grid.set(x, y, Cell::with_basement(elevation));
            }
        }
        let geom = GridGeometry::new(width, n, 1.0);
        let env = Environment {
            deep_water_wave_height: 1.0,
            deep_water_wave_orientation: 90.0,
            ..Environment::default()
        };
        let constants = Constants::default();
        let solver = LinearWaveSolver;
        let interpolator = IdwInterpolator::default();

        let mut coasts = vec![coast];
        let result = run_timestep(&mut grid, &mut coasts, &geom, &env, &constants, &solver, &interpolator);
        assert!(result.is_ok());

        for y in 0..n {
            for x in 6..width {
                let cell = grid.get(x, y);
                assert_eq!(cell.wave_height, env.deep_water_wave_height);
                assert_eq!(cell.wave_orientation, env.deep_water_wave_orientation);
            }
        }
    }
}
