//! S5: interpolate the per-profile scatter samples onto every other sea cell.
//!
//! The wave vector `(Hx, Hy)` is interpolated with the continuous scheme and
//! recombined into height/orientation; the active-zone flag is interpolated
//! with the nearest-neighbour scheme.

use crate::cell::Cell;
use crate::grid::Grid;
use crate::interpolate::ScatteredInterpolator2D;
use crate::stages::profile_waves::ProfileWaveSamples;

/// Interpolate `samples` onto every sea cell that a profile did not already
/// write directly (cells with `is_profile == false`).
pub fn run(cells: &mut Grid<Cell>, samples: &ProfileWaveSamples, interpolator: &dyn ScatteredInterpolator2D) {
    if samples.hx.is_empty() {
        return;
    }

    let width = cells.width;
    let height = cells.height;

    for y in 0..height {
        for x in 0..width {
            {
                let cell = cells.get(x, y);
                if cell.is_profile || !cell.is_contiguous_sea() {
                    continue;
                }
            }

            let hx = interpolator.interpolate(&samples.hx, x, y);
            let hy = interpolator.interpolate(&samples.hy, x, y);
            let active = interpolator.nearest(&samples.active_zone, x, y) >= 0.5;

            let height_here = hx.hypot(hy);
            // Hx = H*sin(theta), Hy = H*cos(theta), so theta = atan2(Hx, Hy).
            let mut orientation = hx.atan2(hy).to_degrees();
            if orientation < 0.0 {
                orientation += 360.0;
            }

            let cell = cells.get_mut(x, y);
            cell.wave_height = height_here;
            cell.wave_orientation = orientation;
            cell.in_active_zone = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::{IdwInterpolator, ScatterSample};

    #[test]
    fn interpolated_cell_recovers_height_and_orientation() {
        let mut grid: Grid<Cell> = Grid::new(3, 1);
        for x in 0..3 {
            let mut c = Cell::with_basement(-10.0);
            c.wave_height = 1.0;
            c.wave_orientation = 90.0;
            grid.set(x, 0, c);
        }
        grid.get_mut(1, 0).is_profile = true;

        let theta = 90.0_f64.to_radians();
        let samples = ProfileWaveSamples {
            hx: vec![
                ScatterSample { x: 0, y: 0, value: 2.0 * theta.sin() },
                ScatterSample { x: 2, y: 0, value: 2.0 * theta.sin() },
            ],
            hy: vec![
                ScatterSample { x: 0, y: 0, value: 2.0 * theta.cos() },
                ScatterSample { x: 2, y: 0, value: 2.0 * theta.cos() },
            ],
            active_zone: vec![
                ScatterSample { x: 0, y: 0, value: 1.0 },
                ScatterSample { x: 2, y: 0, value: 1.0 },
            ],
        };

        let idw = IdwInterpolator::default();
        run(&mut grid, &samples, &idw);

        // x=1 is a sea cell not marked as a profile, so it gets interpolated.
        assert!((grid.get(1, 0).wave_height - 2.0).abs() < 1e-6);
        assert!((grid.get(1, 0).wave_orientation - 90.0).abs() < 1e-6);
        assert!(grid.get(1, 0).in_active_zone);
    }
}
