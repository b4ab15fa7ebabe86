//! S1: coast tangent (flux orientation) computation.

use crate::coast::Coast;
use rayon::prelude::*;

/// Azimuth (degrees clockwise from north) of the vector `(dx, dy)` in external
/// CRS, where `dy` is the northward component. The source derives this by a
/// manual case analysis on the signs of `dx, dy` with axis-aligned shortcuts;
/// `atan2` is mathematically identical and is used here instead.
fn azimuth(dx: f64, dy: f64) -> f64 {
    let mut deg = dx.atan2(dy).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    deg
}

/// Compute the flux-orientation azimuth at every coast point: forward
/// difference at the start, backward difference at the end, central
/// difference everywhere else.
pub fn run(coast: &mut Coast) {
    let n = coast.len();
    if n == 0 {
        return;
    }
    if n == 1 {
        coast.flux_orientation[0] = 0.0;
        return;
    }

    let polyline = &coast.polyline;
    let orientations: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|p| {
            let (dx, dy) = if p == 0 {
                (polyline[1].0 - polyline[0].0, polyline[1].1 - polyline[0].1)
            } else if p == n - 1 {
                (polyline[p].0 - polyline[p - 1].0, polyline[p].1 - polyline[p - 1].1)
            } else {
                (polyline[p + 1].0 - polyline[p - 1].0, polyline[p + 1].1 - polyline[p - 1].1)
            };
            azimuth(dx, dy)
        })
        .collect();

    coast.flux_orientation = orientations;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coast::Handedness;

    #[test]
    fn straight_north_south_coast_has_constant_tangent() {
        let n = 8;
        let polyline: Vec<(f64, f64)> = (0..n).map(|i| (5.0, i as f64)).collect();
        let cells: Vec<(usize, usize)> = (0..n).map(|i| (5, i)).collect();
        let mut coast = Coast::new(Handedness::Right, polyline, cells);

        run(&mut coast);

        for p in 0..n {
            assert!(
                (coast.flux_orientation[p] - 0.0).abs() < 1e-6,
                "point {p} had orientation {}",
                coast.flux_orientation[p]
            );
        }
    }

    #[test]
    fn straight_east_west_coast_has_90_degree_tangent() {
        let n = 6;
        let polyline: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 5.0)).collect();
        let cells: Vec<(usize, usize)> = (0..n).map(|i| (i, 5)).collect();
        let mut coast = Coast::new(Handedness::Right, polyline, cells);

        run(&mut coast);

        for p in 0..n {
            assert!((coast.flux_orientation[p] - 90.0).abs() < 1e-6);
        }
    }
}
