//! S7: 4-neighbour hole-fill imputation for isolated raster artefacts, fused
//! with the per-polygon mean-D50 accumulation.
//!
//! Snapshots every cell's neighbour-derived aggregate before mutating
//! anything, so a cell filled earlier in the scan never leaks into a
//! neighbour's average within the same pass.

use std::collections::HashMap;

use crate::cell::{Cell, ShadowZoneCode};
use crate::constants::Environment;
use crate::grid::Grid;

/// Per-cell neighbour aggregate gathered before any mutation this pass.
struct NeighbourStats {
    n_read: usize,
    n_active: usize,
    n_shadow_or_downdrift: usize,
    n_downdrift: usize,
    avg_height: f64,
    avg_orientation: f64,
}

fn gather(cells: &Grid<Cell>, x: usize, y: usize) -> NeighbourStats {
    let mut n_read = 0;
    let mut n_active = 0;
    let mut n_shadow_or_downdrift = 0;
    let mut n_downdrift = 0;
    let mut sum_height = 0.0;
    let mut sum_orientation = 0.0;

    for (nx, ny) in cells.neighbors4(x, y) {
        let n = cells.get(nx, ny);
        if !n.is_contiguous_sea() {
            continue;
        }
        n_read += 1;
        sum_height += n.wave_height;
        sum_orientation += n.wave_orientation;
        if n.in_active_zone {
            n_active += 1;
        }
        match n.shadow_zone_code {
            ShadowZoneCode::InNotYetDone | ShadowZoneCode::InDone => n_shadow_or_downdrift += 1,
            ShadowZoneCode::Downdrift => {
                n_shadow_or_downdrift += 1;
                n_downdrift += 1;
            }
            ShadowZoneCode::NotIn | ShadowZoneCode::Boundary => {}
        }
    }

    let (avg_height, avg_orientation) = if n_read > 0 {
        (sum_height / n_read as f64, sum_orientation / n_read as f64)
    } else {
        (0.0, 0.0)
    };

    NeighbourStats {
        n_read,
        n_active,
        n_shadow_or_downdrift,
        n_downdrift,
        avg_height,
        avg_orientation,
    }
}

/// Run the hole-fill cascade over every sea cell, and accumulate the mean
/// unconsolidated D50 per coastal polygon from active-zone cells that carry
/// both a polygon id and a defined D50.
///
/// Returns `polygon_id -> mean D50` (0.0 for polygons with no contributing cell).
pub fn run(cells: &mut Grid<Cell>, env: &Environment) -> HashMap<usize, f64> {
    let width = cells.width;
    let height = cells.height;

    let mut stats: Vec<Option<NeighbourStats>> = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            if cells.get(x, y).is_contiguous_sea() {
                stats.push(Some(gather(cells, x, y)));
            } else {
                stats.push(None);
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            let Some(s) = &stats[y * width + x] else { continue };

            if s.n_active == 4 {
                cells.get_mut(x, y).in_active_zone = true;
            }

            let cell = cells.get_mut(x, y);
            if cell.wave_height == env.deep_water_wave_height && s.avg_height != env.deep_water_wave_height {
                cell.wave_height = s.avg_height;
            }
            if cell.wave_orientation == env.deep_water_wave_orientation && s.avg_orientation != env.deep_water_wave_orientation {
                cell.wave_orientation = s.avg_orientation;
            }

            let cell = cells.get_mut(x, y);
            if cell.shadow_zone_code == ShadowZoneCode::InNotYetDone {
                cell.shadow_zone_code = ShadowZoneCode::InDone;
                cell.wave_height = s.avg_height;
                cell.wave_orientation = s.avg_orientation;
            }

            let cell = cells.get_mut(x, y);
            if s.n_downdrift == 4 {
                cell.shadow_zone_code = ShadowZoneCode::Downdrift;
                cell.wave_height = s.avg_height;
                cell.wave_orientation = s.avg_orientation;
            }

            let cell = cells.get_mut(x, y);
            if s.n_shadow_or_downdrift == 4 && cell.shadow_zone_code == ShadowZoneCode::NotIn {
                cell.shadow_zone_code = ShadowZoneCode::InDone;
                cell.wave_height = s.avg_height;
                cell.wave_orientation = s.avg_orientation;
            }
        }
    }

    let mut sums: HashMap<usize, (f64, usize)> = HashMap::new();
    for (_, _, cell) in cells.iter() {
        if !cell.in_active_zone {
            continue;
        }
        if let (Some(polygon_id), Some(d50)) = (cell.polygon_id, cell.unconsolidated_d50) {
            let entry = sums.entry(polygon_id).or_insert((0.0, 0));
            entry.0 += d50;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(id, (sum, count))| (id, if count > 0 { sum / count as f64 } else { 0.0 }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sea_cell(height: f64, orientation: f64) -> Cell {
        let mut c = Cell::with_basement(-10.0);
        c.wave_height = height;
        c.wave_orientation = orientation;
        c
    }

    #[test]
    fn isolated_active_cell_gets_promoted_when_surrounded() {
        let env = Environment::default();
        let mut grid: Grid<Cell> = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, sea_cell(env.deep_water_wave_height, env.deep_water_wave_orientation));
            }
        }
        for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            grid.get_mut(x, y).in_active_zone = true;
        }

        run(&mut grid, &env);
        assert!(grid.get(1, 1).in_active_zone);
    }

    #[test]
    fn shadow_not_yet_done_is_promoted_and_averaged() {
        let env = Environment::default();
        let mut grid: Grid<Cell> = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.set(x, y, sea_cell(2.0, 45.0));
            }
        }
        grid.get_mut(1, 1).shadow_zone_code = ShadowZoneCode::InNotYetDone;
        grid.get_mut(1, 1).wave_height = 0.0;

        run(&mut grid, &env);
        assert_eq!(grid.get(1, 1).shadow_zone_code, ShadowZoneCode::InDone);
        assert!((grid.get(1, 1).wave_height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_mean_d50_averages_active_zone_contributors() {
        let env = Environment::default();
        let mut grid: Grid<Cell> = Grid::new(2, 1);
        let mut a = sea_cell(1.0, 90.0);
        a.in_active_zone = true;
        a.polygon_id = Some(7);
        a.unconsolidated_d50 = Some(0.3);
        grid.set(0, 0, a);

        let mut b = sea_cell(1.0, 90.0);
        b.in_active_zone = true;
        b.polygon_id = Some(7);
        b.unconsolidated_d50 = Some(0.5);
        grid.set(1, 0, b);

        let result = run(&mut grid, &env);
        assert!((result[&7] - 0.4).abs() < 1e-9);
    }

    #[test]
    fn polygon_with_no_contributors_is_absent() {
        let env = Environment::default();
        let mut grid: Grid<Cell> = Grid::new(1, 1);
        grid.set(0, 0, sea_cell(1.0, 90.0));
        let result = run(&mut grid, &env);
        assert!(result.is_empty());
    }
}
