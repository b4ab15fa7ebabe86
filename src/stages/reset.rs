//! S0: grid reset and still-water depth.

use crate::cell::Cell;
use crate::cell::ShadowZoneCode;
use crate::coast::Coast;
use crate::constants::{Environment, DBL_NODATA};
use crate::grid::Grid;

/// Reset every cell's per-timestep fields and recompute still-water depth.
///
/// Every cell with positive depth (a sea cell) is assigned the deep-water
/// defaults; dry cells get NODATA wave height/orientation.
pub fn run(cells: &mut Grid<Cell>, coasts: &mut [Coast], env: &Environment) {
    for (_, _, cell) in cells.iter_mut() {
        cell.potential_erosion = 0.0;
        cell.actual_erosion = 0.0;
        cell.collapse_depth = 0.0;
        cell.local_slope = 0.0;
        cell.inv_dist_from_profile = 0.0;
        cell.is_profile = false;
        cell.is_coastline = false;

        cell.still_water_depth = (env.still_water_level - cell.top_of_sediment()).max(0.0);

        if cell.still_water_depth > 0.0 {
            cell.wave_height = env.deep_water_wave_height;
            cell.wave_orientation = env.deep_water_wave_orientation;
            cell.in_active_zone = false;
            cell.shadow_zone_code = ShadowZoneCode::NotIn;
        } else {
            cell.wave_height = DBL_NODATA;
            cell.wave_orientation = DBL_NODATA;
            cell.in_active_zone = false;
            cell.shadow_zone_code = ShadowZoneCode::NotIn;
        }
    }

    for coast in coasts.iter_mut() {
        coast.reset_breaking_attributes();
        coast.wave_energy.fill(0.0);

        for &(x, y) in &coast.cells {
            if let Some(cell) = cells.try_get_mut(x, y) {
                cell.is_coastline = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Layer;
    use crate::coast::Handedness;

    #[test]
    fn sea_cells_get_deep_water_defaults_and_dry_cells_get_nodata() {
        let mut cells: Grid<Cell> = Grid::new(3, 1);
        cells.set(0, 0, Cell::with_basement(-10.0)); // deep sea
        let mut dry = Cell::with_basement(-10.0);
        dry.push_layer(Layer {
            consolidated_thickness: 20.0,
            unconsolidated_thickness: 0.0,
        }); // now above still-water level
        cells.set(1, 0, dry);
        cells.set(2, 0, Cell::with_basement(-1.0));

        let env = Environment::default();
        let mut coasts: Vec<Coast> = vec![];
        run(&mut cells, &mut coasts, &env);

        assert_eq!(cells.get(0, 0).wave_height, env.deep_water_wave_height);
        assert_eq!(cells.get(1, 0).wave_height, DBL_NODATA);
        assert_eq!(cells.get(2, 0).wave_height, env.deep_water_wave_height);
    }

    #[test]
    fn reset_clears_breaking_attribute_arrays() {
        let polyline = vec![(0.0, 0.0), (0.0, 1.0)];
        let cells_marked = vec![(0usize, 0usize), (0, 1)];
        let mut coast = Coast::new(Handedness::Right, polyline, cells_marked);
        coast.breaking_wave_height[0] = 1.23;

        let mut grid: Grid<Cell> = Grid::new(1, 1);
        let env = Environment::default();
        let mut coasts = vec![coast];
        run(&mut grid, &mut coasts, &env);

        assert_eq!(coasts[0].breaking_wave_height[0], DBL_NODATA);
    }
}
