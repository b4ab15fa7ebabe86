//! The raster grid: a bounded, non-wrapping 2-D array of cells.
//!
//! Adapted from the planet-scale tilemap this crate is built on top of: that
//! type models a cylindrical world and wraps on its X axis. A coastal domain
//! is a single bounded rectangle, so this version drops wrapping entirely —
//! out-of-range access returns `None` rather than an index computed modulo
//! the width.

use serde::{Deserialize, Serialize};

/// Clockwise-from-north offsets for the 8-connected neighbourhood, starting at N.
pub const DIR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Grid dimensions, cell size, and the external-CRS transform.
///
/// The transform is kept deliberately simple (axis-aligned, uniform cell
/// size): `ext_x = origin_x + grid_x * cell_side`, `ext_y = origin_y - grid_y
/// * cell_side` (grid Y increases downward/southward, external Y increases
/// northward, matching the source's raster convention).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub n_x_max: usize,
    pub n_y_max: usize,
    pub cell_side: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl GridGeometry {
    pub fn new(n_x_max: usize, n_y_max: usize, cell_side: f64) -> Self {
        Self {
            n_x_max,
            n_y_max,
            cell_side,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    #[inline]
    pub fn is_within_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.n_x_max && (y as usize) < self.n_y_max
    }

    pub fn grid_to_ext(&self, x: usize, y: usize) -> (f64, f64) {
        (
            self.origin_x + (x as f64 + 0.5) * self.cell_side,
            self.origin_y - (y as f64 + 0.5) * self.cell_side,
        )
    }
}

/// A bounded 2-D array of cells, row-major, with no wrapping at any edge.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width * height, "data length must match width * height");
        Self { width, height, data }
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn in_bounds_i(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn try_get(&self, x: usize, y: usize) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(self.get(x, y))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn try_get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.in_bounds(x, y) {
            Some(self.get_mut(x, y))
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// 4-connected neighbours that lie within the grid (no wrap on any edge).
    pub fn neighbors4(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);
        let (xi, yi) = (x as i32, y as i32);
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let (nx, ny) = (xi + dx, yi + dy);
            if self.in_bounds_i(nx, ny) {
                result.push((nx as usize, ny as usize));
            }
        }
        result
    }

    /// 8-connected neighbours that lie within the grid (no wrap on any edge).
    pub fn neighbors8(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(8);
        let (xi, yi) = (x as i32, y as i32);
        for (dx, dy) in DIR_OFFSETS {
            let (nx, ny) = (xi + dx, yi + dy);
            if self.in_bounds_i(nx, ny) {
                result.push((nx as usize, ny as usize));
            }
        }
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wrap_at_x_edges() {
        let grid: Grid<i32> = Grid::new(4, 4);
        assert!(grid.try_get(4, 0).is_none());
        assert_eq!(grid.neighbors4(0, 0).len(), 2);
        assert_eq!(grid.neighbors4(1, 1).len(), 4);
    }

    #[test]
    fn neighbors8_at_corner_has_three() {
        let grid: Grid<i32> = Grid::new(5, 5);
        assert_eq!(grid.neighbors8(0, 0).len(), 3);
    }

    #[test]
    fn geometry_round_trip_is_monotone() {
        let geom = GridGeometry::new(10, 10, 2.0);
        let (x0, y0) = geom.grid_to_ext(0, 0);
        let (x1, _) = geom.grid_to_ext(1, 0);
        let (_, y1) = geom.grid_to_ext(0, 1);
        assert!(x1 > x0);
        assert!(y1 < y0);
    }
}
