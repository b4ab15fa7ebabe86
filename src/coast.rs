//! The vector coastline: a smoothed polyline plus per-point geometric and
//! wave attributes, shore-normal profiles, and accepted shadow-zone boundaries.

use crate::constants::{DBL_NODATA, INT_NODATA};
use crate::profile::Profile;

/// Which side of the coastline the sea lies on, walking in index-increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// A rasterised shadow-zone boundary line, terminal-first and cape-last, as
/// appended to the coast by S6 stage 4 step 1.
#[derive(Clone, Debug)]
pub struct ShadowBoundaryLine {
    pub cells: Vec<(usize, usize)>,
    pub cape_coast_point: usize,
    pub terminal_coast_point: i64,
}

/// An ordered coastline with parallel per-point attribute arrays.
///
/// Kept as struct-of-arrays (one `Vec` per attribute) rather than a single
/// `Vec<CoastPoint>`, matching the source's parallel-array layout: per
/// either layout is conformant as long as lengths and NODATA
/// semantics are preserved, and the parallel layout is what this codebase's
/// own multi-attribute raster/vector passes already use.
#[derive(Clone, Debug)]
pub struct Coast {
    pub handedness: Handedness,

    /// Smoothed external-CRS polyline points.
    pub polyline: Vec<(f64, f64)>,
    /// Unsmoothed grid-CRS cell marked as coastline for each polyline point.
    pub cells: Vec<(usize, usize)>,

    pub curvature: Vec<f64>,
    pub flux_orientation: Vec<f64>,

    pub breaking_wave_height: Vec<f64>,
    pub breaking_wave_orientation: Vec<f64>,
    pub depth_of_breaking: Vec<f64>,
    pub breaking_distance: Vec<i32>,
    pub wave_energy: Vec<f64>,

    pub profiles: Vec<Profile>,
    pub shadow_boundaries: Vec<ShadowBoundaryLine>,
}

impl Coast {
    pub fn new(handedness: Handedness, polyline: Vec<(f64, f64)>, cells: Vec<(usize, usize)>) -> Self {
        let n = polyline.len();
        assert_eq!(cells.len(), n, "cells-marked-as-coastline must match polyline length");
        Self {
            handedness,
            polyline,
            cells,
            curvature: vec![0.0; n],
            flux_orientation: vec![0.0; n],
            breaking_wave_height: vec![DBL_NODATA; n],
            breaking_wave_orientation: vec![DBL_NODATA; n],
            depth_of_breaking: vec![DBL_NODATA; n],
            breaking_distance: vec![INT_NODATA; n],
            wave_energy: vec![0.0; n],
            profiles: Vec::new(),
            shadow_boundaries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.polyline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }

    /// Index of the profile anchored at the given coast point, if any.
    pub fn profile_at(&self, coast_point: usize) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.coast_point == coast_point)
    }

    /// Clear every per-point breaking-wave slot back to NODATA. Used by S0.
    pub fn reset_breaking_attributes(&mut self) {
        self.breaking_wave_height.fill(DBL_NODATA);
        self.breaking_wave_orientation.fill(DBL_NODATA);
        self.depth_of_breaking.fill(DBL_NODATA);
        self.breaking_distance.fill(INT_NODATA);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_coast(n: usize) -> Coast {
        let polyline: Vec<(f64, f64)> = (0..n).map(|i| (5.0, i as f64)).collect();
        let cells: Vec<(usize, usize)> = (0..n).map(|i| (5, i)).collect();
        Coast::new(Handedness::Right, polyline, cells)
    }

    #[test]
    fn fresh_coast_has_nodata_breaking_slots() {
        let coast = straight_coast(10);
        assert!(coast.breaking_wave_height.iter().all(|&h| h == DBL_NODATA));
        assert!(coast.breaking_distance.iter().all(|&d| d == INT_NODATA));
    }

    #[test]
    fn reset_restores_nodata_after_mutation() {
        let mut coast = straight_coast(5);
        coast.breaking_wave_height[2] = 1.5;
        coast.breaking_distance[2] = 3;
        coast.reset_breaking_attributes();
        assert_eq!(coast.breaking_wave_height[2], DBL_NODATA);
        assert_eq!(coast.breaking_distance[2], INT_NODATA);
    }
}
