//! A cross-shore profile: the polyline along which the 1-D wave solver runs.

/// A shore-normal profile anchored at one coast point.
///
/// `cells[0]` coincides with the coast cell; `cells[cells.len() - 1]` is the
/// seaward terminus. `distances[i]` is the along-profile horizontal distance
/// (metres) of `cells[i]` from the seaward terminus, and `elevations[i]` is
/// the cell's sediment-top elevation — both populated once, ahead of S2.
#[derive(Clone, Debug)]
pub struct Profile {
    pub coast_point: usize,
    pub cells: Vec<(usize, usize)>,
    pub distances: Vec<f64>,
    pub elevations: Vec<f64>,

    /// Usable for coast-point interpolation (S3), including the start/end of coast.
    pub ok_inc_start_and_end_of_coast: bool,
}

impl Profile {
    pub fn new(coast_point: usize, cells: Vec<(usize, usize)>) -> Self {
        let n = cells.len();
        Self {
            coast_point,
            cells,
            distances: vec![0.0; n],
            elevations: vec![0.0; n],
            ok_inc_start_and_end_of_coast: true,
        }
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Whether this profile participates in the S2 wave solve.
    ///
    /// The source additionally tracks a narrower `bOKIncStartAndEndOfCoast` that
    /// excludes only profiles with geometry problems while still permitting the
    /// coast's first/last profile to run; this crate folds that into a single
    /// flag since nothing downstream distinguishes the two further.
    pub fn is_ok_for_wave_solve(&self) -> bool {
        self.ok_inc_start_and_end_of_coast && self.cells.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_profile_is_ok_for_wave_solve_when_long_enough() {
        let profile = Profile::new(3, vec![(3, 5), (3, 4), (3, 3)]);
        assert!(profile.is_ok_for_wave_solve());

        let degenerate = Profile::new(3, vec![(3, 5)]);
        assert!(!degenerate.is_ok_for_wave_solve());
    }
}
