//! Wave-to-coast-normal angle, shared by S2 and S6.

use crate::coast::Handedness;
use crate::constants::DBL_NODATA;

/// Angle between the deep-water wave direction and the outward coast normal.
///
/// `psi = ((theta0 - alpha + 360) mod 360) - (h == Left ? 90 : 270)`. Returns
/// `DBL_NODATA` (the waves are offshore) when `|psi| >= 90`.
pub fn wave_angle_to_coast_normal(flux_orientation_deg: f64, deep_water_wave_orientation_deg: f64, handedness: Handedness) -> f64 {
    let wrapped = (deep_water_wave_orientation_deg - flux_orientation_deg + 360.0).rem_euclid(360.0);
    let offset = match handedness {
        Handedness::Left => 90.0,
        Handedness::Right => 270.0,
    };
    let psi = wrapped - offset;

    if psi.abs() >= 90.0 {
        DBL_NODATA
    } else {
        psi
    }
}
