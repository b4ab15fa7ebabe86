//! S4: wave energy accumulation (Walkden & Hall, 2005, equation 4).

use crate::coast::Coast;
use crate::constants::{Constants, DBL_NODATA};

/// Accumulate erosive wave energy at every coast point with a defined
/// breaking wave height: `E += Hb^p1 * T^p2 * dt_seconds`.
pub fn run(coast: &mut Coast, wave_period: f64, timestep_seconds: f64, constants: &Constants) {
    for n in 0..coast.len() {
        let hb = coast.breaking_wave_height[n];
        if hb == DBL_NODATA {
            continue;
        }
        let erosive_force = hb.powf(constants.walkden_hall_param_1) * wave_period.powf(constants.walkden_hall_param_2);
        coast.wave_energy[n] += erosive_force * timestep_seconds;
    }
}
