//! S3: interpolate breaking-wave attributes from profiles onto the
//! in-between coastline points.

use crate::coast::Coast;
use crate::constants::DBL_NODATA;

/// For every pair of consecutive valid profiles, fill in the coastline points
/// that lie strictly between them with a weighted blend of the two profiles'
/// breaking attributes.
pub fn run(coast: &mut Coast) {
    let num_profiles = coast.profiles.len();
    if num_profiles == 0 {
        return;
    }

    for prof_idx in 0..num_profiles {
        if !coast.profiles[prof_idx].is_ok_for_wave_solve() {
            continue;
        }
        let this_coast_point = coast.profiles[prof_idx].coast_point;

        let next_idx = match ((prof_idx + 1)..num_profiles).find(|&i| coast.profiles[i].is_ok_for_wave_solve()) {
            Some(i) => i,
            None => continue,
        };
        let next_coast_point = coast.profiles[next_idx].coast_point;

        let dist_between = next_coast_point as i64 - this_coast_point as i64;
        if dist_between <= 1 {
            continue;
        }
        let dist_between = dist_between as f64;

        let this_h = coast.breaking_wave_height[this_coast_point];
        let this_o = coast.breaking_wave_orientation[this_coast_point];
        let this_d = coast.depth_of_breaking[this_coast_point];
        let this_dist = coast.breaking_distance[this_coast_point];

        let next_h = coast.breaking_wave_height[next_coast_point];
        let next_o = coast.breaking_wave_orientation[next_coast_point];
        let next_d = coast.depth_of_breaking[next_coast_point];
        let next_dist = coast.breaking_distance[next_coast_point];

        if this_h == DBL_NODATA && next_h == DBL_NODATA {
            continue;
        }

        if this_h == DBL_NODATA {
            for n in this_coast_point..next_coast_point {
                coast.breaking_wave_height[n] = next_h;
                coast.breaking_wave_orientation[n] = next_o;
                coast.depth_of_breaking[n] = next_d;
                coast.breaking_distance[n] = next_dist;
            }
            continue;
        }

        if next_h == DBL_NODATA {
            for n in (this_coast_point + 1)..=next_coast_point {
                coast.breaking_wave_height[n] = this_h;
                coast.breaking_wave_orientation[n] = this_o;
                coast.depth_of_breaking[n] = this_d;
                coast.breaking_distance[n] = this_dist;
            }
            continue;
        }

        for n in (this_coast_point + 1)..next_coast_point {
            let dist = (n - this_coast_point) as f64;

            let (h, o, d, dist_val) = if next_d > 0.0 && this_d > 0.0 {
                let this_weight = (dist_between - dist) / dist_between;
                let next_weight = 1.0 - this_weight;
                (
                    this_weight * this_h + next_weight * next_h,
                    this_weight * this_o + next_weight * next_o,
                    this_weight * this_d + next_weight * next_d,
                    this_weight * this_dist as f64 + next_weight * next_dist as f64,
                )
            } else if this_d > 0.0 {
                (next_h, next_o, next_d, next_dist as f64)
            } else if next_d > 0.0 {
                (this_h, this_o, this_d, this_dist as f64)
            } else {
                (0.0, 0.0, 0.0, 0.0)
            };

            coast.breaking_wave_height[n] = h;
            coast.breaking_wave_orientation[n] = o;
            coast.depth_of_breaking[n] = d;
            coast.breaking_distance[n] = dist_val.round() as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coast::Handedness;
    use crate::profile::Profile;

    fn coast_with_two_profiles(n: usize, p0: usize, p1: usize) -> Coast {
        let polyline: Vec<(f64, f64)> = (0..n).map(|i| (5.0, i as f64)).collect();
        let cells: Vec<(usize, usize)> = (0..n).map(|i| (5, i)).collect();
        let mut coast = Coast::new(Handedness::Right, polyline, cells);
        coast.profiles.push(Profile::new(p0, vec![(5, p0), (6, p0)]));
        coast.profiles.push(Profile::new(p1, vec![(5, p1), (6, p1)]));
        coast
    }

    #[test]
    fn weighted_interpolation_blends_between_two_valid_profiles() {
        let mut coast = coast_with_two_profiles(11, 0, 10);
        coast.breaking_wave_height[0] = 1.0;
        coast.breaking_wave_orientation[0] = 10.0;
        coast.depth_of_breaking[0] = 2.0;
        coast.breaking_distance[0] = 3;

        coast.breaking_wave_height[10] = 3.0;
        coast.breaking_wave_orientation[10] = 20.0;
        coast.depth_of_breaking[10] = 4.0;
        coast.breaking_distance[10] = 5;

        run(&mut coast);

        assert!((coast.breaking_wave_height[5] - 2.0).abs() < 1e-9);
        assert_ne!(coast.breaking_wave_height[5], DBL_NODATA);
    }

    #[test]
    fn one_sided_nodata_copies_the_defined_profile_forward() {
        let mut coast = coast_with_two_profiles(6, 0, 5);
        coast.breaking_wave_height[0] = DBL_NODATA;
        coast.breaking_wave_height[5] = 2.5;
        coast.breaking_wave_orientation[5] = 15.0;
        coast.depth_of_breaking[5] = 1.5;
        coast.breaking_distance[5] = 2;

        run(&mut coast);

        for n in 0..5 {
            assert_eq!(coast.breaking_wave_height[n], 2.5);
        }
    }

    #[test]
    fn both_nodata_is_left_untouched() {
        let mut coast = coast_with_two_profiles(4, 0, 3);
        run(&mut coast);
        for n in 0..4 {
            assert_eq!(coast.breaking_wave_height[n], DBL_NODATA);
        }
    }
}
