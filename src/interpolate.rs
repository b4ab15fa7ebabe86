//! Scattered-to-grid interpolation (S5, `ScatteredInterpolator2D`).
//!
//! The source delegates this to an external rasteriser process; this crate
//! interpolates in-process instead, which is equally conformant provided the continuous
//! field uses a linear scheme and the boolean field uses nearest-neighbour.

/// A sparse `(x, y, value)` sample taken from one profile's wave solve.
#[derive(Clone, Copy, Debug)]
pub struct ScatterSample {
    pub x: usize,
    pub y: usize,
    pub value: f64,
}

pub trait ScatteredInterpolator2D {
    /// Interpolate a continuous field (e.g. a wave vector component) at `(x, y)`.
    fn interpolate(&self, samples: &[ScatterSample], x: usize, y: usize) -> f64;

    /// Interpolate a boolean field (e.g. the active-zone flag) at `(x, y)` by
    /// nearest-neighbour, returning the sampled value itself.
    fn nearest(&self, samples: &[ScatterSample], x: usize, y: usize) -> f64 {
        nearest_sample(samples, x, y).map(|s| s.value).unwrap_or(0.0)
    }
}

fn nearest_sample(samples: &[ScatterSample], x: usize, y: usize) -> Option<&ScatterSample> {
    samples.iter().min_by(|a, b| {
        let da = dist_sq(a, x, y);
        let db = dist_sq(b, x, y);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn dist_sq(sample: &ScatterSample, x: usize, y: usize) -> f64 {
    let dx = sample.x as f64 - x as f64;
    let dy = sample.y as f64 - y as f64;
    dx * dx + dy * dy
}

/// Inverse-distance-weighted interpolation, power 2, falling back to the
/// coincident sample's value when a query point lands on a sample.
#[derive(Clone, Copy, Debug)]
pub struct IdwInterpolator {
    pub power: f64,
}

impl Default for IdwInterpolator {
    fn default() -> Self {
        Self { power: 2.0 }
    }
}

impl ScatteredInterpolator2D for IdwInterpolator {
    fn interpolate(&self, samples: &[ScatterSample], x: usize, y: usize) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for sample in samples {
            let d2 = dist_sq(sample, x, y);
            if d2 < 1e-9 {
                return sample.value;
            }
            let w = 1.0 / d2.powf(self.power / 2.0);
            weighted_sum += w * sample.value;
            weight_total += w;
        }

        weighted_sum / weight_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idw_returns_exact_value_at_a_sample() {
        let samples = vec![
            ScatterSample { x: 0, y: 0, value: 1.0 },
            ScatterSample { x: 10, y: 0, value: 5.0 },
        ];
        let idw = IdwInterpolator::default();
        assert_eq!(idw.interpolate(&samples, 0, 0), 1.0);
    }

    #[test]
    fn idw_interpolates_between_two_samples_at_midpoint() {
        let samples = vec![
            ScatterSample { x: 0, y: 0, value: 0.0 },
            ScatterSample { x: 10, y: 0, value: 10.0 },
        ];
        let idw = IdwInterpolator::default();
        let mid = idw.interpolate(&samples, 5, 0);
        assert!((mid - 5.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_picks_the_closest_sample() {
        let samples = vec![
            ScatterSample { x: 0, y: 0, value: 0.0 },
            ScatterSample { x: 10, y: 0, value: 1.0 },
        ];
        let idw = IdwInterpolator::default();
        assert_eq!(idw.nearest(&samples, 9, 0), 1.0);
        assert_eq!(idw.nearest(&samples, 1, 0), 0.0);
    }
}
