//! Random sampling helpers.

use rand::{Rng, RngCore};

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform point `(a, b)` in the unit right triangle `a + b <= 1`.
///
/// Draws pairs from the unit square and rejects those past the diagonal.
/// Used both for barycentric points on area lights and for offsets inside
/// the glossy cone.
pub fn sample_unit_triangle(rng: &mut dyn RngCore) -> (f32, f32) {
    loop {
        let a = gen_f32(rng);
        let b = gen_f32(rng);
        if a + b <= 1.0 {
            return (a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_stay_in_triangle() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let (a, b) = sample_unit_triangle(&mut rng);
            assert!(a >= 0.0 && b >= 0.0);
            assert!(a + b <= 1.0);
        }
    }

    #[test]
    fn test_barycentric_means_are_uniform() {
        // Uniform over the triangle puts the mean of each coordinate at 1/3
        let mut rng = StdRng::seed_from_u64(42);
        let n = 100_000;
        let (mut sum_a, mut sum_b) = (0.0f64, 0.0f64);
        let mut lower_half = 0usize;

        for _ in 0..n {
            let (a, b) = sample_unit_triangle(&mut rng);
            sum_a += a as f64;
            sum_b += b as f64;
            if a + b <= std::f32::consts::FRAC_1_SQRT_2 {
                lower_half += 1;
            }
        }

        let mean_a = sum_a / n as f64;
        let mean_b = sum_b / n as f64;
        let mean_c = 1.0 - mean_a - mean_b;
        for mean in [mean_a, mean_b, mean_c] {
            assert!((mean - 1.0 / 3.0).abs() < 0.01, "mean {mean}");
        }

        // The sub-triangle a + b <= 1/sqrt(2) covers half the area
        let fraction = lower_half as f64 / n as f64;
        assert!((fraction - 0.5).abs() < 0.01, "fraction {fraction}");
    }
}
