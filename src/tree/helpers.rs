//! Helper functions used in testing tree implementations, specifically
//! seeded point generators.
use num::Float;
use rand::prelude::*;

/// Points fixture for testing, uniformly sampled along each axis; bounds
/// default to the unit cube. Returns flat row-major coordinates
/// `[x_1, y_1, z_1, x_2, ...]`.
///
/// # Arguments
/// * `n_points` - The number of points to sample.
/// * `min` - The minimum coordinate value along each axis.
/// * `max` - The maximum coordinate value along each axis.
/// * `seed` - Seed for the random number generator.
pub fn points_fixture<T: Float + rand::distributions::uniform::SampleUniform>(
    n_points: usize,
    min: Option<T>,
    max: Option<T>,
    seed: Option<u64>,
) -> Vec<T> {
    let lo = min.unwrap_or_else(T::zero);
    let hi = max.unwrap_or_else(T::one);
    let rng = StdRng::seed_from_u64(seed.unwrap_or_default());

    rand::distributions::Uniform::new(lo, hi)
        .sample_iter(rng)
        .take(3 * n_points)
        .collect()
}

/// Points fixture for testing, a deterministic cell-centered lattice of
/// `per_axis`³ points in the unit cube.
///
/// # Arguments
/// * `per_axis` - The number of lattice points along each axis.
pub fn points_fixture_grid<T: Float>(per_axis: usize) -> Vec<T> {
    let mut points = Vec::with_capacity(3 * per_axis.pow(3));
    let step = T::one() / T::from(per_axis).unwrap();
    let half = T::from(0.5).unwrap();

    for i in 0..per_axis {
        for j in 0..per_axis {
            for k in 0..per_axis {
                points.push((T::from(i).unwrap() + half) * step);
                points.push((T::from(j).unwrap() + half) * step);
                points.push((T::from(k).unwrap() + half) * step);
            }
        }
    }

    points
}
