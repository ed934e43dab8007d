//! Naive direct summation, the O(N²) reference for the hierarchical
//! evaluators.
use rayon::prelude::*;

use crate::evaluate::constants::DIRECT_MAX_CHUNK_SIZE;
use crate::evaluate::helpers::chunk_size;
use crate::traits::kernel::Kernel;

/// Accumulate the exact pairwise sum of `charges` at `sources` onto every
/// target, parallelised over chunks of targets.
///
/// `sources` and `targets` are flat row-major coordinate slices; `charges`
/// is aligned with `sources` and `results` with `targets`. Results are
/// accumulated, so the caller zero-initialises.
pub fn evaluate_direct<K>(
    kernel: &K,
    sources: &[K::Scalar],
    charges: &[K::Charge],
    targets: &[K::Scalar],
    results: &mut [K::Result],
) where
    K: Kernel,
    K::Scalar: Sync,
    K::Charge: Sync,
    K::Result: Send,
{
    let n_targets = targets.len() / 3;
    debug_assert_eq!(sources.len() / 3, charges.len());
    debug_assert_eq!(n_targets, results.len());

    if n_targets == 0 {
        return;
    }

    let chunk = chunk_size(n_targets, DIRECT_MAX_CHUNK_SIZE);

    results
        .par_chunks_mut(chunk)
        .zip(targets.par_chunks(3 * chunk))
        .for_each(|(result_chunk, target_chunk)| {
            kernel.p2p(sources, charges, target_chunk, result_chunk);
        });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kernels::laplace::LaplaceKernel;
    use crate::tree::helpers::points_fixture;

    #[test]
    fn test_parallel_matches_single_call() {
        let kernel = LaplaceKernel::<f64>::new();
        let n_points = 500;
        let sources = points_fixture::<f64>(n_points, None, None, Some(0));
        let targets = points_fixture::<f64>(n_points, None, None, Some(1));
        let charges = vec![1.0; n_points];

        let mut parallel = vec![0.0; n_points];
        evaluate_direct(&kernel, &sources, &charges, &targets, &mut parallel);

        let mut sequential = vec![0.0; n_points];
        kernel.p2p(&sources, &charges, &targets, &mut sequential);

        for (p, s) in parallel.iter().zip(sequential) {
            assert!((p - s).abs() < 1e-12);
        }
    }
}
