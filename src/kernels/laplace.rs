//! Laplace kernel in three dimensions with Cartesian expansions truncated
//! at dipole order.
use std::f64::consts::FRAC_1_PI;
use std::marker::PhantomData;

use itertools::izip;
use num::Float;

use crate::traits::kernel::Kernel;

/// Multipole expansion of a set of charges about a box center: total charge
/// and dipole moment.
#[derive(Debug, Clone, Copy)]
pub struct LaplaceMultipole<T> {
    /// Total charge contained in the box subtree.
    pub charge: T,

    /// Dipole moment of the contained charges about the box center.
    pub dipole: [T; 3],
}

impl<T> Default for LaplaceMultipole<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            charge: T::zero(),
            dipole: [T::zero(); 3],
        }
    }
}

/// Local expansion of the far field inside a box: potential value and
/// gradient at the box center.
#[derive(Debug, Clone, Copy)]
pub struct LaplaceLocal<T> {
    /// Potential at the box center.
    pub value: T,

    /// Potential gradient at the box center.
    pub gradient: [T; 3],
}

impl<T> Default for LaplaceLocal<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            value: T::zero(),
            gradient: [T::zero(); 3],
        }
    }
}

/// Single particle Laplace kernel `1 / (4 π |x - y|)` with monopole plus
/// dipole far-field expansions.
///
/// The truncation error of an admissible interaction between boxes of side
/// lengths `s1`, `s2` at center distance `d` is `O(((s1 + s2) / 2d)²)`;
/// under the acceptance criterion `d·θ > (s1 + s2) / 2` this is `O(θ²)`
/// per interaction. Coincident source/target pairs contribute zero in
/// direct evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaplaceKernel<T> {
    scalar: PhantomData<T>,
}

impl<T> LaplaceKernel<T> {
    /// Constructor
    pub fn new() -> Self {
        Self {
            scalar: PhantomData,
        }
    }
}

#[inline]
fn dot<T: Float>(a: &[T; 3], b: &[T; 3]) -> T {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

impl<T> Kernel for LaplaceKernel<T>
where
    T: Float + Send + Sync,
{
    type Scalar = T;
    type Charge = T;
    type Result = T;
    type Multipole = LaplaceMultipole<T>;
    type Local = LaplaceLocal<T>;

    fn init_multipole(&self, multipole: &mut Self::Multipole, _side_length: T) {
        *multipole = Self::Multipole::default();
    }

    fn init_local(&self, local: &mut Self::Local, _side_length: T) {
        *local = Self::Local::default();
    }

    fn p2m(&self, points: &[T], charges: &[T], center: &[T; 3], multipole: &mut Self::Multipole) {
        for (point, charge) in izip!(points.chunks_exact(3), charges) {
            multipole.charge = multipole.charge + *charge;
            for axis in 0..3 {
                multipole.dipole[axis] =
                    multipole.dipole[axis] + *charge * (point[axis] - center[axis]);
            }
        }
    }

    fn m2m(&self, child: &Self::Multipole, parent: &mut Self::Multipole, translation: &[T; 3]) {
        parent.charge = parent.charge + child.charge;
        for axis in 0..3 {
            parent.dipole[axis] =
                parent.dipole[axis] + child.dipole[axis] - child.charge * translation[axis];
        }
    }

    fn m2l(&self, source: &Self::Multipole, target: &mut Self::Local, translation: &[T; 3]) {
        let m_inv_4pi = num::cast::<f64, T>(0.25 * FRAC_1_PI).unwrap();
        let three = T::from(3.0).unwrap();

        let r2 = dot(translation, translation);
        if !(r2 > T::zero()) {
            return;
        }
        let inv_r = r2.sqrt().recip();
        let inv_r3 = inv_r * inv_r * inv_r;
        let inv_r5 = inv_r3 * inv_r * inv_r;

        let projected = dot(&source.dipole, translation);

        target.value =
            target.value + m_inv_4pi * (source.charge * inv_r + projected * inv_r3);
        for axis in 0..3 {
            target.gradient[axis] = target.gradient[axis]
                + m_inv_4pi
                    * (source.dipole[axis] * inv_r3
                        - (source.charge * inv_r3 + three * projected * inv_r5)
                            * translation[axis]);
        }
    }

    fn m2p(
        &self,
        center: &[T; 3],
        multipole: &Self::Multipole,
        targets: &[T],
        results: &mut [T],
    ) {
        let m_inv_4pi = num::cast::<f64, T>(0.25 * FRAC_1_PI).unwrap();

        for (target, result) in izip!(targets.chunks_exact(3), results.iter_mut()) {
            let diff = [
                target[0] - center[0],
                target[1] - center[1],
                target[2] - center[2],
            ];
            let r2 = dot(&diff, &diff);
            if !(r2 > T::zero()) {
                continue;
            }
            let inv_r = r2.sqrt().recip();
            let inv_r3 = inv_r * inv_r * inv_r;

            *result = *result
                + m_inv_4pi * (multipole.charge * inv_r + dot(&multipole.dipole, &diff) * inv_r3);
        }
    }

    fn l2l(&self, parent: &Self::Local, child: &mut Self::Local, translation: &[T; 3]) {
        child.value = child.value + parent.value + dot(&parent.gradient, translation);
        for axis in 0..3 {
            child.gradient[axis] = child.gradient[axis] + parent.gradient[axis];
        }
    }

    fn l2p(&self, targets: &[T], results: &mut [T], center: &[T; 3], local: &Self::Local) {
        for (target, result) in izip!(targets.chunks_exact(3), results.iter_mut()) {
            let diff = [
                target[0] - center[0],
                target[1] - center[1],
                target[2] - center[2],
            ];
            *result = *result + local.value + dot(&local.gradient, &diff);
        }
    }

    fn p2p(&self, sources: &[T], charges: &[T], targets: &[T], results: &mut [T]) {
        let m_inv_4pi = num::cast::<f64, T>(0.25 * FRAC_1_PI).unwrap();

        for (target, result) in izip!(targets.chunks_exact(3), results.iter_mut()) {
            let mut acc = T::zero();
            for (source, charge) in izip!(sources.chunks_exact(3), charges) {
                let diff0 = target[0] - source[0];
                let diff1 = target[1] - source[1];
                let diff2 = target[2] - source[2];
                let diff_norm = (diff0 * diff0 + diff1 * diff1 + diff2 * diff2).sqrt();
                if diff_norm > T::zero() {
                    acc = acc + *charge / diff_norm;
                }
            }
            *result = *result + acc * m_inv_4pi;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::helpers::points_fixture;

    fn cluster(seed: u64) -> (Vec<f64>, Vec<f64>, [f64; 3]) {
        // Tight cluster in a cell of side 0.2 about its center.
        let points: Vec<f64> = points_fixture::<f64>(32, Some(0.4), Some(0.6), Some(seed));
        let charges = vec![1.0; 32];
        (points, charges, [0.5, 0.5, 0.5])
    }

    fn direct_potential(sources: &[f64], charges: &[f64], target: &[f64; 3]) -> f64 {
        let mut acc = 0.0;
        for (source, charge) in sources.chunks_exact(3).zip(charges) {
            let r = ((target[0] - source[0]).powi(2)
                + (target[1] - source[1]).powi(2)
                + (target[2] - source[2]).powi(2))
            .sqrt();
            acc += charge / r;
        }
        acc * 0.25 * FRAC_1_PI
    }

    #[test]
    fn test_m2p_far_field() {
        let kernel = LaplaceKernel::<f64>::new();
        let (points, charges, center) = cluster(0);

        let mut multipole = LaplaceMultipole::default();
        kernel.p2m(&points, &charges, &center, &mut multipole);
        assert!((multipole.charge - 32.0).abs() < 1e-12);

        // Separation ratio (s/d) ~ 0.07, so the quadrupole remainder is
        // well under a percent.
        let target = [3.5, 0.5, 0.5];
        let mut approx = [0.0];
        kernel.m2p(&center, &multipole, &target, &mut approx);

        let exact = direct_potential(&points, &charges, &target);
        assert!((approx[0] - exact).abs() / exact < 1e-2);
    }

    #[test]
    fn test_m2m_preserves_moments() {
        let kernel = LaplaceKernel::<f64>::new();
        let (points, charges, center) = cluster(1);

        // Reference: moments of all bodies about the parent center.
        let parent_center = [0.45, 0.45, 0.45];
        let mut reference = LaplaceMultipole::default();
        kernel.p2m(&points, &charges, &parent_center, &mut reference);

        // Shifted: moments about the cell center, then translated.
        let mut child = LaplaceMultipole::default();
        kernel.p2m(&points, &charges, &center, &mut child);
        let translation = [
            parent_center[0] - center[0],
            parent_center[1] - center[1],
            parent_center[2] - center[2],
        ];
        let mut shifted = LaplaceMultipole::default();
        kernel.m2m(&child, &mut shifted, &translation);

        assert!((shifted.charge - reference.charge).abs() < 1e-12);
        for axis in 0..3 {
            assert!((shifted.dipole[axis] - reference.dipole[axis]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_m2l_l2p_consistent_with_m2p() {
        let kernel = LaplaceKernel::<f64>::new();
        let (points, charges, center) = cluster(2);

        let mut multipole = LaplaceMultipole::default();
        kernel.p2m(&points, &charges, &center, &mut multipole);

        // Targets near a well separated local center.
        let local_center = [4.5, 0.5, 0.5];
        let targets = [4.45, 0.5, 0.5, 4.55, 0.45, 0.55];
        let translation = [
            local_center[0] - center[0],
            local_center[1] - center[1],
            local_center[2] - center[2],
        ];

        let mut local = LaplaceLocal::default();
        kernel.m2l(&multipole, &mut local, &translation);

        let mut via_local = [0.0, 0.0];
        kernel.l2p(&targets, &mut via_local, &local_center, &local);

        let mut via_multipole = [0.0, 0.0];
        kernel.m2p(&center, &multipole, &targets, &mut via_multipole);

        for (a, b) in via_local.iter().zip(via_multipole) {
            assert!((a - b).abs() / b < 1e-3);
        }
    }

    #[test]
    fn test_l2l_exact_for_linear_field() {
        let kernel = LaplaceKernel::<f64>::new();
        let parent = LaplaceLocal {
            value: 2.0,
            gradient: [1.0, -0.5, 0.25],
        };
        let translation = [0.1, 0.2, -0.1];

        let mut child = LaplaceLocal::default();
        kernel.l2l(&parent, &mut child, &translation);

        // Evaluating the shifted expansion at a point must agree with the
        // parent expansion evaluated at the same point.
        let target = [0.15, 0.25, -0.05];
        let parent_center = [0.0, 0.0, 0.0];
        let child_center = translation;

        let mut via_parent = [0.0];
        kernel.l2p(&target, &mut via_parent, &parent_center, &parent);
        let mut via_child = [0.0];
        kernel.l2p(&target, &mut via_child, &child_center, &child);

        assert!((via_parent[0] - via_child[0]).abs() < 1e-12);
    }

    #[test]
    fn test_p2p_skips_coincident_points() {
        let kernel = LaplaceKernel::<f64>::new();
        let sources = [0.5, 0.5, 0.5, 1.0, 0.0, 0.0];
        let charges = [1.0, 2.0];

        // The first target coincides with the first source.
        let mut results = [0.0];
        kernel.p2p(&sources, &charges, &sources[..3], &mut results);

        let expected = direct_potential(&sources[3..], &charges[1..], &[0.5, 0.5, 0.5]);
        assert!((results[0] - expected).abs() < 1e-12);
        assert!(results[0].is_finite());
    }
}
