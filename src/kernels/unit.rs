//! Constant kernel, `K(x, y) = 1`.
//!
//! Every translation operator is exact, so both evaluator modes reproduce
//! the direct sum to rounding: the potential at every target is the global
//! charge sum. Useful for validating traversal coverage independently of
//! expansion accuracy.
use std::marker::PhantomData;

use num::Float;

use crate::traits::kernel::Kernel;

/// Expansion of the constant kernel: a running charge sum. Serves as both
/// the multipole and the local representation.
#[derive(Debug, Clone, Copy)]
pub struct UnitExpansion<T> {
    /// Accumulated charge.
    pub total: T,
}

impl<T> Default for UnitExpansion<T>
where
    T: Float,
{
    fn default() -> Self {
        Self { total: T::zero() }
    }
}

/// The constant kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitKernel<T> {
    scalar: PhantomData<T>,
}

impl<T> UnitKernel<T> {
    /// Constructor
    pub fn new() -> Self {
        Self {
            scalar: PhantomData,
        }
    }
}

impl<T> Kernel for UnitKernel<T>
where
    T: Float + Send + Sync,
{
    type Scalar = T;
    type Charge = T;
    type Result = T;
    type Multipole = UnitExpansion<T>;
    type Local = UnitExpansion<T>;

    fn init_multipole(&self, multipole: &mut Self::Multipole, _side_length: T) {
        *multipole = Self::Multipole::default();
    }

    fn init_local(&self, local: &mut Self::Local, _side_length: T) {
        *local = Self::Local::default();
    }

    fn p2m(&self, _points: &[T], charges: &[T], _center: &[T; 3], multipole: &mut Self::Multipole) {
        for charge in charges {
            multipole.total = multipole.total + *charge;
        }
    }

    fn m2m(&self, child: &Self::Multipole, parent: &mut Self::Multipole, _translation: &[T; 3]) {
        parent.total = parent.total + child.total;
    }

    fn m2l(&self, source: &Self::Multipole, target: &mut Self::Local, _translation: &[T; 3]) {
        target.total = target.total + source.total;
    }

    fn m2p(&self, _center: &[T; 3], multipole: &Self::Multipole, _targets: &[T], results: &mut [T]) {
        for result in results.iter_mut() {
            *result = *result + multipole.total;
        }
    }

    fn l2l(&self, parent: &Self::Local, child: &mut Self::Local, _translation: &[T; 3]) {
        child.total = child.total + parent.total;
    }

    fn l2p(&self, _targets: &[T], results: &mut [T], _center: &[T; 3], local: &Self::Local) {
        for result in results.iter_mut() {
            *result = *result + local.total;
        }
    }

    fn p2p(&self, _sources: &[T], charges: &[T], _targets: &[T], results: &mut [T]) {
        let mut total = T::zero();
        for charge in charges {
            total = total + *charge;
        }
        for result in results.iter_mut() {
            *result = *result + total;
        }
    }
}
