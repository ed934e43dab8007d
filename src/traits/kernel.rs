//! Kernel traits
use num::Float;

/// Interface for expansion kernels consumed by the evaluator.
///
/// A kernel supplies the translation operators between points (P), multipole
/// expansions (M) and local expansions (L). Point data is passed as flat
/// row-major slices `[x_1, y_1, z_1, x_2, ...]`; charge and result slices
/// are aligned with the point slices element-wise. Every operator
/// *accumulates* into its output argument, and none of them fail: numerical
/// overflow propagates through results as IEEE-754 infinities or NaNs.
///
/// Expansions are initialised per box via [`Kernel::init_multipole`] and
/// [`Kernel::init_local`] before any translation touches them; the box side
/// length is provided for kernels whose representation is scaled per level.
pub trait Kernel: Sync {
    /// Scalar type of coordinate data
    type Scalar: Float;

    /// Type of the source strengths
    type Charge;

    /// Type of the accumulated target values
    type Result;

    /// Multipole expansion of the sources inside a box, about its center
    type Multipole: Default;

    /// Local expansion of the field inside a box due to distant sources,
    /// about its center
    type Local: Default;

    /// Initialise a multipole expansion for a box of the given side length
    fn init_multipole(&self, multipole: &mut Self::Multipole, side_length: Self::Scalar);

    /// Initialise a local expansion for a box of the given side length
    fn init_local(&self, local: &mut Self::Local, side_length: Self::Scalar);

    /// Accumulate the expansion of `charges` at `points` about `center`
    /// into `multipole`
    fn p2m(
        &self,
        points: &[Self::Scalar],
        charges: &[Self::Charge],
        center: &[Self::Scalar; 3],
        multipole: &mut Self::Multipole,
    );

    /// Shift a child multipole by `translation` and accumulate it into its
    /// parent; `translation` points from the child center to the parent
    /// center
    fn m2m(
        &self,
        child: &Self::Multipole,
        parent: &mut Self::Multipole,
        translation: &[Self::Scalar; 3],
    );

    /// Convert a source multipole into a target local expansion across
    /// `translation`, the vector from the source center to the target
    /// center
    fn m2l(
        &self,
        source: &Self::Multipole,
        target: &mut Self::Local,
        translation: &[Self::Scalar; 3],
    );

    /// Evaluate a multipole about `center` directly at `targets`,
    /// accumulating into `results`
    fn m2p(
        &self,
        center: &[Self::Scalar; 3],
        multipole: &Self::Multipole,
        targets: &[Self::Scalar],
        results: &mut [Self::Result],
    );

    /// Shift a parent local by `translation` and accumulate it into a
    /// child; `translation` points from the parent center to the child
    /// center
    fn l2l(&self, parent: &Self::Local, child: &mut Self::Local, translation: &[Self::Scalar; 3]);

    /// Evaluate a local expansion about `center` at `targets`, accumulating
    /// into `results`
    fn l2p(
        &self,
        targets: &[Self::Scalar],
        results: &mut [Self::Result],
        center: &[Self::Scalar; 3],
        local: &Self::Local,
    );

    /// Direct pairwise summation, one-sided: accumulates the contribution
    /// of every source onto every target, writing targets only
    fn p2p(
        &self,
        sources: &[Self::Scalar],
        charges: &[Self::Charge],
        targets: &[Self::Scalar],
        results: &mut [Self::Result],
    );
}
