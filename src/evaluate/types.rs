//! Data structures for the dual-tree evaluator.
use num::NumCast;

use crate::traits::{
    kernel::Kernel,
    tree::Tree,
    types::{FmmError, OperatorTime},
};

/// Selects the action taken on admissible box pairs, and with it the
/// asymptotic character of the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Classical fast multipole method: admissible pairs accumulate into
    /// local expansions (M2L), which are propagated down the tree (L2L)
    /// and evaluated at the leaves (L2P).
    #[default]
    Fmm,

    /// Treecode: admissible source multipoles are evaluated directly at
    /// the target bodies (M2P); no local expansions are formed and the
    /// downward pass is a no-op.
    Treecode,
}

/// Caller-facing evaluator configuration.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Algorithmic mode.
    pub mode: EvalMode,

    /// Multipole acceptance threshold in `(0, 1]`. A pair of boxes with
    /// side lengths `s1`, `s2` at center distance `d` is admissible iff
    /// `d·theta > (s1 + s2) / 2`. Smaller values refine further and are
    /// more accurate but slower; typical values lie in `0.4..0.7`.
    pub theta: f64,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            mode: EvalMode::Fmm,
            theta: 0.5,
        }
    }
}

/// Orchestrates one evaluation over a tree and a kernel.
///
/// The evaluator borrows its collaborators and the caller's charge and
/// result buffers for the duration of an evaluation, and exclusively owns
/// the per-box multipole and local expansion stores, which are reallocated
/// at the start of every upward pass.
pub struct Evaluator<'a, T, K>
where
    T: Tree,
    K: Kernel<Scalar = T::Scalar>,
{
    /// The spatial partition.
    pub(crate) tree: &'a T,

    /// The expansion kernel.
    pub(crate) kernel: &'a K,

    /// Algorithmic mode.
    pub(crate) mode: EvalMode,

    /// Multipole acceptance threshold.
    pub(crate) theta: T::Scalar,

    /// Multipole expansions corresponding to box ids in the tree.
    pub(crate) multipoles: Vec<K::Multipole>,

    /// Local expansions corresponding to box ids in the tree.
    pub(crate) locals: Vec<K::Local>,

    /// Wall-clock times of the operator stages of the last evaluation.
    pub(crate) times: Vec<OperatorTime>,
}

impl<'a, T, K> Evaluator<'a, T, K>
where
    T: Tree,
    K: Kernel<Scalar = T::Scalar>,
{
    /// Construct an evaluator over `tree` and `kernel`.
    ///
    /// Fails if `options.theta` lies outside `(0, 1]` or is not
    /// representable in the tree's scalar type.
    pub fn new(tree: &'a T, kernel: &'a K, options: EvalOptions) -> Result<Self, FmmError> {
        if !(options.theta > 0.0 && options.theta <= 1.0) {
            return Err(FmmError::InvalidParameter(format!(
                "theta must lie in (0, 1], got {}",
                options.theta
            )));
        }

        let theta = <T::Scalar as NumCast>::from(options.theta).ok_or_else(|| {
            FmmError::InvalidParameter(
                "theta is not representable in the tree's scalar type".to_string(),
            )
        })?;

        Ok(Self {
            tree,
            kernel,
            mode: options.mode,
            theta,
            multipoles: Vec::new(),
            locals: Vec::new(),
            times: Vec::new(),
        })
    }

    /// Algorithmic mode of this evaluator.
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Multipole acceptance threshold of this evaluator.
    pub fn theta(&self) -> T::Scalar {
        self.theta
    }

    /// The multipole expansion of a box, valid after the upward pass.
    pub fn multipole(&self, node: &T::Node) -> Option<&K::Multipole> {
        self.multipoles.get(self.tree.index(node))
    }

    /// The local expansion of a box, valid after traversal.
    pub fn local(&self, node: &T::Node) -> Option<&K::Local> {
        self.locals.get(self.tree.index(node))
    }

    /// Wall-clock times of the operator stages of the last evaluation.
    pub fn operator_times(&self) -> &[OperatorTime] {
        &self.times
    }
}
