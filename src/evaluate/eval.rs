//! Evaluation entry points running the three passes in order.
use crate::evaluate::types::{EvalOptions, Evaluator};
use crate::traits::{kernel::Kernel, tree::Tree, types::FmmError};

impl<'a, T, K> Evaluator<'a, T, K>
where
    T: Tree,
    K: Kernel<Scalar = T::Scalar>,
{
    /// Run the upward pass, the dual-tree traversal, and (in FMM mode) the
    /// downward pass, accumulating the pairwise kernel sum into `results`.
    ///
    /// `charges` and `results` must be in tree body order and match the
    /// tree's body count; `results` is zero-initialised by the caller. The
    /// tree must not be mutated for the duration of the call (the borrow
    /// held by the evaluator enforces this).
    pub fn evaluate(
        &mut self,
        charges: &[K::Charge],
        results: &mut [K::Result],
    ) -> Result<(), FmmError> {
        let n_bodies = self.tree.n_bodies();
        if charges.len() != n_bodies || results.len() != n_bodies {
            return Err(FmmError::Failed(format!(
                "charge/result counts {}/{} do not match tree body count {}",
                charges.len(),
                results.len(),
                n_bodies
            )));
        }

        self.upward(charges)?;
        self.traverse(charges, results)?;
        self.downward(results)?;

        Ok(())
    }
}

/// Evaluate the pairwise kernel sum over `tree` in a single call: construct
/// an evaluator from `options` and run all passes.
///
/// Pre-conditions as for [`Evaluator::evaluate`].
pub fn evaluate<T, K>(
    tree: &T,
    kernel: &K,
    options: EvalOptions,
    charges: &[K::Charge],
    results: &mut [K::Result],
) -> Result<(), FmmError>
where
    T: Tree,
    K: Kernel<Scalar = T::Scalar>,
{
    let mut evaluator = Evaluator::new(tree, kernel, options)?;
    evaluator.evaluate(charges, results)
}
