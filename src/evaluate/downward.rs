//! Downward sweep: L2L level by level towards the leaves, then L2P.
use std::mem;
use std::time::Instant;

use crate::evaluate::types::{EvalMode, Evaluator};
use crate::traits::{
    kernel::Kernel,
    tree::Tree,
    types::{FmmError, OperatorTime, OperatorType},
};

impl<'a, T, K> Evaluator<'a, T, K>
where
    T: Tree,
    K: Kernel<Scalar = T::Scalar>,
{
    /// Propagate accumulated local expansions to the leaves and evaluate
    /// them at the target bodies, accumulating into `results` (in tree
    /// body order).
    ///
    /// Levels are processed shallowest first: every box below level 1
    /// pulls its parent's local expansion before its own is read, so a
    /// leaf's expansion contains all ancestor contributions by the time
    /// L2P runs. In treecode mode this pass is a no-op, since M2P already
    /// wrote the far field during traversal.
    pub fn downward(&mut self, results: &mut [K::Result]) -> Result<(), FmmError> {
        if self.mode == EvalMode::Treecode {
            return Ok(());
        }

        if results.len() != self.tree.n_bodies() {
            return Err(FmmError::Failed(format!(
                "result count {} does not match tree body count {}",
                results.len(),
                self.tree.n_bodies()
            )));
        }
        if self.locals.len() != self.tree.n_nodes() {
            return Err(FmmError::Failed(
                "local store not populated, run the upward pass and traversal first".to_string(),
            ));
        }

        for level in 2..=self.tree.depth() {
            let start = Instant::now();
            for node in self.tree.nodes(level) {
                if self.tree.body_range(node).is_empty() {
                    continue;
                }
                let Some(parent) = self.tree.parent(node) else {
                    continue;
                };

                let center = self.tree.center(node);
                let parent_center = self.tree.center(&parent);
                let translation = [
                    center[0] - parent_center[0],
                    center[1] - parent_center[1],
                    center[2] - parent_center[2],
                ];

                // Taken out of the store so the parent can be read while
                // the child is accumulated.
                let idx = self.tree.index(node);
                let mut local = mem::take(&mut self.locals[idx]);
                self.kernel.l2l(
                    &self.locals[self.tree.index(&parent)],
                    &mut local,
                    &translation,
                );
                self.locals[idx] = local;
            }
            self.times
                .push(OperatorTime::from_instant(OperatorType::L2L(level), start));
        }

        let start = Instant::now();
        for leaf in self.tree.leaves() {
            let range = self.tree.body_range(leaf);
            if range.is_empty() {
                continue;
            }

            let center = self.tree.center(leaf);
            self.kernel.l2p(
                self.tree.coordinates(leaf),
                &mut results[range],
                &center,
                &self.locals[self.tree.index(leaf)],
            );
        }
        self.times
            .push(OperatorTime::from_instant(OperatorType::L2P, start));

        Ok(())
    }
}
