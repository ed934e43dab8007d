//! Dual-tree traversal: classifies every ordered box pair as far field,
//! near field, or in need of refinement.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use num::NumCast;

use crate::evaluate::{
    helpers::distance,
    types::{EvalMode, Evaluator},
};
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
    /// Walk all interacting box pairs, writing near-field contributions
    /// into `results` and far-field contributions into the local store
    /// (FMM) or directly into `results` (treecode).
    ///
    /// A FIFO queue of ordered pairs `(sources, targets)` is seeded with
    /// `(root, root)`. Each popped pair is tested against the multipole
    /// acceptance criterion `d·θ > (s1 + s2) / 2`; admissible pairs
    /// dispatch to M2L or M2P depending on the mode, leaf pairs fall back
    /// to one-sided P2P, and the remainder are refined by splitting the
    /// larger box (the target box when the sides tie). Pairs in which
    /// either box owns no bodies are dropped.
    ///
    /// `charges` and `results` must be in tree body order; the upward pass
    /// must have populated the multipole store.
    pub fn traverse(
        &mut self,
        charges: &[K::Charge],
        results: &mut [K::Result],
    ) -> Result<(), FmmError> {
        if charges.len() != self.tree.n_bodies() || results.len() != self.tree.n_bodies() {
            return Err(FmmError::Failed(format!(
                "charge/result counts {}/{} do not match tree body count {}",
                charges.len(),
                results.len(),
                self.tree.n_bodies()
            )));
        }
        if self.multipoles.len() != self.tree.n_nodes() {
            return Err(FmmError::Failed(
                "multipole store not populated, run the upward pass first".to_string(),
            ));
        }

        let half = <T::Scalar as NumCast>::from(0.5).unwrap();
        let mut far_time = Duration::default();
        let mut near_time = Duration::default();

        let mut queue = VecDeque::new();
        queue.push_back((self.tree.root(), self.tree.root()));

        while let Some((b1, b2)) = queue.pop_front() {
            let source_range = self.tree.body_range(&b1);
            let target_range = self.tree.body_range(&b2);
            if source_range.is_empty() || target_range.is_empty() {
                continue;
            }

            let s1 = self.tree.side_length(&b1);
            let s2 = self.tree.side_length(&b2);
            let d = distance(self.tree, &b1, &b2);

            if d * self.theta > (s1 + s2) * half {
                // Far field: sources in b1 act on targets in b2 through
                // b1's multipole expansion.
                let start = Instant::now();
                match self.mode {
                    EvalMode::Fmm => {
                        let c1 = self.tree.center(&b1);
                        let c2 = self.tree.center(&b2);
                        let translation = [c2[0] - c1[0], c2[1] - c1[1], c2[2] - c1[2]];
                        self.kernel.m2l(
                            &self.multipoles[self.tree.index(&b1)],
                            &mut self.locals[self.tree.index(&b2)],
                            &translation,
                        );
                    }
                    EvalMode::Treecode => {
                        let center = self.tree.center(&b1);
                        self.kernel.m2p(
                            &center,
                            &self.multipoles[self.tree.index(&b1)],
                            self.tree.coordinates(&b2),
                            &mut results[target_range],
                        );
                    }
                }
                far_time += start.elapsed();
            } else if self.tree.is_leaf(&b1) && self.tree.is_leaf(&b2) {
                let start = Instant::now();
                self.kernel.p2p(
                    self.tree.coordinates(&b1),
                    &charges[source_range],
                    self.tree.coordinates(&b2),
                    &mut results[target_range],
                );
                near_time += start.elapsed();
            } else if self.tree.is_leaf(&b2) || (!self.tree.is_leaf(&b1) && s1 > s2) {
                for child in self.tree.children(&b1) {
                    queue.push_back((*child, b2));
                }
            } else {
                for child in self.tree.children(&b2) {
                    queue.push_back((b1, *child));
                }
            }
        }

        let far_operator = match self.mode {
            EvalMode::Fmm => OperatorType::M2L,
            EvalMode::Treecode => OperatorType::M2P,
        };
        self.times
            .push(OperatorTime::from_duration(far_operator, far_time));
        self.times
            .push(OperatorTime::from_duration(OperatorType::P2P, near_time));

        Ok(())
    }
}
