//! Upward sweep: P2M at the leaves, then M2M level by level towards the
//! root.
use std::mem;
use std::time::Instant;

use crate::evaluate::types::Evaluator;
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
    /// Populate the multipole expansion of every box from `charges`,
    /// which must be in tree body order. Local expansions are initialised
    /// but left untouched.
    ///
    /// Leaves are processed first; internal boxes then gather their
    /// children level by level, deepest first, so that a child's expansion
    /// is always complete before its parent reads it. Boxes without bodies
    /// are initialised and skipped.
    pub fn upward(&mut self, charges: &[K::Charge]) -> Result<(), FmmError> {
        if charges.len() != self.tree.n_bodies() {
            return Err(FmmError::Failed(format!(
                "charge count {} does not match tree body count {}",
                charges.len(),
                self.tree.n_bodies()
            )));
        }

        let n_nodes = self.tree.n_nodes();
        self.times.clear();
        self.multipoles.clear();
        self.multipoles
            .extend((0..n_nodes).map(|_| K::Multipole::default()));
        self.locals.clear();
        self.locals.extend((0..n_nodes).map(|_| K::Local::default()));

        let start = Instant::now();
        for leaf in self.tree.leaves() {
            let idx = self.tree.index(leaf);
            let side_length = self.tree.side_length(leaf);
            self.kernel
                .init_multipole(&mut self.multipoles[idx], side_length);
            self.kernel.init_local(&mut self.locals[idx], side_length);

            let range = self.tree.body_range(leaf);
            if range.is_empty() {
                continue;
            }

            let center = self.tree.center(leaf);
            self.kernel.p2m(
                self.tree.coordinates(leaf),
                &charges[range],
                &center,
                &mut self.multipoles[idx],
            );
        }
        self.times
            .push(OperatorTime::from_instant(OperatorType::P2M, start));

        for level in (0..self.tree.depth()).rev() {
            let start = Instant::now();
            for node in self.tree.nodes(level) {
                if self.tree.is_leaf(node) {
                    continue;
                }

                let idx = self.tree.index(node);
                let side_length = self.tree.side_length(node);
                let center = self.tree.center(node);

                // Taken out of the store so children can be read while the
                // parent is accumulated.
                let mut multipole = mem::take(&mut self.multipoles[idx]);
                self.kernel.init_multipole(&mut multipole, side_length);
                self.kernel.init_local(&mut self.locals[idx], side_length);

                for child in self.tree.children(node) {
                    if self.tree.body_range(child).is_empty() {
                        continue;
                    }
                    let child_center = self.tree.center(child);
                    let translation = [
                        center[0] - child_center[0],
                        center[1] - child_center[1],
                        center[2] - child_center[2],
                    ];
                    self.kernel.m2m(
                        &self.multipoles[self.tree.index(child)],
                        &mut multipole,
                        &translation,
                    );
                }
                self.multipoles[idx] = multipole;
            }
            self.times
                .push(OperatorTime::from_instant(OperatorType::M2M(level), start));
        }

        Ok(())
    }
}
