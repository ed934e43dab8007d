//! # Dual-tree FMM and treecode evaluators
//!
//! Sub-quadratic evaluation of pairwise kernel sums over N bodies in three
//! dimensions, based on the dual-tree traversal formulation of hierarchical
//! expansion methods \[1\]\[2\].
//!
//! The crate is organised around a single evaluator that is polymorphic over
//! two collaborators:
//! * a spatial index satisfying the [`traits::tree::Tree`] contract, and
//! * an expansion kernel satisfying the [`traits::kernel::Kernel`] contract,
//!   supplying the P2M, M2M, M2L, M2P, L2L, L2P and P2P translation
//!   operators.
//!
//! Two algorithmic modes are supported, selected at construction: classical
//! fast multipole (M2L + L2L + L2P) and treecode (M2P only). A reference
//! octree and two kernels (Laplace, unit) are included.
//!
//! ## References
//! \[1\] Greengard, L., & Rokhlin, V. (1987). A fast algorithm for particle
//! simulations. Journal of Computational Physics, 73(2), 325-348.
//!
//! \[2\] Yokota, R., & Barba, L. A. (2012). A tuned and scalable fast
//! multipole method as a preeminent algorithm for exascale systems.
//! The International Journal of High Performance Computing Applications,
//! 26(4), 337-346.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod evaluate;
pub mod kernels;
pub mod traits;
pub mod tree;

// Public API
#[doc(inline)]
pub use evaluate::eval::evaluate;
#[doc(inline)]
pub use evaluate::direct::evaluate_direct;
#[doc(inline)]
pub use evaluate::types::{EvalMode, EvalOptions, Evaluator};
#[doc(inline)]
pub use traits::kernel::Kernel;
#[doc(inline)]
pub use traits::tree::Tree;
#[doc(inline)]
pub use traits::types::FmmError;
#[doc(inline)]
pub use tree::types::{Domain, Octree};
