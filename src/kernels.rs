//! Expansion kernels implementing the evaluator's kernel contract.
pub mod laplace;
pub mod unit;
