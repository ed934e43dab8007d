//! Tree traits
use std::ops::Range;

use num::Float;

/// Interface for hierarchical spatial partitions consumed by the evaluator.
///
/// Boxes are addressed by an opaque, copyable node handle; every geometric
/// and structural query goes through the tree so that implementations are
/// free to choose their own node representation. The contract the evaluator
/// relies on:
///
/// * Box ids returned by [`Tree::index`] are unique and dense in
///   `[0, n_nodes())`; the evaluator uses them to address its flat
///   expansion stores.
/// * Bodies are stored so that every box (leaf or internal) owns a
///   contiguous range of body indices, returned by [`Tree::body_range`].
///   The range of an internal box covers exactly the union of its
///   children's ranges. This licenses slicing the charge and result arrays
///   per box.
/// * [`Tree::nodes`] iterates boxes level by level; [`Tree::depth`] is the
///   deepest level, with the root at level 0.
pub trait Tree {
    /// Scalar type of coordinate data
    type Scalar: Float;

    /// A handle addressing one box of the partition
    type Node: Copy + PartialEq;

    /// Total number of boxes
    fn n_nodes(&self) -> usize;

    /// Total number of bodies
    fn n_bodies(&self) -> usize;

    /// Deepest level of the tree; the root is at level 0
    fn depth(&self) -> u64;

    /// The root box
    fn root(&self) -> Self::Node;

    /// Boxes at a given level; empty for levels beyond [`Tree::depth`]
    fn nodes(&self, level: u64) -> &[Self::Node];

    /// All leaf boxes, over all levels
    fn leaves(&self) -> &[Self::Node];

    /// Box id, unique and dense in `[0, n_nodes())`
    fn index(&self, node: &Self::Node) -> usize;

    /// Parent box; `None` for the root
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Children of a box; empty for leaves
    fn children(&self, node: &Self::Node) -> &[Self::Node];

    /// Whether a box has no children
    fn is_leaf(&self, node: &Self::Node) -> bool;

    /// Geometric center of a box
    fn center(&self, node: &Self::Node) -> [Self::Scalar; 3];

    /// Side length of a box
    fn side_length(&self, node: &Self::Node) -> Self::Scalar;

    /// Contiguous range of body indices owned by a box's subtree
    fn body_range(&self, node: &Self::Node) -> Range<usize>;

    /// Coordinates of the bodies owned by a box, flat row-major
    /// `[x_1, y_1, z_1, x_2, ...]`, aligned with [`Tree::body_range`]
    fn coordinates(&self, node: &Self::Node) -> &[Self::Scalar];

    /// Coordinates of all bodies in body-index order, flat row-major
    fn all_coordinates(&self) -> &[Self::Scalar];
}
