//! Data structures for single node octrees.
use num::Float;

/// Represents the cubic computational domain containing all point data,
/// characterised by its lower left corner and side length.
#[derive(Debug, Clone, Copy, Default)]
pub struct Domain<T>
where
    T: Float,
{
    /// The lower left corner of the domain, minimum of x, y, z values.
    pub origin: [T; 3],

    /// The extent of the domain along each Cartesian axis.
    pub side_length: T,
}

impl<T> Domain<T>
where
    T: Float,
{
    /// Compute the tightest cubic domain containing `coordinates`, expected
    /// flat row-major `[x_1, y_1, z_1, x_2, ...]`. Degenerate clouds whose
    /// extent vanishes along every axis receive a unit side length.
    pub fn from_points(coordinates: &[T]) -> Self {
        let mut min = [T::max_value(); 3];
        let mut max = [T::min_value(); 3];

        for point in coordinates.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(point[axis]);
                max[axis] = max[axis].max(point[axis]);
            }
        }

        let mut side_length = T::zero();
        for axis in 0..3 {
            side_length = side_length.max(max[axis] - min[axis]);
        }

        if !(side_length > T::zero()) {
            side_length = T::one();
        }

        Self {
            origin: min,
            side_length,
        }
    }

    /// Geometric center of the domain.
    pub fn center(&self) -> [T; 3] {
        let half = T::from(0.5).unwrap();
        [
            self.origin[0] + self.side_length * half,
            self.origin[1] + self.side_length * half,
            self.origin[2] + self.side_length * half,
        ]
    }
}

/// A single node octree over three dimensional point data.
///
/// Boxes are numbered breadth-first, so ids are dense in `[0, n_nodes())`,
/// level-contiguous, and the eight children of any box occupy consecutive
/// ids. Bodies are reordered during construction so that every box owns a
/// contiguous range of body indices; [`Octree::global_indices`] maps each
/// sorted position back to the caller's original input index.
///
/// A box is subdivided into its eight octant children while it holds more
/// than `n_crit` bodies and lies above [`crate::tree::constants::DEEPEST_LEVEL`].
/// All eight children are materialised on a split, so empty leaves occur.
#[derive(Debug, Clone)]
pub struct Octree<T>
where
    T: Float,
{
    /// The computational domain.
    pub(crate) domain: Domain<T>,

    /// Deepest occupied level.
    pub(crate) depth: u64,

    /// Box ids in breadth-first order; backs the per-level and per-child
    /// node slices.
    pub(crate) nodes: Vec<usize>,

    /// Start offsets of each level into `nodes`, length `depth + 2`.
    pub(crate) level_offsets: Vec<usize>,

    /// Ids of all leaf boxes.
    pub(crate) leaves: Vec<usize>,

    /// Parent id per box; the root maps to itself.
    pub(crate) parents: Vec<usize>,

    /// Child id range per box, `(start, end)`; equal values for leaves.
    pub(crate) child_offsets: Vec<(usize, usize)>,

    /// Geometric center per box.
    pub(crate) centers: Vec<[T; 3]>,

    /// Side length per box.
    pub(crate) side_lengths: Vec<T>,

    /// Body index range per box, `(start, end)`, covering the box subtree.
    pub(crate) body_offsets: Vec<(usize, usize)>,

    /// Body coordinates in sorted order, flat row-major.
    pub(crate) coordinates: Vec<T>,

    /// Original input index of each sorted body.
    pub(crate) global_indices: Vec<usize>,
}
