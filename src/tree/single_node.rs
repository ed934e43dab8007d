//! Construction of single node octrees.
use std::ops::Range;

use itertools::Itertools;
use num::Float;

use crate::traits::{tree::Tree, types::FmmError};
use crate::tree::{
    constants::{DEEPEST_LEVEL, DEFAULT_NCRIT, NSIBLINGS},
    types::{Domain, Octree},
};

/// Octant of `point` relative to `center`; x occupies the highest bit,
/// z the lowest, upper half-spaces set their bit.
fn octant<T>(point: &[T], center: &[T; 3]) -> usize
where
    T: Float,
{
    let mut octant = 0;
    for axis in 0..3 {
        if point[axis] >= center[axis] {
            octant |= 1 << (2 - axis);
        }
    }
    octant
}

impl<T> Octree<T>
where
    T: Float,
{
    /// Build an octree over `coordinates`, expected flat row-major
    /// `[x_1, y_1, z_1, x_2, ...]`.
    ///
    /// # Arguments
    /// * `coordinates` - Body coordinates in the caller's order.
    /// * `n_crit` - Maximum number of bodies per leaf before subdivision;
    ///   defaults to [`DEFAULT_NCRIT`].
    /// * `domain` - Optional explicit domain; computed from the data if `None`.
    pub fn new(
        coordinates: &[T],
        n_crit: Option<usize>,
        domain: Option<Domain<T>>,
    ) -> Result<Self, FmmError> {
        if coordinates.is_empty() {
            return Err(FmmError::Failed("no coordinates provided".to_string()));
        }
        if coordinates.len() % 3 != 0 {
            return Err(FmmError::InvalidParameter(format!(
                "coordinate slice length {} is not a multiple of 3",
                coordinates.len()
            )));
        }
        let n_crit = n_crit.unwrap_or(DEFAULT_NCRIT);
        if n_crit == 0 {
            return Err(FmmError::InvalidParameter(
                "n_crit must be positive".to_string(),
            ));
        }

        let n_bodies = coordinates.len() / 3;
        let domain = domain.unwrap_or_else(|| Domain::from_points(coordinates));
        let half = T::from(0.5).unwrap();

        let mut coords = coordinates.to_vec();
        let mut global_indices = (0..n_bodies).collect_vec();

        let mut centers = vec![domain.center()];
        let mut side_lengths = vec![domain.side_length];
        let mut parents = vec![0usize];
        let mut child_offsets = vec![(0usize, 0usize)];
        let mut body_offsets = vec![(0usize, n_bodies)];
        let mut level_offsets = vec![0usize, 1];

        let mut level = 0u64;
        let mut level_range: Range<usize> = 0..1;

        while level < DEEPEST_LEVEL {
            for b in level_range.clone() {
                let (lo, hi) = body_offsets[b];
                if hi - lo <= n_crit {
                    continue;
                }

                let center = centers[b];
                let child_side = side_lengths[b] * half;
                let quarter = child_side * half;

                // Octant histogram over the box's body slice.
                let mut starts = [0usize; NSIBLINGS + 1];
                for i in lo..hi {
                    starts[octant(&coords[3 * i..3 * i + 3], &center) + 1] += 1;
                }
                for o in 0..NSIBLINGS {
                    starts[o + 1] += starts[o];
                }

                // Stable reorder of the slice into octant order.
                let mut sorted_coords = vec![T::zero(); 3 * (hi - lo)];
                let mut sorted_indices = vec![0usize; hi - lo];
                let mut cursors = starts;
                for i in lo..hi {
                    let o = octant(&coords[3 * i..3 * i + 3], &center);
                    let dst = cursors[o];
                    cursors[o] += 1;
                    sorted_coords[3 * dst..3 * dst + 3].copy_from_slice(&coords[3 * i..3 * i + 3]);
                    sorted_indices[dst] = global_indices[i];
                }
                coords[3 * lo..3 * hi].copy_from_slice(&sorted_coords);
                global_indices[lo..hi].copy_from_slice(&sorted_indices);

                let first_child = centers.len();
                child_offsets[b] = (first_child, first_child + NSIBLINGS);

                for o in 0..NSIBLINGS {
                    let mut child_center = center;
                    for axis in 0..3 {
                        if o & (1 << (2 - axis)) != 0 {
                            child_center[axis] = child_center[axis] + quarter;
                        } else {
                            child_center[axis] = child_center[axis] - quarter;
                        }
                    }
                    centers.push(child_center);
                    side_lengths.push(child_side);
                    parents.push(b);
                    child_offsets.push((0, 0));
                    body_offsets.push((lo + starts[o], lo + starts[o + 1]));
                }
            }

            if centers.len() == level_range.end {
                break;
            }
            level += 1;
            level_range = level_range.end..centers.len();
            level_offsets.push(centers.len());
        }

        let leaves = (0..centers.len())
            .filter(|&b| child_offsets[b].0 == child_offsets[b].1)
            .collect_vec();
        let nodes = (0..centers.len()).collect_vec();

        Ok(Self {
            domain,
            depth: level,
            nodes,
            level_offsets,
            leaves,
            parents,
            child_offsets,
            centers,
            side_lengths,
            body_offsets,
            coordinates: coords,
            global_indices,
        })
    }

    /// The computational domain the tree was built over.
    pub fn domain(&self) -> &Domain<T> {
        &self.domain
    }

    /// Original input index of each sorted body; position `i` of the sorted
    /// charge and result arrays corresponds to the caller's body
    /// `global_indices()[i]`.
    pub fn global_indices(&self) -> &[usize] {
        &self.global_indices
    }
}

impl<T> Tree for Octree<T>
where
    T: Float,
{
    type Scalar = T;
    type Node = usize;

    fn n_nodes(&self) -> usize {
        self.centers.len()
    }

    fn n_bodies(&self) -> usize {
        self.global_indices.len()
    }

    fn depth(&self) -> u64 {
        self.depth
    }

    fn root(&self) -> usize {
        0
    }

    fn nodes(&self, level: u64) -> &[usize] {
        if level > self.depth {
            return &[];
        }
        let level = level as usize;
        &self.nodes[self.level_offsets[level]..self.level_offsets[level + 1]]
    }

    fn leaves(&self) -> &[usize] {
        &self.leaves
    }

    fn index(&self, node: &usize) -> usize {
        *node
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        if *node == 0 {
            None
        } else {
            Some(self.parents[*node])
        }
    }

    fn children(&self, node: &usize) -> &[usize] {
        let (start, end) = self.child_offsets[*node];
        &self.nodes[start..end]
    }

    fn is_leaf(&self, node: &usize) -> bool {
        let (start, end) = self.child_offsets[*node];
        start == end
    }

    fn center(&self, node: &usize) -> [T; 3] {
        self.centers[*node]
    }

    fn side_length(&self, node: &usize) -> T {
        self.side_lengths[*node]
    }

    fn body_range(&self, node: &usize) -> Range<usize> {
        let (start, end) = self.body_offsets[*node];
        start..end
    }

    fn coordinates(&self, node: &usize) -> &[T] {
        let (start, end) = self.body_offsets[*node];
        &self.coordinates[3 * start..3 * end]
    }

    fn all_coordinates(&self) -> &[T] {
        &self.coordinates
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::helpers::points_fixture;

    fn corner_points() -> Vec<f64> {
        let mut points = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    points.extend([x, y, z]);
                }
            }
        }
        points
    }

    #[test]
    fn test_corner_points_single_split() {
        let points = corner_points();
        let tree = Octree::new(&points, Some(1), None).unwrap();

        assert_eq!(tree.n_nodes(), 9);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaves().len(), 8);
        assert_eq!(tree.nodes(0), &[0]);
        assert_eq!(tree.nodes(1).len(), 8);

        // One body per leaf, ranges partition [0, 8).
        let mut seen = vec![false; 8];
        for leaf in tree.leaves() {
            let range = tree.body_range(leaf);
            assert_eq!(range.len(), 1);
            assert!(!seen[range.start]);
            seen[range.start] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_structural_invariants() {
        let n_points = 1000;
        let n_crit = 64;
        let points = points_fixture::<f64>(n_points, None, None, Some(0));
        let tree = Octree::new(&points, Some(n_crit), None).unwrap();

        assert_eq!(tree.n_bodies(), n_points);

        // Levels partition the box ids in order.
        let mut next = 0;
        for level in 0..=tree.depth() {
            for node in tree.nodes(level) {
                assert_eq!(tree.index(node), next);
                next += 1;
            }
        }
        assert_eq!(next, tree.n_nodes());

        for level in 0..=tree.depth() {
            for node in tree.nodes(level) {
                let range = tree.body_range(node);

                if tree.is_leaf(node) {
                    assert!(range.len() <= n_crit);
                } else {
                    // Children partition the parent's body range and ids
                    // are consecutive.
                    let children = tree.children(node);
                    assert_eq!(children.len(), NSIBLINGS);
                    let mut cursor = range.start;
                    for (i, child) in children.iter().enumerate() {
                        assert_eq!(tree.index(child), tree.index(&children[0]) + i);
                        assert_eq!(tree.parent(child), Some(*node));
                        let child_range = tree.body_range(child);
                        assert_eq!(child_range.start, cursor);
                        cursor = child_range.end;
                        assert_eq!(
                            tree.side_length(child),
                            tree.side_length(node) / 2.,
                        );
                    }
                    assert_eq!(cursor, range.end);
                }

                // Geometric containment of the box's bodies.
                let center = tree.center(node);
                let half_side = tree.side_length(node) / 2.;
                for point in tree.coordinates(node).chunks_exact(3) {
                    for axis in 0..3 {
                        assert!((point[axis] - center[axis]).abs() <= half_side + 1e-12);
                    }
                }
            }
        }

        // The sorted coordinates are a permutation of the input.
        for (sorted, &original) in tree.global_indices().iter().enumerate() {
            for axis in 0..3 {
                assert_eq!(
                    tree.all_coordinates()[3 * sorted + axis],
                    points[3 * original + axis]
                );
            }
        }
        let mut indices = tree.global_indices().to_vec();
        indices.sort_unstable();
        assert!(indices.iter().enumerate().all(|(i, &j)| i == j));
    }

    #[test]
    fn test_empty_leaves() {
        // Two tight clusters in opposite corners leave most octants empty.
        let mut points = Vec::new();
        for i in 0..8 {
            let offset = 0.01 * i as f64;
            points.extend([0.05 + offset, 0.05, 0.05]);
            points.extend([0.95 - offset, 0.95, 0.95]);
        }
        let tree = Octree::new(&points, Some(4), None).unwrap();

        let empty = tree
            .leaves()
            .iter()
            .filter(|leaf| tree.body_range(leaf).is_empty())
            .count();
        assert!(empty > 0);

        let occupied: usize = tree
            .leaves()
            .iter()
            .map(|leaf| tree.body_range(leaf).len())
            .sum();
        assert_eq!(occupied, 16);
    }

    #[test]
    fn test_coincident_points_terminate() {
        let points = [0.3, 0.4, 0.5].repeat(64);
        let tree = Octree::new(&points, Some(8), None).unwrap();

        assert_eq!(tree.depth(), DEEPEST_LEVEL);

        // The occupied chain bottoms out in a single overfull leaf.
        let deepest = tree
            .leaves()
            .iter()
            .find(|leaf| !tree.body_range(leaf).is_empty())
            .unwrap();
        assert_eq!(tree.body_range(deepest).len(), 64);
    }

    #[test]
    fn test_degenerate_domain() {
        let points = [0.5, 0.5, 0.5, 0.5, 0.5, 0.5];
        let tree = Octree::new(&points, Some(8), None).unwrap();
        assert_eq!(tree.domain().side_length, 1.0);
        assert_eq!(tree.n_nodes(), 1);
    }

    #[test]
    fn test_invalid_input() {
        assert!(Octree::<f64>::new(&[], Some(8), None).is_err());
        assert!(Octree::new(&[0.1, 0.2], Some(8), None).is_err());
        assert!(Octree::new(&[0.1, 0.2, 0.3], Some(0), None).is_err());
    }
}
