//! Crate wide constants

/// Number of children of a box in an octree.
pub const NSIBLINGS: usize = 8;

/// Deepest level a box may occupy; splitting stops here regardless of
/// occupancy, which bounds construction on coincident point clouds.
pub const DEEPEST_LEVEL: u64 = 16;

/// Default value chosen for maximum number of particles per leaf.
pub const DEFAULT_NCRIT: usize = 150;
