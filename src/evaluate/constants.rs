//! Crate wide constants

/// Maximum chunk size to use when processing targets during parallel
/// direct evaluation.
pub const DIRECT_MAX_CHUNK_SIZE: usize = 128;
