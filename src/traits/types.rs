//! Utility types for trait definitions.
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Type to handle FMM related errors
#[derive(Debug)]
pub enum FmmError {
    /// Failure to run some business logic
    Failed(String),

    /// A caller-supplied parameter violates its documented contract
    InvalidParameter(String),
}

impl fmt::Display for FmmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmmError::Failed(e) => write!(f, "Failed: {}", e),
            FmmError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
        }
    }
}

impl std::error::Error for FmmError {}

/// Enumeration of operator types for timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorType {
    /// particle to multipole
    P2M,

    /// multipole to multipole (level)
    M2M(u64),

    /// multipole to local
    M2L,

    /// multipole to particle
    M2P,

    /// local to local (level)
    L2L(u64),

    /// local to particle
    L2P,

    /// particle to particle
    P2P,
}

/// Wall-clock time spent in an operator over one evaluation
#[derive(Debug, Clone, Copy)]
pub struct OperatorTime {
    /// Operator name
    pub operator: OperatorType,

    /// Time in milliseconds
    pub time: u64,
}

impl OperatorTime {
    /// Constructor
    pub fn new(operator: OperatorType, time: u64) -> Self {
        Self { operator, time }
    }

    /// Constructor from instant
    pub fn from_instant(operator: OperatorType, time: Instant) -> Self {
        let time = time.elapsed().as_millis() as u64;
        Self { operator, time }
    }

    /// Constructor from duration
    pub fn from_duration(operator: OperatorType, time: Duration) -> Self {
        Self {
            operator,
            time: time.as_millis() as u64,
        }
    }
}

impl fmt::Display for OperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorType::P2M => write!(f, "P2M"),
            OperatorType::M2M(level) => write!(f, "M2M({})", level),
            OperatorType::M2L => write!(f, "M2L"),
            OperatorType::M2P => write!(f, "M2P"),
            OperatorType::L2L(level) => write!(f, "L2L({})", level),
            OperatorType::L2P => write!(f, "L2P"),
            OperatorType::P2P => write!(f, "P2P"),
        }
    }
}

impl fmt::Display for OperatorTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator: {}, Time: {} ms", self.operator, self.time)
    }
}
