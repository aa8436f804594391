//! Error types for spend cost accounting.
//!
//! The cost accountant itself is total under the saturating policy. These
//! errors come from the checked policy, the validator boundary, the codec,
//! and configuration loading.

use alloc::string::String;
use crate::types::Cost;

/// Which contribution overflowed under the checked policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostComponent {
    /// Per-condition cost (occurrences × table cost, summed).
    Conditions,
    /// Program size cost (bytes × byte cost rate).
    Size,
    /// Final sum of execution, condition, and size costs.
    Total,
}

impl core::fmt::Display for CostComponent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Conditions => write!(f, "conditions"),
            Self::Size => write!(f, "size"),
            Self::Total => write!(f, "total"),
        }
    }
}

/// Cost accounting error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    /// Checked arithmetic overflowed `u64`.
    #[error("cost overflow in {component} cost")]
    Overflow { component: CostComponent },

    /// The computed cost is above the consensus ceiling.
    #[error("cost exceeded: cost={cost}, max={max}")]
    CostExceeded { cost: Cost, max: Cost },

    /// The evaluator reported an error for the program.
    #[error("evaluation failed with error code {0}")]
    EvaluationFailed(u16),

    /// Encoding or decoding of an evaluation result failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Cost parameters could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

impl CostError {
    /// Create an overflow error for the given component.
    pub fn overflow(component: CostComponent) -> Self {
        Self::Overflow { component }
    }
}

/// Convenience result type for cost accounting.
pub type CostResult<T> = core::result::Result<T, CostError>;
