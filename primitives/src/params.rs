//! Consensus cost parameters.
//!
//! `CostParams` bundles everything the accountant and the validator boundary
//! need for one protocol version. Defaults match the current network
//! constants; a node that follows a different version loads its own values.

use crate::cost_table::CostTable;
use crate::types::{Cost, COST_PER_BYTE, MAX_BLOCK_COST};

/// What to do when cost arithmetic exceeds `u64::MAX`.
///
/// Every node on a network must use the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Clamp every intermediate and the final value to `u64::MAX`.
    Saturate,
    /// Fail with `CostError::Overflow`.
    #[default]
    Reject,
}

/// Cost configuration for one protocol version.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CostParams {
    /// Cost per byte of the serialized program.
    pub cost_per_byte: Cost,
    /// Ceiling a block or bundle's total cost may not exceed.
    pub max_block_cost: Cost,
    /// Per-opcode condition costs.
    pub cost_table: CostTable,
    /// Overflow handling for cost arithmetic.
    pub overflow: OverflowPolicy,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            cost_per_byte: COST_PER_BYTE,
            max_block_cost: MAX_BLOCK_COST,
            cost_table: CostTable::current(),
            overflow: OverflowPolicy::Reject,
        }
    }
}

#[cfg(feature = "std")]
impl CostParams {
    /// Load parameters from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::error::CostResult<Self> {
        serde_json::from_str(json).map_err(|e| crate::error::CostError::Config(e.to_string()))
    }
}
