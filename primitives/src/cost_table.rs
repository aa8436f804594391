//! Per-opcode condition costs.
//!
//! The table is plain configuration: it is built once per protocol version
//! and passed to the accountant by reference. A lookup for an opcode that is
//! not in the table yields zero, so conditions introduced by a later soft fork
//! never break cost computation on older nodes.

use alloc::collections::BTreeMap;
use crate::condition::ConditionOpcode;
use crate::types::Cost;

// ── Condition cost constants (current protocol version) ──

/// Cost of `AGG_SIG` and `AGG_SIG_ME`, per occurrence.
pub const AGG_SIG_COST: Cost = 1_200_000;

/// Cost of `CREATE_COIN`, per occurrence.
pub const CREATE_COIN_COST: Cost = 1_800_000;

/// Immutable mapping from opcode to cost per occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    costs: BTreeMap<ConditionOpcode, Cost>,
}

impl CostTable {
    /// A table where every opcode costs zero.
    pub fn empty() -> Self {
        Self {
            costs: BTreeMap::new(),
        }
    }

    /// The table for the current protocol version.
    ///
    /// Signature aggregation and coin creation are charged. Every other named
    /// opcode is listed explicitly at zero.
    pub fn current() -> Self {
        let mut costs = BTreeMap::new();
        for opcode in ConditionOpcode::KNOWN {
            costs.insert(opcode, 0);
        }
        costs.insert(ConditionOpcode::AGG_SIG, AGG_SIG_COST);
        costs.insert(ConditionOpcode::AGG_SIG_ME, AGG_SIG_COST);
        costs.insert(ConditionOpcode::CREATE_COIN, CREATE_COIN_COST);
        Self { costs }
    }

    /// Builder-style insert, replacing any existing cost for `opcode`.
    pub fn with_cost(mut self, opcode: ConditionOpcode, cost: Cost) -> Self {
        self.costs.insert(opcode, cost);
        self
    }

    /// Cost per occurrence of `opcode`, zero when the opcode is not listed.
    pub fn cost_of(&self, opcode: ConditionOpcode) -> Cost {
        self.costs.get(&opcode).copied().unwrap_or(0)
    }

    /// Returns true if the table lists `opcode`, even at zero cost.
    pub fn contains(&self, opcode: ConditionOpcode) -> bool {
        self.costs.contains_key(&opcode)
    }

    /// Number of listed opcodes.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns true if no opcode is listed.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Iterate listed `(opcode, cost)` pairs in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = (ConditionOpcode, Cost)> + '_ {
        self.costs.iter().map(|(opcode, cost)| (*opcode, *cost))
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self::current()
    }
}

impl FromIterator<(ConditionOpcode, Cost)> for CostTable {
    fn from_iter<I: IntoIterator<Item = (ConditionOpcode, Cost)>>(iter: I) -> Self {
        Self {
            costs: iter.into_iter().collect(),
        }
    }
}
