//! Cost accountant — the consensus cost function.
//!
//! `compute_total_cost` tallies:
//!
//! 1. the interpreter's `execution_cost`
//! 2. for every condition group and every opcode in it,
//!    `occurrences × table.cost_of(opcode)` (zero for unlisted opcodes)
//! 3. `len(serialized_program) × byte_cost_rate`
//!
//! and returns the sum. `EvaluationResult::error` is never inspected here;
//! the validator checks it separately.
//!
//! **Overflow:** `CostParams::overflow` selects the behavior and defaults to
//! `OverflowPolicy::Reject`, where the `checked_*` functions fail with
//! `CostError::Overflow`. Under `Saturate` the plain functions clamp at
//! `u64::MAX`; all terms are non-negative, so the clamped total is
//! `min(true_total, u64::MAX)` for any traversal order.

use spend_cost_primitives::error::CostComponent;
use spend_cost_primitives::types::bytes32_to_hex;
use spend_cost_primitives::{
    ConditionGroup, Cost, CostError, CostParams, CostResult, CostTable, EvaluationResult,
    OverflowPolicy,
};

/// The three independently auditable contributions to a total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CostBreakdown {
    /// Cost reported by the interpreter.
    pub execution: Cost,
    /// Sum of per-condition costs.
    pub conditions: Cost,
    /// Serialized program size times the byte cost rate.
    pub size: Cost,
}

impl CostBreakdown {
    /// Saturating sum of all contributions.
    pub fn total(&self) -> Cost {
        self.execution
            .saturating_add(self.size)
            .saturating_add(self.conditions)
    }

    /// Checked sum of all contributions.
    pub fn checked_total(&self) -> CostResult<Cost> {
        self.execution
            .checked_add(self.size)
            .and_then(|v| v.checked_add(self.conditions))
            .ok_or(CostError::overflow(CostComponent::Total))
    }
}

fn checked_size_cost(len: usize, byte_cost_rate: Cost) -> CostResult<Cost> {
    (len as u64)
        .checked_mul(byte_cost_rate)
        .ok_or(CostError::overflow(CostComponent::Size))
}

/// Sum of per-condition costs over every group.
pub fn condition_cost(groups: &[ConditionGroup], table: &CostTable) -> Cost {
    saturating_condition_cost(groups, table).0
}

/// Saturating condition sum, and whether any step clamped.
fn saturating_condition_cost(groups: &[ConditionGroup], table: &CostTable) -> (Cost, bool) {
    let mut total: Cost = 0;
    let mut saturated = false;
    for group in groups {
        for (opcode, occurrences) in group.iter() {
            if !table.contains(opcode) {
                tracing::trace!(
                    %opcode,
                    coin = %bytes32_to_hex(&group.coin_name),
                    count = occurrences.len(),
                    "unlisted opcode, no cost"
                );
                continue;
            }
            let cost = match (occurrences.len() as u64).checked_mul(table.cost_of(opcode)) {
                Some(cost) => cost,
                None => {
                    saturated = true;
                    Cost::MAX
                }
            };
            total = match total.checked_add(cost) {
                Some(total) => total,
                None => {
                    saturated = true;
                    Cost::MAX
                }
            };
        }
    }
    (total, saturated)
}

fn checked_condition_cost(groups: &[ConditionGroup], table: &CostTable) -> CostResult<Cost> {
    let overflow = || CostError::overflow(CostComponent::Conditions);
    let mut total: Cost = 0;
    for group in groups {
        for (opcode, occurrences) in group.iter() {
            let cost = (occurrences.len() as u64)
                .checked_mul(table.cost_of(opcode))
                .ok_or_else(overflow)?;
            total = total.checked_add(cost).ok_or_else(overflow)?;
        }
    }
    Ok(total)
}

/// Break the cost of a program down into its three contributions.
pub fn cost_breakdown(
    serialized_program: &[u8],
    result: &EvaluationResult,
    byte_cost_rate: Cost,
    table: &CostTable,
) -> CostBreakdown {
    saturating_tally(serialized_program.len(), result, byte_cost_rate, table).0
}

/// Saturating breakdown, plus whether the true total exceeded `u64::MAX`.
///
/// A true total of exactly `u64::MAX` is not saturation.
pub(crate) fn saturating_tally(
    program_len: usize,
    result: &EvaluationResult,
    byte_cost_rate: Cost,
    table: &CostTable,
) -> (CostBreakdown, bool) {
    let (conditions, conditions_saturated) =
        saturating_condition_cost(&result.condition_groups, table);
    let size_checked = (program_len as u64).checked_mul(byte_cost_rate);
    let breakdown = CostBreakdown {
        execution: result.execution_cost,
        conditions,
        size: size_checked.unwrap_or(Cost::MAX),
    };
    let saturated =
        conditions_saturated || size_checked.is_none() || breakdown.checked_total().is_err();
    (breakdown, saturated)
}

/// Total cost of a block or spend bundle, saturating at `u64::MAX`.
///
/// `serialized_program` must be the canonical encoding of the program that
/// produced `result`. This is not re-verified.
pub fn compute_total_cost(
    serialized_program: &[u8],
    result: &EvaluationResult,
    byte_cost_rate: Cost,
    table: &CostTable,
) -> Cost {
    let (breakdown, saturated) =
        saturating_tally(serialized_program.len(), result, byte_cost_rate, table);
    let total = breakdown.total();
    if saturated {
        tracing::warn!(
            execution = breakdown.execution,
            conditions = breakdown.conditions,
            size = breakdown.size,
            "total cost saturated"
        );
    }
    tracing::debug!(
        execution = breakdown.execution,
        conditions = breakdown.conditions,
        size = breakdown.size,
        total,
        groups = result.condition_groups.len(),
        "computed program cost"
    );
    total
}

/// Total cost of a block or spend bundle, failing on `u64` overflow.
pub fn checked_total_cost(
    serialized_program: &[u8],
    result: &EvaluationResult,
    byte_cost_rate: Cost,
    table: &CostTable,
) -> CostResult<Cost> {
    let breakdown = CostBreakdown {
        execution: result.execution_cost,
        conditions: checked_condition_cost(&result.condition_groups, table)?,
        size: checked_size_cost(serialized_program.len(), byte_cost_rate)?,
    };
    breakdown.checked_total()
}

/// Cost accountant bound to one protocol version's parameters.
///
/// Holds no state besides the borrowed parameters; the same accountant can
/// be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct CostAccountant<'a> {
    params: &'a CostParams,
}

impl<'a> CostAccountant<'a> {
    pub fn new(params: &'a CostParams) -> Self {
        Self { params }
    }

    /// The parameters this accountant charges with.
    pub fn params(&self) -> &'a CostParams {
        self.params
    }

    /// Total cost under the configured overflow policy.
    ///
    /// Never fails under `OverflowPolicy::Saturate`.
    pub fn total_cost(
        &self,
        serialized_program: &[u8],
        result: &EvaluationResult,
    ) -> CostResult<Cost> {
        let rate = self.params.cost_per_byte;
        let table = &self.params.cost_table;
        match self.params.overflow {
            OverflowPolicy::Saturate => Ok(compute_total_cost(serialized_program, result, rate, table)),
            OverflowPolicy::Reject => checked_total_cost(serialized_program, result, rate, table),
        }
    }

    /// Saturating breakdown using the configured rate and table.
    pub fn breakdown(&self, serialized_program: &[u8], result: &EvaluationResult) -> CostBreakdown {
        cost_breakdown(
            serialized_program,
            result,
            self.params.cost_per_byte,
            &self.params.cost_table,
        )
    }
}
