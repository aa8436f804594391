//! Shared test helpers for integration tests.
//!
//! Provides deterministic coin ids, condition builders, and evaluation
//! result factories used across all integration test files.

#![allow(dead_code)]

use spend_cost_primitives::{
    Bytes32, ConditionGroup, ConditionOpcode, ConditionWithArgs, Cost, EvaluationResult,
    SerializedProgram,
};

// ── Deterministic Ids ──

/// Coin name derived from a single seed byte.
pub fn coin_name(seed: u8) -> Bytes32 {
    let mut id = [0u8; 32];
    id[0] = 0xc0;
    id[31] = seed;
    id
}

/// Puzzle hash derived from a single seed byte.
pub fn puzzle_hash(seed: u8) -> Bytes32 {
    let mut id = [0u8; 32];
    id[0] = 0x9a;
    id[31] = seed;
    id
}

// ── Conditions ──

pub fn create_coin(recipient_seed: u8, amount: u64) -> ConditionWithArgs {
    ConditionWithArgs::new(
        ConditionOpcode::CREATE_COIN,
        vec![puzzle_hash(recipient_seed).to_vec(), amount.to_be_bytes().to_vec()],
    )
}

pub fn agg_sig(opcode: ConditionOpcode, message: &[u8]) -> ConditionWithArgs {
    ConditionWithArgs::new(opcode, vec![vec![0xb0; 48], message.to_vec()])
}

pub fn reserve_fee(amount: u64) -> ConditionWithArgs {
    ConditionWithArgs::new(ConditionOpcode::RESERVE_FEE, vec![amount.to_be_bytes().to_vec()])
}

/// A condition with an opcode the current protocol does not know.
pub fn unknown(opcode: u8) -> ConditionWithArgs {
    ConditionWithArgs::new(ConditionOpcode(opcode), vec![b"future".to_vec()])
}

// ── Groups and Results ──

/// A spend of coin `seed` producing `conditions`.
pub fn spend(seed: u8, conditions: Vec<ConditionWithArgs>) -> ConditionGroup {
    let mut group = ConditionGroup::new(coin_name(seed), puzzle_hash(seed));
    for condition in conditions {
        group.push(condition);
    }
    group
}

/// A group with `count` occurrences of each `(opcode, count)` pair.
pub fn group_with_counts(seed: u8, counts: &[(u8, usize)]) -> ConditionGroup {
    let mut group = ConditionGroup::new(coin_name(seed), puzzle_hash(seed));
    for (opcode, count) in counts {
        for i in 0..*count {
            group.push(ConditionWithArgs::new(ConditionOpcode(*opcode), vec![vec![i as u8]]));
        }
    }
    group
}

/// A typical payment: one signature, a payment and change output, a fee.
pub fn standard_payment(seed: u8) -> ConditionGroup {
    spend(
        seed,
        vec![
            agg_sig(ConditionOpcode::AGG_SIG_ME, b"spend"),
            create_coin(seed.wrapping_add(1), 1_000),
            create_coin(seed, 49_000),
            reserve_fee(10),
        ],
    )
}

pub fn success(groups: Vec<ConditionGroup>, execution_cost: Cost) -> EvaluationResult {
    EvaluationResult::success(groups, execution_cost)
}

/// A program of `len` bytes. Content is irrelevant to cost.
pub fn program_of_len(len: usize) -> SerializedProgram {
    SerializedProgram::from(vec![0x80; len])
}
