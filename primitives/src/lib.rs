//! `spend-cost-primitives` — foundational types for spend cost accounting.
//!
//! This crate provides the condition model, the evaluation result produced by
//! the program evaluator, the injected per-opcode cost table, the consensus
//! cost parameters, error types, and a deterministic codec for evaluation
//! results. The cost accountant itself lives in `spend-cost-engine`.
//!
//! Supports `#![no_std]` (use `default-features = false`).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod types;
pub mod error;
pub mod condition;
pub mod cost_table;
pub mod params;
pub mod codec;

// Re-export commonly used types at the crate root for convenience.
pub use types::{Bytes32, Cost, SerializedProgram, MAX_BLOCK_COST, COST_PER_BYTE};
pub use error::{CostError, CostResult};
pub use condition::{ConditionGroup, ConditionOpcode, ConditionWithArgs, EvaluationResult};
pub use cost_table::CostTable;
pub use params::{CostParams, OverflowPolicy};
