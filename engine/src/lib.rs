//! `spend-cost-engine` — deterministic cost accounting for block validation.
//!
//! This crate implements the cost function used by consensus to bound the
//! work a block or spend bundle may demand:
//! `f(program_bytes, evaluation_result, byte_cost_rate) → total_cost`
//!
//! The total is the sum of three contributions: the interpreter's execution
//! cost, a fixed cost per condition occurrence looked up in an injected
//! [`CostTable`](spend_cost_primitives::CostTable), and a per-byte charge on
//! the serialized program.
//!
//! ## Architecture
//!
//! - [`accountant`] — the pure cost function and its checked variant
//! - [`evaluator::Evaluator`] — seam to the program evaluator that produces
//!   an `EvaluationResult`
//! - [`evaluator::MockEvaluator`] — canned evaluator for tests
//! - [`validation`] — the validator boundary: error check, cost, ceiling

pub mod accountant;
pub mod evaluator;
pub mod validation;

// Re-export key types for convenience
pub use accountant::{
    checked_total_cost, compute_total_cost, cost_breakdown, CostAccountant, CostBreakdown,
};
pub use evaluator::{Evaluator, MockEvaluator};
pub use validation::{check_cost, validate_program_cost};
