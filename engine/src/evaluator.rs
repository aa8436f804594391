//! Evaluator interface — the upstream collaborator of the accountant.
//!
//! The `Evaluator` trait decouples cost accounting from program execution.
//! A real node plugs in its interpreter and condition extractor; tests use
//! [`MockEvaluator`] or a closure.

use spend_cost_primitives::{Cost, EvaluationResult, SerializedProgram};

/// Runs a program and extracts its conditions.
///
/// `max_cost` is the budget the interpreter may spend before giving up.
/// An evaluator that runs out reports it through `EvaluationResult::error`.
pub trait Evaluator {
    fn evaluate(&self, program: &SerializedProgram, max_cost: Cost) -> EvaluationResult;
}

impl<F> Evaluator for F
where
    F: Fn(&SerializedProgram, Cost) -> EvaluationResult,
{
    fn evaluate(&self, program: &SerializedProgram, max_cost: Cost) -> EvaluationResult {
        (*self)(program, max_cost)
    }
}

/// Evaluator returning the same canned result for every program.
#[derive(Debug, Clone, Default)]
pub struct MockEvaluator {
    result: EvaluationResult,
}

impl MockEvaluator {
    pub fn new(result: EvaluationResult) -> Self {
        Self { result }
    }
}

impl Evaluator for MockEvaluator {
    fn evaluate(&self, _program: &SerializedProgram, _max_cost: Cost) -> EvaluationResult {
        self.result.clone()
    }
}
