//! Validator boundary.
//!
//! The accountant computes a cost and nothing else. Whether the evaluation
//! succeeded and whether the cost fits under the ceiling are separate checks,
//! made here in that order:
//!
//! 1. Evaluate the program with the ceiling as its budget
//! 2. Reject if the evaluator reported an error
//! 3. Compute the total cost under the configured overflow policy
//! 4. Reject if the total is above `max_block_cost`

use spend_cost_primitives::{
    Cost, CostError, CostParams, CostResult, EvaluationResult, SerializedProgram,
};
use crate::accountant::CostAccountant;
use crate::evaluator::Evaluator;

/// Reject a cost above `max_cost`. A cost equal to the ceiling is allowed.
pub fn check_cost(cost: Cost, max_cost: Cost) -> CostResult<()> {
    if cost > max_cost {
        return Err(CostError::CostExceeded {
            cost,
            max: max_cost,
        });
    }
    Ok(())
}

/// Reject an evaluation that reported an interpreter error.
pub fn check_evaluation(result: &EvaluationResult) -> CostResult<()> {
    match result.error {
        Some(code) => Err(CostError::EvaluationFailed(code)),
        None => Ok(()),
    }
}

/// Evaluate `program` and return its total cost if it is within the ceiling.
pub fn validate_program_cost(
    program: &SerializedProgram,
    evaluator: &dyn Evaluator,
    params: &CostParams,
) -> CostResult<Cost> {
    let result = evaluator.evaluate(program, params.max_block_cost);
    if let Err(err) = check_evaluation(&result) {
        tracing::debug!(error = ?result.error, "evaluation failed");
        return Err(err);
    }

    let cost = CostAccountant::new(params).total_cost(program.as_bytes(), &result)?;
    if let Err(err) = check_cost(cost, params.max_block_cost) {
        tracing::debug!(cost, max = params.max_block_cost, "cost ceiling exceeded");
        return Err(err);
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::MockEvaluator;
    use spend_cost_primitives::{ConditionGroup, ConditionOpcode, ConditionWithArgs, OverflowPolicy};

    fn spend_with_coins(n: usize) -> EvaluationResult {
        let mut group = ConditionGroup::new([1u8; 32], [2u8; 32]);
        for i in 0..n {
            group.push(ConditionWithArgs::new(
                ConditionOpcode::CREATE_COIN,
                vec![vec![i as u8; 32], 1u64.to_be_bytes().to_vec()],
            ));
        }
        EvaluationResult::success(vec![group], 1000)
    }

    #[test]
    fn test_check_cost_boundary() {
        assert!(check_cost(0, 0).is_ok());
        assert!(check_cost(100, 100).is_ok());
        assert_eq!(
            check_cost(101, 100).unwrap_err(),
            CostError::CostExceeded { cost: 101, max: 100 }
        );
    }

    #[test]
    fn test_check_evaluation() {
        assert!(check_evaluation(&EvaluationResult::default()).is_ok());
        assert_eq!(
            check_evaluation(&EvaluationResult::failure(9, 0)).unwrap_err(),
            CostError::EvaluationFailed(9)
        );
    }

    #[test]
    fn test_valid_program_returns_cost() {
        let evaluator = MockEvaluator::new(spend_with_coins(2));
        let program = SerializedProgram::from(vec![0u8; 10]);
        let cost = validate_program_cost(&program, &evaluator, &CostParams::default()).unwrap();
        assert_eq!(cost, 3_721_000);
    }

    #[test]
    fn test_evaluation_error_rejected_before_cost() {
        // the ceiling would also be exceeded; the evaluation error wins
        let evaluator = MockEvaluator::new(EvaluationResult::failure(4, u64::MAX));
        let err = validate_program_cost(
            &SerializedProgram::default(),
            &evaluator,
            &CostParams::default(),
        )
        .unwrap_err();
        assert_eq!(err, CostError::EvaluationFailed(4));
    }

    #[test]
    fn test_ceiling_exceeded() {
        let params = CostParams {
            max_block_cost: 3_720_999,
            ..CostParams::default()
        };
        let evaluator = MockEvaluator::new(spend_with_coins(2));
        let program = SerializedProgram::from(vec![0u8; 10]);
        let err = validate_program_cost(&program, &evaluator, &params).unwrap_err();
        assert_eq!(err, CostError::CostExceeded { cost: 3_721_000, max: 3_720_999 });
    }

    #[test]
    fn test_ceiling_passed_as_budget() {
        let params = CostParams {
            max_block_cost: 5_000_000,
            ..CostParams::default()
        };
        let evaluator = |_: &SerializedProgram, max_cost: Cost| {
            assert_eq!(max_cost, 5_000_000);
            EvaluationResult::success(Vec::new(), 1)
        };
        assert_eq!(
            validate_program_cost(&SerializedProgram::default(), &evaluator, &params).unwrap(),
            1
        );
    }

    #[test]
    fn test_overflow_rejected_by_default_with_max_ceiling() {
        let params = CostParams {
            max_block_cost: u64::MAX,
            ..CostParams::default()
        };
        let evaluator = MockEvaluator::new(EvaluationResult::success(Vec::new(), u64::MAX));
        let program = SerializedProgram::from(vec![0u8; 1]);
        let err = validate_program_cost(&program, &evaluator, &params).unwrap_err();
        assert!(matches!(err, CostError::Overflow { .. }));
    }

    #[test]
    fn test_exact_max_cost_accepted_with_max_ceiling() {
        let params = CostParams {
            max_block_cost: u64::MAX,
            ..CostParams::default()
        };
        let evaluator = MockEvaluator::new(EvaluationResult::success(Vec::new(), u64::MAX - 12_000));
        let program = SerializedProgram::from(vec![0u8; 1]);
        assert_eq!(validate_program_cost(&program, &evaluator, &params).unwrap(), u64::MAX);
    }

    #[test]
    fn test_saturated_cost_exceeds_default_ceiling() {
        let params = CostParams {
            overflow: OverflowPolicy::Saturate,
            ..CostParams::default()
        };
        let evaluator = MockEvaluator::new(EvaluationResult::success(Vec::new(), u64::MAX));
        let program = SerializedProgram::from(vec![0u8; 1]);
        let err = validate_program_cost(&program, &evaluator, &params).unwrap_err();
        assert!(matches!(err, CostError::CostExceeded { cost: u64::MAX, .. }));
    }
}
