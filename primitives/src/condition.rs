//! Spend conditions and the evaluation result handed to the cost accountant.
//!
//! An evaluator runs a block generator (or a single spend bundle), extracts
//! the conditions each coin spend produced, and groups them per coin and per
//! opcode. The accountant consumes that structure as-is.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use crate::types::{Bytes32, Cost};

/// Identifies a spend-condition type.
///
/// Any byte value is a valid opcode. Values without a named constant below
/// are unknown to this protocol version and are carried through untouched so
/// future soft forks can assign them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ConditionOpcode(pub u8);

impl ConditionOpcode {
    pub const AGG_SIG: Self = Self(49);
    pub const AGG_SIG_ME: Self = Self(50);
    pub const CREATE_COIN: Self = Self(51);
    pub const RESERVE_FEE: Self = Self(52);
    pub const CREATE_COIN_ANNOUNCEMENT: Self = Self(60);
    pub const ASSERT_COIN_ANNOUNCEMENT: Self = Self(61);
    pub const CREATE_PUZZLE_ANNOUNCEMENT: Self = Self(62);
    pub const ASSERT_PUZZLE_ANNOUNCEMENT: Self = Self(63);
    pub const ASSERT_MY_COIN_ID: Self = Self(70);
    pub const ASSERT_SECONDS_NOW_EXCEEDS: Self = Self(81);
    pub const ASSERT_HEIGHT_AGE_EXCEEDS: Self = Self(82);
    pub const ASSERT_HEIGHT_NOW_EXCEEDS: Self = Self(83);

    /// Every opcode with a name in the current protocol version.
    pub const KNOWN: [Self; 12] = [
        Self::AGG_SIG,
        Self::AGG_SIG_ME,
        Self::CREATE_COIN,
        Self::RESERVE_FEE,
        Self::CREATE_COIN_ANNOUNCEMENT,
        Self::ASSERT_COIN_ANNOUNCEMENT,
        Self::CREATE_PUZZLE_ANNOUNCEMENT,
        Self::ASSERT_PUZZLE_ANNOUNCEMENT,
        Self::ASSERT_MY_COIN_ID,
        Self::ASSERT_SECONDS_NOW_EXCEEDS,
        Self::ASSERT_HEIGHT_AGE_EXCEEDS,
        Self::ASSERT_HEIGHT_NOW_EXCEEDS,
    ];

    /// Return the raw byte value.
    pub fn as_u8(self) -> u8 {
        self.0
    }

    /// Symbolic name, or `None` for opcodes this version does not know.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::AGG_SIG => "AGG_SIG",
            Self::AGG_SIG_ME => "AGG_SIG_ME",
            Self::CREATE_COIN => "CREATE_COIN",
            Self::RESERVE_FEE => "RESERVE_FEE",
            Self::CREATE_COIN_ANNOUNCEMENT => "CREATE_COIN_ANNOUNCEMENT",
            Self::ASSERT_COIN_ANNOUNCEMENT => "ASSERT_COIN_ANNOUNCEMENT",
            Self::CREATE_PUZZLE_ANNOUNCEMENT => "CREATE_PUZZLE_ANNOUNCEMENT",
            Self::ASSERT_PUZZLE_ANNOUNCEMENT => "ASSERT_PUZZLE_ANNOUNCEMENT",
            Self::ASSERT_MY_COIN_ID => "ASSERT_MY_COIN_ID",
            Self::ASSERT_SECONDS_NOW_EXCEEDS => "ASSERT_SECONDS_NOW_EXCEEDS",
            Self::ASSERT_HEIGHT_AGE_EXCEEDS => "ASSERT_HEIGHT_AGE_EXCEEDS",
            Self::ASSERT_HEIGHT_NOW_EXCEEDS => "ASSERT_HEIGHT_NOW_EXCEEDS",
            _ => return None,
        };
        Some(name)
    }

    /// Returns true if this opcode has a name in the current protocol version.
    pub fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl From<u8> for ConditionOpcode {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

impl fmt::Display for ConditionOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "UNKNOWN({})", self.0),
        }
    }
}

/// A single condition occurrence: the opcode and its raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionWithArgs {
    pub opcode: ConditionOpcode,
    pub vars: Vec<Vec<u8>>,
}

impl ConditionWithArgs {
    pub fn new(opcode: ConditionOpcode, vars: Vec<Vec<u8>>) -> Self {
        Self { opcode, vars }
    }
}

/// All conditions produced by one coin spend, grouped by opcode.
///
/// Keys are unique per group. The map is ordered so iteration is stable, but
/// cost accounting does not depend on that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionGroup {
    /// Id of the coin being spent.
    pub coin_name: Bytes32,
    /// Puzzle hash of the coin being spent.
    pub puzzle_hash: Bytes32,
    /// Occurrences per opcode, in the order the program emitted them.
    pub conditions_by_opcode: BTreeMap<ConditionOpcode, Vec<ConditionWithArgs>>,
}

impl ConditionGroup {
    /// Create an empty group for a coin spend.
    pub fn new(coin_name: Bytes32, puzzle_hash: Bytes32) -> Self {
        Self {
            coin_name,
            puzzle_hash,
            conditions_by_opcode: BTreeMap::new(),
        }
    }

    /// Append a condition under its opcode.
    pub fn push(&mut self, condition: ConditionWithArgs) {
        self.conditions_by_opcode
            .entry(condition.opcode)
            .or_default()
            .push(condition);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, condition: ConditionWithArgs) -> Self {
        self.push(condition);
        self
    }

    /// Number of occurrences of `opcode` in this group.
    pub fn occurrences(&self, opcode: ConditionOpcode) -> usize {
        self.conditions_by_opcode.get(&opcode).map_or(0, Vec::len)
    }

    /// Total number of condition occurrences across all opcodes.
    pub fn condition_count(&self) -> usize {
        self.conditions_by_opcode.values().map(Vec::len).sum()
    }

    /// Iterate `(opcode, occurrences)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ConditionOpcode, &[ConditionWithArgs])> {
        self.conditions_by_opcode
            .iter()
            .map(|(opcode, list)| (*opcode, list.as_slice()))
    }
}

/// Output of the program evaluator.
///
/// `execution_cost` covers running the program only. Condition and size
/// costs are added by the accountant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluationResult {
    /// Interpreter error code, `None` on success.
    pub error: Option<u16>,
    /// One group per spent coin.
    pub condition_groups: Vec<ConditionGroup>,
    /// Cost measured by the interpreter itself.
    pub execution_cost: Cost,
}

impl EvaluationResult {
    /// A successful evaluation.
    pub fn success(condition_groups: Vec<ConditionGroup>, execution_cost: Cost) -> Self {
        Self {
            error: None,
            condition_groups,
            execution_cost,
        }
    }

    /// A failed evaluation carrying the interpreter's error code.
    pub fn failure(code: u16, execution_cost: Cost) -> Self {
        Self {
            error: Some(code),
            condition_groups: Vec::new(),
            execution_cost,
        }
    }

    /// Returns true if the evaluator reported no error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
