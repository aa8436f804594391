//! Deterministic serialization for evaluation results.
//!
//! Evaluation can happen in a separate process from validation, so the
//! result crosses a byte boundary. All integers are big-endian.
//!
//! Encoding format:
//! - `error`: 1-byte flag (0=None, 1=Some) followed by a u16 if Some
//! - `condition_groups`: u32 count, then each group:
//!   - `coin_name` (32 bytes), `puzzle_hash` (32 bytes)
//!   - u32 count of opcode entries, each: opcode (u8), u32 condition count,
//!     then each condition: opcode (u8), u32 var count, u32-length-prefixed vars
//! - `execution_cost`: u64
//!
//! Decoding is strict: truncated input, trailing bytes, invalid flags,
//! duplicate opcode keys, and conditions filed under the wrong opcode are
//! all rejected.

use alloc::collections::btree_map::Entry;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use crate::condition::{ConditionGroup, ConditionOpcode, ConditionWithArgs, EvaluationResult};
use crate::error::{CostError, CostResult};
use crate::types::Bytes32;

/// A cursor for reading bytes during decoding.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read_bytes(&mut self, n: usize) -> CostResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CostError::Serialization("unexpected end of data".into()));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> CostResult<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    fn read_u16(&mut self) -> CostResult<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> CostResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u64(&mut self) -> CostResult<u64> {
        let bytes = self.read_bytes(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(buf))
    }

    fn read_bytes32(&mut self) -> CostResult<Bytes32> {
        let bytes = self.read_bytes(32)?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(bytes);
        Ok(hash)
    }

    fn read_optional_u16(&mut self) -> CostResult<Option<u16>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(self.read_u16()?)),
            _ => Err(CostError::Serialization("invalid optional flag".into())),
        }
    }

    fn read_var_bytes(&mut self) -> CostResult<Vec<u8>> {
        let len = self.read_u32()? as usize;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a u32 element count, bounded by the bytes left so a forged count
    /// cannot trigger a huge allocation.
    fn read_count(&mut self, min_item_size: usize) -> CostResult<usize> {
        let count = self.read_u32()? as usize;
        if count.saturating_mul(min_item_size) > self.remaining() {
            return Err(CostError::Serialization("count exceeds remaining data".into()));
        }
        Ok(count)
    }
}

// ── Encoding helpers ──

fn write_u8(buf: &mut Vec<u8>, v: u8) {
    buf.push(v);
}

fn write_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn write_u64(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn write_len(buf: &mut Vec<u8>, len: usize) -> CostResult<()> {
    let len = u32::try_from(len)
        .map_err(|_| CostError::Serialization("length exceeds u32".into()))?;
    write_u32(buf, len);
    Ok(())
}

fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) -> CostResult<()> {
    write_len(buf, data.len())?;
    buf.extend_from_slice(data);
    Ok(())
}

fn write_optional_u16(buf: &mut Vec<u8>, v: Option<u16>) {
    match v {
        None => write_u8(buf, 0),
        Some(code) => {
            write_u8(buf, 1);
            write_u16(buf, code);
        }
    }
}

// ── EvaluationResult encoding ──

/// Encode an `EvaluationResult` to deterministic bytes.
pub fn encode_evaluation_result(result: &EvaluationResult) -> CostResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    write_optional_u16(&mut buf, result.error);
    write_len(&mut buf, result.condition_groups.len())?;
    for group in &result.condition_groups {
        encode_condition_group(&mut buf, group)?;
    }
    write_u64(&mut buf, result.execution_cost);
    Ok(buf)
}

fn encode_condition_group(buf: &mut Vec<u8>, group: &ConditionGroup) -> CostResult<()> {
    buf.extend_from_slice(&group.coin_name);
    buf.extend_from_slice(&group.puzzle_hash);
    write_len(buf, group.conditions_by_opcode.len())?;
    for (opcode, conditions) in &group.conditions_by_opcode {
        write_u8(buf, opcode.as_u8());
        write_len(buf, conditions.len())?;
        for condition in conditions {
            write_u8(buf, condition.opcode.as_u8());
            write_len(buf, condition.vars.len())?;
            for var in &condition.vars {
                write_var_bytes(buf, var)?;
            }
        }
    }
    Ok(())
}

// ── EvaluationResult decoding ──

/// Decode an `EvaluationResult` from bytes produced by
/// [`encode_evaluation_result`].
pub fn decode_evaluation_result(data: &[u8]) -> CostResult<EvaluationResult> {
    let mut r = Reader::new(data);
    let error = r.read_optional_u16()?;
    // coin_name + puzzle_hash + entry count
    let group_count = r.read_count(68)?;
    let mut condition_groups = Vec::with_capacity(group_count);
    for _ in 0..group_count {
        condition_groups.push(decode_condition_group(&mut r)?);
    }
    let execution_cost = r.read_u64()?;

    if r.remaining() != 0 {
        return Err(CostError::Serialization("trailing bytes after evaluation result".into()));
    }

    Ok(EvaluationResult {
        error,
        condition_groups,
        execution_cost,
    })
}

fn decode_condition_group(r: &mut Reader<'_>) -> CostResult<ConditionGroup> {
    let coin_name = r.read_bytes32()?;
    let puzzle_hash = r.read_bytes32()?;
    // opcode + condition count
    let entry_count = r.read_count(5)?;
    let mut conditions_by_opcode = BTreeMap::new();
    for _ in 0..entry_count {
        let opcode = ConditionOpcode(r.read_u8()?);
        // opcode + var count
        let condition_count = r.read_count(5)?;
        let mut conditions = Vec::with_capacity(condition_count);
        for _ in 0..condition_count {
            let condition = decode_condition(r)?;
            if condition.opcode != opcode {
                return Err(CostError::Serialization(alloc::format!(
                    "condition {} filed under opcode {}",
                    condition.opcode, opcode
                )));
            }
            conditions.push(condition);
        }
        match conditions_by_opcode.entry(opcode) {
            Entry::Vacant(slot) => {
                slot.insert(conditions);
            }
            Entry::Occupied(_) => {
                return Err(CostError::Serialization(alloc::format!(
                    "duplicate opcode {} in condition group",
                    opcode
                )));
            }
        }
    }
    Ok(ConditionGroup {
        coin_name,
        puzzle_hash,
        conditions_by_opcode,
    })
}

fn decode_condition(r: &mut Reader<'_>) -> CostResult<ConditionWithArgs> {
    let opcode = ConditionOpcode(r.read_u8()?);
    // length prefix per var
    let var_count = r.read_count(4)?;
    let mut vars = Vec::with_capacity(var_count);
    for _ in 0..var_count {
        vars.push(r.read_var_bytes()?);
    }
    Ok(ConditionWithArgs { opcode, vars })
}
