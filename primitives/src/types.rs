//! Core type aliases and consensus constants for spend cost accounting.

use bytes::Bytes;
use core::fmt;

/// 32-byte hash used for coin names and puzzle hashes.
pub type Bytes32 = [u8; 32];

/// Unit of execution cost. All cost arithmetic is unsigned 64-bit.
pub type Cost = u64;

/// Cost charged per byte of the canonically serialized program.
pub const COST_PER_BYTE: Cost = 12_000;

/// Maximum total cost a block may incur.
pub const MAX_BLOCK_COST: Cost = 11_000_000_000;

/// Canonical byte encoding of a program.
///
/// The accountant only ever looks at the length. The bytes are kept behind a
/// reference-counted buffer so a block generator can be shared between the
/// evaluator and the accountant without copying.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct SerializedProgram(Bytes);

impl SerializedProgram {
    /// Wrap already-serialized program bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Create from a static byte slice without allocating.
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }

    /// Serialized length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the program has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SerializedProgram {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<alloc::vec::Vec<u8>> for SerializedProgram {
    fn from(bytes: alloc::vec::Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl fmt::Debug for SerializedProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializedProgram({} bytes)", self.0.len())
    }
}

/// Convert a `Bytes32` to a hex string for display purposes.
pub fn bytes32_to_hex(hash: &Bytes32) -> alloc::string::String {
    let mut s = alloc::string::String::with_capacity(66);
    s.push_str("0x");
    for byte in hash {
        use core::fmt::Write;
        let _ = write!(s, "{:02x}", byte);
    }
    s
}
