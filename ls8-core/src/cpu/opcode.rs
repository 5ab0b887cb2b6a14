use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpcodeError {
    #[error("{0} index {1} out of bounds, must be [0, {2})")]
    IndexOutOfBounds(&'static str, usize, usize),
}

pub type Result<T> = std::result::Result<T, OpcodeError>;

const OPERAND_COUNT_SHIFT: u8 = 6;
const ALU_BIT: u8 = 5;
const SETS_PC_BIT: u8 = 4;
const INSTRUCTION_ID_MASK: u8 = 0x0F;

/// A single 8-bit opcode laid out as `AABCDDDD`:
///
/// - `AA`: number of operand bytes that follow the opcode
/// - `B`: instruction is handled by the ALU
/// - `C`: instruction sets the program counter
/// - `DDDD`: instruction identifier
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode8 {
    value: u8,
}

impl Opcode8 {
    pub const WIDTH_BITS: usize = 8;
    pub const WIDTH_NYBBLES: usize = 2;

    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    fn extract(
        &self,
        idx_type: &'static str,
        idx: usize,
        width: usize,
        mask: u8,
        shift: usize,
    ) -> Result<u8> {
        if idx >= width {
            return Err(OpcodeError::IndexOutOfBounds(idx_type, idx, width));
        }
        Ok((self.value >> shift) & mask)
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn try_get_bit(&self, idx: usize) -> Result<u8> {
        self.extract("bit", idx, Self::WIDTH_BITS, 0x01, idx)
    }

    pub fn try_get_nybble(&self, idx: usize) -> Result<u8> {
        self.extract("nybble", idx, Self::WIDTH_NYBBLES, 0x0F, idx * 4)
    }

    pub fn operand_count(&self) -> usize {
        (self.value >> OPERAND_COUNT_SHIFT) as usize
    }

    pub fn len_bytes(&self) -> usize {
        1 + self.operand_count()
    }

    pub fn is_alu(&self) -> bool {
        (self.value >> ALU_BIT) & 0x01 == 1
    }

    pub fn sets_pc(&self) -> bool {
        (self.value >> SETS_PC_BIT) & 0x01 == 1
    }

    pub fn instruction_id(&self) -> u8 {
        self.value & INSTRUCTION_ID_MASK
    }
}

impl From<u8> for Opcode8 {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Opcode8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0x{:02X}", self.value))
    }
}

impl fmt::Display for Opcode8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0b{:08b}", self.value))
    }
}
