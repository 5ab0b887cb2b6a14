use crate::cpu::Instruction;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum DecodeError {
    #[error("no bytes to decode")]
    Empty,
    #[error("unknown opcode 0x{0:02X}")]
    UnknownOpcode(u8),
    #[error("opcode 0x{opcode:02X} needs {needed} bytes but only {available} are available")]
    Truncated {
        opcode: u8,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

pub trait DecodeOne {
    type Instruction: Instruction;

    fn decode_one(&self, bytes: &[u8]) -> Result<Self::Instruction>;
}
