pub mod opcodes;

mod instruction;

pub use instruction::Ls8Instruction;

/// Longest encoding in the instruction set: opcode plus two operands.
pub const MAX_INSTRUCTION_LEN: usize = 3;
