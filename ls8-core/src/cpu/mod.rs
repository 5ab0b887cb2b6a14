pub mod decoder;
pub mod opcode;

pub trait Instruction {
    /// Encoded length, opcode byte included.
    fn len_bytes(&self) -> usize;

    /// Whether executing the instruction replaces the program counter instead
    /// of advancing it by [`Instruction::len_bytes`].
    fn sets_pc(&self) -> bool;
}
