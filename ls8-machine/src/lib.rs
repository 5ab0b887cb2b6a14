pub mod cpu;
pub mod isa;
pub mod loader;
pub mod machine;
pub mod output;

mod alu;
mod decoder;
mod registers;
mod stack;

pub use crate::decoder::Ls8Decoder;
pub use crate::registers::{Flags, Registers, NUM_REGISTERS, SP, SP_INITIAL};
