use std::io;
use std::path::Path;

use thiserror::Error;

use crate::component::Component;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to read program file '{0}'")]
    FileLoad(String, #[source] io::Error),
    #[error("invalid program image")]
    Load(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("cpu fault")]
    Cpu(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, MachineError>;

/// Why a run stopped without faulting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// A halt instruction was executed.
    Halted,
    /// The byte at `address` is not an instruction.
    UnknownOpcode { opcode: u8, address: usize },
}

pub trait Machine: Component {
    /// Copies a decoded program image into memory starting at address 0.
    fn load_program(&mut self, program: &[u8]) -> Result<()>;

    fn load_file(&mut self, path: &Path) -> Result<()>;

    fn run(&mut self) -> Result<HaltReason>;
}
