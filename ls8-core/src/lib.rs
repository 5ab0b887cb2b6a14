pub mod cpu;

mod component;
mod machine;
mod storage;

pub use crate::component::{Component, ComponentId};
pub use crate::machine::{HaltReason, Machine, MachineError, Result};
pub use crate::storage::{Ram, RamStats, StorageError};
