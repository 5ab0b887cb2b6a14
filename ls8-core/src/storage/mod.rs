use thiserror::Error;

mod ram;

pub use ram::{Ram, RamStats};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("access of {length} byte(s) at 0x{address:04X} is out of bounds, must be within [0, 0x{size:04X})")]
    AddressOutOfBounds {
        address: usize,
        length: usize,
        size: usize,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;
