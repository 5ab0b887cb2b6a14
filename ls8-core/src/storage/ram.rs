use bytes::Bytes;

use super::{Result, StorageError};
use crate::component::{Component, ComponentId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RamStats {
    pub bytes_read: usize,
    pub bytes_written: usize,
    pub num_reads: usize,
    pub num_writes: usize,
}

/// Flat, zero-initialised byte-addressable memory of `N` cells.
///
/// Every access is bounds-checked; touching an address outside `[0, N)` is an
/// [`StorageError::AddressOutOfBounds`] rather than a wrap.
#[derive(Clone, Debug)]
pub struct Ram<const N: usize> {
    id: ComponentId,
    buffer: [u8; N],
    stats: RamStats,
}

impl<const N: usize> Component for Ram<N> {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

impl<const N: usize> Ram<N> {
    pub const SIZE: usize = N;

    pub fn new(name: &str) -> Self {
        Self {
            id: ComponentId::new(name),
            buffer: [0; N],
            stats: RamStats::default(),
        }
    }

    fn check(address: usize, length: usize) -> Result<()> {
        match address.checked_add(length) {
            Some(end) if address < N && end <= N => Ok(()),
            _ => Err(StorageError::AddressOutOfBounds {
                address,
                length,
                size: N,
            }),
        }
    }

    pub fn read(&mut self, address: usize, length: usize) -> Result<Bytes> {
        Self::check(address, length)?;
        self.stats.bytes_read += length;
        self.stats.num_reads += 1;
        Ok(Bytes::copy_from_slice(&self.buffer[address..address + length]))
    }

    /// Reads up to `max_length` bytes starting at `address`, stopping early at
    /// the end of memory. `address` itself must be in bounds.
    pub fn read_window(&mut self, address: usize, max_length: usize) -> Result<Bytes> {
        Self::check(address, 1)?;
        let length = max_length.min(N - address);
        self.read(address, length)
    }

    pub fn read_u8(&mut self, address: usize) -> Result<u8> {
        Self::check(address, 1)?;
        self.stats.bytes_read += 1;
        self.stats.num_reads += 1;
        Ok(self.buffer[address])
    }

    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<()> {
        Self::check(address, data.len())?;
        tracing::trace!(
            "writing 0x{:X} bytes to 0x{:04X} - 0x{:04X}",
            data.len(),
            address,
            address + data.len()
        );
        self.stats.bytes_written += data.len();
        self.stats.num_writes += 1;
        self.buffer[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn write_u8(&mut self, address: usize, value: u8) -> Result<()> {
        Self::check(address, 1)?;
        self.stats.bytes_written += 1;
        self.stats.num_writes += 1;
        self.buffer[address] = value;
        Ok(())
    }

    /// Raw view of memory. Does not count towards [`RamStats`].
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn stats(&self) -> &RamStats {
        &self.stats
    }
}
