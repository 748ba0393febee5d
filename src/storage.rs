//! Non-volatile storage for the selected pattern.

use core::convert::Infallible;

/// Address of the persisted pattern index
pub const PATTERN_INDEX_ADDRESS: u8 = 0;

/// Value of an erased storage cell
pub const ERASED_BYTE: u8 = 0xFF;

/// Byte-addressable non-volatile store
///
/// Writes are synchronous: once `write` returns `Ok`, the byte survives a
/// power cycle.
pub trait NonVolatileStore {
    type Error;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error>;

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

/// Store for builds without persistence
///
/// Reads back as erased, so every boot starts at the first pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl NonVolatileStore for NoStore {
    type Error = Infallible;

    fn read(&mut self, _address: u8) -> Result<u8, Self::Error> {
        Ok(ERASED_BYTE)
    }

    fn write(&mut self, _address: u8, _value: u8) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Error returned when an address is outside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreError {
    pub address: u8,
}

/// In-memory store of `SIZE` bytes, initially erased
#[derive(Debug, Clone)]
pub struct RamStore<const SIZE: usize> {
    cells: [u8; SIZE],
}

impl<const SIZE: usize> RamStore<SIZE> {
    pub const fn new() -> Self {
        Self {
            cells: [ERASED_BYTE; SIZE],
        }
    }

    /// Raw contents
    pub const fn cells(&self) -> &[u8; SIZE] {
        &self.cells
    }
}

impl<const SIZE: usize> Default for RamStore<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> NonVolatileStore for RamStore<SIZE> {
    type Error = StoreError;

    fn read(&mut self, address: u8) -> Result<u8, Self::Error> {
        self.cells
            .get(address as usize)
            .copied()
            .ok_or(StoreError { address })
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        let cell = self
            .cells
            .get_mut(address as usize)
            .ok_or(StoreError { address })?;
        *cell = value;
        Ok(())
    }
}
