//! Non-volatile storage abstraction.
//! Supports the MCU's EEPROM on hardware and an in-memory image for tests.

use crate::error::NvError;

/// Size of the reference EEPROM, in bytes (ATmega328-class)
pub const EEPROM_SIZE: u32 = 1024;

/// Byte-addressed non-volatile storage
///
/// Offsets come from [`crate::storage_layout`].
pub trait NonVolatileStorage {
    /// Write `data` starting at `address`
    ///
    /// Writes may be buffered; call [`flush`](Self::flush) to be sure they
    /// reached the device.
    ///
    /// # Errors
    /// Returns [`NvError::InvalidAddress`] if any byte falls past the end of
    /// the device. Nothing is written in that case.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<(), NvError>;

    /// Fill `buf` from `address`
    ///
    /// # Errors
    /// Returns [`NvError::InvalidAddress`] if any byte falls past the end of
    /// the device.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), NvError>;

    /// Commit buffered writes
    fn flush(&mut self) -> Result<(), NvError>;
}

/// In-memory EEPROM image, erased to `0xFF`
#[derive(Clone)]
pub struct EepromImage {
    bytes: [u8; EEPROM_SIZE as usize],
}

impl EepromImage {
    pub fn new() -> Self {
        Self {
            bytes: [0xFF; EEPROM_SIZE as usize],
        }
    }

    /// Return every byte to the erased state
    pub fn erase(&mut self) {
        self.bytes.fill(0xFF);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn range(address: u32, length: usize) -> Result<core::ops::Range<usize>, NvError> {
        let start = address as usize;
        match start.checked_add(length) {
            Some(end) if end <= EEPROM_SIZE as usize => Ok(start..end),
            _ => Err(NvError::InvalidAddress { address, length }),
        }
    }
}

impl Default for EepromImage {
    fn default() -> Self {
        Self::new()
    }
}

impl NonVolatileStorage for EepromImage {
    fn write(&mut self, address: u32, data: &[u8]) -> Result<(), NvError> {
        let range = Self::range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), NvError> {
        let range = Self::range(address, buf.len())?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), NvError> {
        // Nothing is buffered.
        Ok(())
    }
}
