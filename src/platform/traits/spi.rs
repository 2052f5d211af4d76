//! SPI interface trait
//!
//! This module defines the SPI bus communication interface that platform implementations must provide.

use crate::platform::Result;

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// Bus frequency in Hz
    pub frequency: u32,
    /// SPI mode (CPOL and CPHA)
    pub mode: SpiMode,
    /// Bits per word
    pub bits_per_word: u8,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            mode: SpiMode::Mode0,
            bits_per_word: 8,
        }
    }
}

/// SPI mode (Clock Polarity and Phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

/// SPI interface trait
///
/// # Safety Invariants
///
/// - Only one owner per SPI bus instance
/// - No concurrent access to the same SPI bus from multiple contexts
/// - Chip select is asserted for the duration of each call
pub trait SpiInterface {
    /// Transfer data (full-duplex)
    ///
    /// Simultaneously transmits `write_buffer` and receives into `read_buffer`
    /// within one chip-select assertion. Both buffers must have the same length.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the transfer fails or the buffers
    /// have different lengths.
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()>;

    /// Write data (transmit only)
    ///
    /// Transmits data and discards received bytes.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the write operation fails.
    fn write(&mut self, data: &[u8]) -> Result<()>;
}
