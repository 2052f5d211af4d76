//! spidev-backed SPI bus

use crate::platform::{
    traits::{SpiConfig, SpiInterface, SpiMode},
    PlatformError, Result, SpiError,
};
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
use std::io::Write;

fn mode_flags(mode: SpiMode) -> SpiModeFlags {
    match mode {
        SpiMode::Mode0 => SpiModeFlags::SPI_MODE_0,
        SpiMode::Mode1 => SpiModeFlags::SPI_MODE_1,
        SpiMode::Mode2 => SpiModeFlags::SPI_MODE_2,
        SpiMode::Mode3 => SpiModeFlags::SPI_MODE_3,
    }
}

/// SPI device at `/dev/spidev{bus}.{chip_select}`
pub struct LinuxSpi {
    device: Spidev,
    config: SpiConfig,
}

impl LinuxSpi {
    /// Open and configure an SPI device
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when the device node cannot be opened,
    /// `Spi(ConfigurationFailed)` when mode, speed or word size are rejected.
    pub fn open(bus: u8, chip_select: u8, config: SpiConfig) -> Result<Self> {
        let path = format!("/dev/spidev{}.{}", bus, chip_select);
        let device = Spidev::open(&path).map_err(|e| {
            crate::log_error!("Failed to open {}: {}", path, e);
            PlatformError::InitializationFailed
        })?;

        let mut spi = Self { device, config };
        spi.apply()?;
        crate::log_debug!(
            "Opened {} at {} Hz, {:?}",
            path,
            spi.config.frequency,
            spi.config.mode
        );
        Ok(spi)
    }

    fn apply(&mut self) -> Result<()> {
        let options = SpidevOptions::new()
            .bits_per_word(self.config.bits_per_word)
            .max_speed_hz(self.config.frequency)
            .mode(mode_flags(self.config.mode))
            .build();
        self.device.configure(&options).map_err(|e| {
            crate::log_error!("SPI configuration rejected: {}", e);
            PlatformError::Spi(SpiError::ConfigurationFailed)
        })
    }
}

impl SpiInterface for LinuxSpi {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        if write_buffer.len() != read_buffer.len() {
            return Err(PlatformError::Spi(SpiError::LengthMismatch));
        }
        let mut transfer = SpidevTransfer::read_write(write_buffer, read_buffer);
        self.device
            .transfer(&mut transfer)
            .map_err(|_| PlatformError::Spi(SpiError::TransferFailed))
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.device
            .write_all(data)
            .map_err(|_| PlatformError::Spi(SpiError::TransferFailed))
    }
}
