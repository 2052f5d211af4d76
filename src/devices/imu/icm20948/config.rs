//! ICM-20948 Configuration Types
//!
//! Range, filter and bus settings. All types are validated on construction
//! and immutable once handed to the driver.

use super::registers::{
    ACCEL_SENSITIVITY, DLPFCFG_MASK, DLPFCFG_SHIFT, FCHOICE, FS_SEL_MASK, FS_SEL_SHIFT,
    GYRO_SENSITIVITY,
};
use crate::devices::traits::ConfigError;
use crate::platform::{SpiConfig, SpiMode};

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelRange {
    /// ±2 g
    G2 = 0,
    /// ±4 g
    G4 = 1,
    /// ±8 g
    G8 = 2,
    /// ±16 g
    G16 = 3,
}

impl AccelRange {
    /// Sensitivity in LSB/g
    pub fn sensitivity(self) -> f64 {
        ACCEL_SENSITIVITY[self as usize]
    }

    /// ACCEL_FS_SEL field value
    pub fn register_value(self) -> u8 {
        (self as u8) << FS_SEL_SHIFT
    }

    /// Decode from an ACCEL_CONFIG value
    pub fn from_register(value: u8) -> Self {
        match (value & FS_SEL_MASK) >> FS_SEL_SHIFT {
            0 => AccelRange::G2,
            1 => AccelRange::G4,
            2 => AccelRange::G8,
            _ => AccelRange::G16,
        }
    }

    /// Full scale in g
    pub fn full_scale_g(self) -> u16 {
        2 << (self as u16)
    }
}

impl TryFrom<u8> for AccelRange {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(AccelRange::G2),
            1 => Ok(AccelRange::G4),
            2 => Ok(AccelRange::G8),
            3 => Ok(AccelRange::G16),
            other => Err(ConfigError::AccelRange(other)),
        }
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroRange {
    /// ±250 °/s
    Dps250 = 0,
    /// ±500 °/s
    Dps500 = 1,
    /// ±1000 °/s
    Dps1000 = 2,
    /// ±2000 °/s
    Dps2000 = 3,
}

impl GyroRange {
    /// Sensitivity in LSB/(°/s)
    pub fn sensitivity(self) -> f64 {
        GYRO_SENSITIVITY[self as usize]
    }

    /// GYRO_FS_SEL field value
    pub fn register_value(self) -> u8 {
        (self as u8) << FS_SEL_SHIFT
    }

    /// Decode from a GYRO_CONFIG_1 value
    pub fn from_register(value: u8) -> Self {
        match (value & FS_SEL_MASK) >> FS_SEL_SHIFT {
            0 => GyroRange::Dps250,
            1 => GyroRange::Dps500,
            2 => GyroRange::Dps1000,
            _ => GyroRange::Dps2000,
        }
    }

    /// Full scale in °/s
    pub fn full_scale_dps(self) -> u16 {
        250 << (self as u16)
    }
}

impl TryFrom<u8> for GyroRange {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(GyroRange::Dps250),
            1 => Ok(GyroRange::Dps500),
            2 => Ok(GyroRange::Dps1000),
            3 => Ok(GyroRange::Dps2000),
            other => Err(ConfigError::GyroRange(other)),
        }
    }
}

/// Accelerometer DLPF setting (3 dB bandwidth)
///
/// The discriminant is the ACCEL_DLPFCFG value. Settings 0 and 1 share the
/// same bandwidth; 0 is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelDlpfConfig {
    Hz246 = 0,
    Hz111 = 2,
    Hz50 = 3,
    Hz24 = 4,
    Hz12 = 5,
    Hz6 = 6,
    Hz473 = 7,
}

impl AccelDlpfConfig {
    /// DLPFCFG field with FCHOICE set
    pub fn register_value(self) -> u8 {
        ((self as u8) << DLPFCFG_SHIFT) | FCHOICE
    }

    /// Decode from an ACCEL_CONFIG value; `None` when the filter is bypassed
    pub fn from_register(value: u8) -> Option<Self> {
        if value & FCHOICE == 0 {
            return None;
        }
        Self::try_from((value & DLPFCFG_MASK) >> DLPFCFG_SHIFT).ok()
    }
}

impl TryFrom<u8> for AccelDlpfConfig {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 | 1 => Ok(AccelDlpfConfig::Hz246),
            2 => Ok(AccelDlpfConfig::Hz111),
            3 => Ok(AccelDlpfConfig::Hz50),
            4 => Ok(AccelDlpfConfig::Hz24),
            5 => Ok(AccelDlpfConfig::Hz12),
            6 => Ok(AccelDlpfConfig::Hz6),
            7 => Ok(AccelDlpfConfig::Hz473),
            other => Err(ConfigError::LowPassFilter(other)),
        }
    }
}

/// Gyroscope DLPF setting (3 dB bandwidth)
///
/// The discriminant is the GYRO_DLPFCFG value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroDlpfConfig {
    Hz196 = 0,
    Hz152 = 1,
    Hz120 = 2,
    Hz51 = 3,
    Hz24 = 4,
    Hz12 = 5,
    Hz6 = 6,
    Hz361 = 7,
}

impl GyroDlpfConfig {
    /// DLPFCFG field with FCHOICE set
    pub fn register_value(self) -> u8 {
        ((self as u8) << DLPFCFG_SHIFT) | FCHOICE
    }

    /// Decode from a GYRO_CONFIG_1 value; `None` when the filter is bypassed
    pub fn from_register(value: u8) -> Option<Self> {
        if value & FCHOICE == 0 {
            return None;
        }
        Self::try_from((value & DLPFCFG_MASK) >> DLPFCFG_SHIFT).ok()
    }
}

impl TryFrom<u8> for GyroDlpfConfig {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GyroDlpfConfig::Hz196),
            1 => Ok(GyroDlpfConfig::Hz152),
            2 => Ok(GyroDlpfConfig::Hz120),
            3 => Ok(GyroDlpfConfig::Hz51),
            4 => Ok(GyroDlpfConfig::Hz24),
            5 => Ok(GyroDlpfConfig::Hz12),
            6 => Ok(GyroDlpfConfig::Hz6),
            7 => Ok(GyroDlpfConfig::Hz361),
            other => Err(ConfigError::LowPassFilter(other)),
        }
    }
}

/// Largest accelerometer sample rate divider (12 bits)
pub const ACCEL_SMPLRT_DIV_MAX: u16 = 0x0FFF;

/// Accelerometer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelConfig {
    pub range: AccelRange,
    pub dlpf: AccelDlpfConfig,
    sample_rate_div: u16,
}

impl AccelConfig {
    /// # Errors
    ///
    /// `ConfigError::SampleRateDivider` if `sample_rate_div` exceeds 12 bits.
    pub fn new(
        range: AccelRange,
        dlpf: AccelDlpfConfig,
        sample_rate_div: u16,
    ) -> Result<Self, ConfigError> {
        if sample_rate_div > ACCEL_SMPLRT_DIV_MAX {
            return Err(ConfigError::SampleRateDivider(sample_rate_div));
        }
        Ok(Self {
            range,
            dlpf,
            sample_rate_div,
        })
    }

    pub fn sample_rate_div(&self) -> u16 {
        self.sample_rate_div
    }

    /// ACCEL_CONFIG value
    pub fn register_value(&self) -> u8 {
        self.range.register_value() | self.dlpf.register_value()
    }
}

impl Default for AccelConfig {
    fn default() -> Self {
        Self {
            range: AccelRange::G16,
            dlpf: AccelDlpfConfig::Hz246,
            sample_rate_div: 0,
        }
    }
}

/// Gyroscope settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GyroConfig {
    pub range: GyroRange,
    pub dlpf: GyroDlpfConfig,
    pub sample_rate_div: u8,
}

impl GyroConfig {
    /// GYRO_CONFIG_1 value
    pub fn register_value(&self) -> u8 {
        self.range.register_value() | self.dlpf.register_value()
    }
}

impl Default for GyroConfig {
    fn default() -> Self {
        Self {
            range: GyroRange::Dps2000,
            dlpf: GyroDlpfConfig::Hz152,
            sample_rate_div: 0,
        }
    }
}

/// Bus and timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// SPI bus number (`/dev/spidev{bus}.{cs}`)
    pub bus_number: u8,
    /// Chip select line
    pub chip_select: u8,
    /// SPI clock
    pub clock_hz: u32,
    /// Wait between initialisation groups
    pub settle_delay_ms: u32,
}

impl DeviceConfig {
    /// SPI settings required by the ICM-20948: mode 3, 8 bits per word
    pub fn spi_config(&self) -> SpiConfig {
        SpiConfig {
            frequency: self.clock_hz,
            mode: SpiMode::Mode3,
            bits_per_word: 8,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bus_number: 0,
            chip_select: 0,
            clock_hz: 7_000_000,
            settle_delay_ms: 50,
        }
    }
}

/// Configuration read back from the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveConfig {
    pub accel_range: AccelRange,
    pub accel_dlpf: Option<AccelDlpfConfig>,
    pub gyro_range: GyroRange,
    pub gyro_dlpf: Option<GyroDlpfConfig>,
}

impl ActiveConfig {
    /// Decode ACCEL_CONFIG and GYRO_CONFIG_1 values
    pub fn from_registers(accel_config: u8, gyro_config: u8) -> Self {
        Self {
            accel_range: AccelRange::from_register(accel_config),
            accel_dlpf: AccelDlpfConfig::from_register(accel_config),
            gyro_range: GyroRange::from_register(gyro_config),
            gyro_dlpf: GyroDlpfConfig::from_register(gyro_config),
        }
    }

    /// True when ranges and filters match what was requested
    pub fn matches(&self, accel: &AccelConfig, gyro: &GyroConfig) -> bool {
        self.accel_range == accel.range
            && self.accel_dlpf == Some(accel.dlpf)
            && self.gyro_range == gyro.range
            && self.gyro_dlpf == Some(gyro.dlpf)
    }
}
